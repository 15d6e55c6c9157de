//! Simulation run service.
//!
//! One call runs the whole pipeline for a request: compile the graph, stage
//! the netlist in a fresh workspace, run the solver, transcode its output and
//! remove the workspace. The workspace is removed on every path, including
//! errors.

use std::time::Instant;

use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;
use vf_core::Timer;
use vf_netlist::compile;
use vf_results::{SimulationResult, SolverFailure, decode_failure, decode_success, netlist_digest};
use vf_solver::{SolverBackend, SolverOutput};

use crate::config::SimulatorConfig;
use crate::error::{AppError, AppResult};
use crate::progress::{RunProgressEvent, RunStage};
use crate::request::SimulationRequest;
use crate::workspace::WorkspaceRoot;

/// Wall time spent in each stage, in seconds.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunTimingSummary {
    pub compile_time_s: f64,
    pub write_time_s: f64,
    pub solve_time_s: f64,
    pub decode_time_s: f64,
    pub total_time_s: f64,
}

/// A successful simulation.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationResponse {
    pub request_id: Uuid,
    pub identity: String,
    pub result: SimulationResult,
    /// SHA-256 of the netlist the solver was given.
    pub netlist_digest: String,
    /// Components that made it into the netlist.
    pub component_count: usize,
    pub duration_s: f64,
    /// RFC 3339.
    pub started_at: String,
    pub timing: RunTimingSummary,
}

fn emit_progress(
    progress_cb: &mut Option<&mut dyn FnMut(RunProgressEvent)>,
    stage: RunStage,
    started: Instant,
    message: Option<String>,
) {
    if let Some(cb) = progress_cb.as_deref_mut() {
        cb(RunProgressEvent::stage(
            stage,
            started.elapsed().as_secs_f64(),
            message,
        ));
    }
}

/// Run one simulation.
pub fn simulate(
    request: &SimulationRequest,
    config: &SimulatorConfig,
    backend: &dyn SolverBackend,
) -> AppResult<SimulationResponse> {
    simulate_with_progress(request, config, backend, None)
}

/// Run one simulation and report each stage as it starts.
pub fn simulate_with_progress(
    request: &SimulationRequest,
    config: &SimulatorConfig,
    backend: &dyn SolverBackend,
    mut progress_cb: Option<&mut dyn FnMut(RunProgressEvent)>,
) -> AppResult<SimulationResponse> {
    let started = Instant::now();
    let started_at = Utc::now().to_rfc3339();
    let total = Timer::start("total");
    let mut timing = RunTimingSummary::default();

    let span = tracing::info_span!(
        "simulate",
        identity = %request.identity,
        request_id = tracing::field::Empty
    );
    let _enter = span.enter();

    emit_progress(&mut progress_cb, RunStage::Compiling, started, None);
    let timer = Timer::start("compile");
    let report = request.graph.inspect();
    if !report.is_clean() {
        tracing::warn!(
            orphan_edges = report.orphan_edges.len(),
            unknown_components = report.unknown_components.len(),
            duplicate_nodes = report.duplicate_nodes.len(),
            "graph has edges that will be skipped"
        );
    }
    let netlist = compile(&request.graph).ok_or(AppError::EmptyCircuit)?;
    let text = netlist.to_text();
    let digest = netlist_digest(&text);
    let component_count = netlist.lines().len();
    timing.compile_time_s = timer.stop();

    emit_progress(&mut progress_cb, RunStage::PreparingWorkspace, started, None);
    let timer = Timer::start("write");
    let workspace = WorkspaceRoot::new(&config.workspace_root).open(&request.identity)?;
    let request_id = workspace.request_id();
    span.record("request_id", tracing::field::display(request_id));
    let netlist_path = workspace.write(&text)?;
    timing.write_time_s = timer.stop();

    let duration_s = request.duration_or(config.default_duration_s);
    emit_progress(
        &mut progress_cb,
        RunStage::RunningSolver,
        started,
        Some(format!("{} solver, {} s simulated", backend.name(), duration_s)),
    );
    tracing::info!(
        digest = %digest,
        components = component_count,
        duration_s,
        backend = backend.name(),
        "running solver"
    );
    let timer = Timer::start("solve");
    let outcome = backend.run(&netlist_path, duration_s);
    timing.solve_time_s = timer.stop();

    emit_progress(&mut progress_cb, RunStage::DecodingOutput, started, None);
    let timer = Timer::start("decode");
    let result = outcome.map_err(AppError::from).and_then(transcode);
    timing.decode_time_s = timer.stop();

    emit_progress(&mut progress_cb, RunStage::CleaningUp, started, None);
    workspace.close();

    let result = match result {
        Ok(result) => result,
        Err(err) => {
            tracing::info!(error = %err, class = ?err.class(), "simulation failed");
            return Err(err);
        }
    };

    timing.total_time_s = total.stop();
    tracing::info!(
        samples = result.sample_count(),
        total_s = timing.total_time_s,
        "simulation complete"
    );
    emit_progress(&mut progress_cb, RunStage::Completed, started, None);

    Ok(SimulationResponse {
        request_id,
        identity: request.identity.clone(),
        result,
        netlist_digest: digest,
        component_count,
        duration_s,
        started_at,
        timing,
    })
}

/// Run several simulations at once, one thread per request. Results come back
/// in request order.
pub fn simulate_concurrent(
    requests: &[SimulationRequest],
    config: &SimulatorConfig,
    backend: &dyn SolverBackend,
) -> Vec<AppResult<SimulationResponse>> {
    std::thread::scope(|scope| {
        let handles: Vec<_> = requests
            .iter()
            .map(|request| scope.spawn(move || simulate(request, config, backend)))
            .collect();

        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or(Err(AppError::WorkerPanicked)))
            .collect()
    })
}

/// Turn a finished solver run into a result or a classified error.
fn transcode(output: SolverOutput) -> AppResult<SimulationResult> {
    if output.success() {
        return decode_success(&output.stdout).map_err(|e| {
            tracing::debug!(
                stdout = %String::from_utf8_lossy(&output.stdout),
                "unparseable solver output"
            );
            AppError::ResultParse(e)
        });
    }

    match decode_failure(&output.stderr) {
        SolverFailure::Rejected { message } => {
            tracing::info!(message = %message, "solver rejected circuit");
            Err(AppError::SolverRejected { message })
        }
        SolverFailure::Engine { detail } => {
            tracing::warn!(exit_code = ?output.exit_code, detail = %detail, "solver failed");
            Err(AppError::SolverEngine {
                exit_code: output.exit_code,
                detail,
            })
        }
    }
}
