use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use vf_app::{
    AppError, AppResult, RunProgressEvent, RunTimingSummary, SimulationPayload, SimulationRequest,
    SimulatorConfig, query, run_service,
};
use vf_graph::Graph;
use vf_results::SimulationResult;
use vf_solver::ProcessSolver;

#[derive(Parser)]
#[command(name = "vf-cli")]
#[command(about = "VoltFlow CLI - circuit netlist compiler and transient simulation runner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SolverArgs {
    /// Simulator config YAML (defaults plus VOLTFLOW_* environment otherwise)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Solver program, e.g. python3
    #[arg(long)]
    solver: Option<PathBuf>,
    /// Solver script passed before the netlist path
    #[arg(long)]
    script: Option<PathBuf>,
    /// Solver deadline in seconds (0 disables it)
    #[arg(long)]
    timeout: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a circuit graph to a netlist
    Compile {
        /// Graph JSON: a request body or a bare {nodes, edges} object
        graph_path: PathBuf,
        /// Output netlist path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Report edges the compiler would skip
    Check {
        /// Graph JSON: a request body or a bare {nodes, edges} object
        graph_path: PathBuf,
    },
    /// Run a transient simulation
    Simulate {
        /// Graph JSON: a request body or a bare {nodes, edges} object
        graph_path: PathBuf,
        /// Identity the workspace is attributed to
        #[arg(long, default_value = "cli")]
        identity: String,
        /// Simulated time in seconds (overrides simulationTime in the file)
        #[arg(long)]
        duration: Option<f64>,
        /// Write the result JSON here instead of printing a summary
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        solver: SolverArgs,
    },
    /// Export one component series from a result JSON file as CSV
    ExportSeries {
        /// Result JSON written by `simulate --output`
        result_path: PathBuf,
        /// Component name, e.g. R1
        component: String,
        /// Variable name (v, voltage, i, current)
        variable: String,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Check that the configured solver program can be launched
    Probe {
        #[command(flatten)]
        solver: SolverArgs,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { graph_path, output } => cmd_compile(&graph_path, output.as_deref()),
        Commands::Check { graph_path } => cmd_check(&graph_path),
        Commands::Simulate {
            graph_path,
            identity,
            duration,
            output,
            solver,
        } => cmd_simulate(&graph_path, &identity, duration, output.as_deref(), &solver),
        Commands::ExportSeries {
            result_path,
            component,
            variable,
            output,
        } => cmd_export_series(&result_path, &component, &variable, output.as_deref()),
        Commands::Probe { solver } => cmd_probe(&solver),
    }
}

/// Read a graph file, accepting both the front end's request body and a bare
/// graph.
fn load_request(path: &Path, identity: &str) -> AppResult<SimulationRequest> {
    let text = std::fs::read_to_string(path)?;
    if let Ok(payload) = serde_json::from_str::<SimulationPayload>(&text) {
        return SimulationRequest::from_payload(payload, identity);
    }
    let graph: Graph = serde_json::from_str(&text)
        .map_err(|e| AppError::InvalidInput(format!("{}: {}", path.display(), e)))?;
    SimulationRequest::new(graph, None, identity)
}

fn load_config(args: &SolverArgs) -> AppResult<SimulatorConfig> {
    let mut config = match &args.config {
        Some(path) => SimulatorConfig::load(path)?,
        None => SimulatorConfig::default(),
    };
    config.apply_env()?;

    if let Some(program) = &args.solver {
        config.solver.program = program.clone();
    }
    if let Some(script) = &args.script {
        config.solver.script = Some(script.clone());
    }
    if let Some(timeout) = args.timeout {
        config.timeout_s = if timeout == 0.0 { None } else { Some(timeout) };
    }
    config.validate()?;

    tracing::debug!(?config, "simulator config");
    Ok(config)
}

fn cmd_compile(graph_path: &Path, output: Option<&Path>) -> AppResult<()> {
    let request = load_request(graph_path, "cli")?;
    let netlist = vf_netlist::compile(&request.graph).ok_or(AppError::EmptyCircuit)?;
    let text = netlist.to_text();

    if let Some(path) = output {
        std::fs::write(path, &text)?;
        println!(
            "✓ Wrote {} components to {}",
            netlist.lines().len(),
            path.display()
        );
    } else {
        print!("{}", text);
    }

    Ok(())
}

fn cmd_check(graph_path: &Path) -> AppResult<()> {
    let request = load_request(graph_path, "cli")?;
    let report = request.graph.inspect();

    println!("Nodes: {} ({} distinct)", report.node_count, report.distinct_nodes);
    println!("Edges: {}", request.graph.edges().len());

    if report.is_clean() {
        println!("✓ Every edge will be compiled");
        return Ok(());
    }

    for index in &report.duplicate_nodes {
        println!("  duplicate node #{}", index);
    }
    for orphan in &report.orphan_edges {
        let missing: Vec<String> = orphan.missing.iter().map(|p| p.to_string()).collect();
        println!(
            "  edge #{} skipped: endpoint not a node ({})",
            orphan.edge,
            missing.join(", ")
        );
    }
    for unknown in &report.unknown_components {
        println!(
            "  edge #{} skipped: unknown component '{}'",
            unknown.edge, unknown.component
        );
    }

    Ok(())
}

fn cmd_simulate(
    graph_path: &Path,
    identity: &str,
    duration: Option<f64>,
    output: Option<&Path>,
    solver_args: &SolverArgs,
) -> AppResult<()> {
    let config = load_config(solver_args)?;
    let mut request = load_request(graph_path, identity)?;
    if duration.is_some() {
        request = SimulationRequest::new(request.graph, duration, identity)?;
    }
    let solver = ProcessSolver::new(config.solver_command());

    println!(
        "Simulating {} for {} s",
        graph_path.display(),
        request.duration_or(config.default_duration_s)
    );

    let response = match run_service::simulate_with_progress(
        &request,
        &config,
        &solver,
        Some(&mut |event| render_cli_progress(&event)),
    ) {
        Ok(response) => response,
        Err(err) => {
            if let Some(detail) = err.detail() {
                eprintln!("{}", detail);
            }
            return Err(err);
        }
    };

    println!("✓ Simulation completed: {}", response.request_id);
    println!("  Netlist digest: {}", response.netlist_digest);
    println!("  Components: {}", response.component_count);
    print_timing_summary(&response.timing);

    if let Some(path) = output {
        let json = serde_json::to_string_pretty(&response.result)
            .map_err(AppError::Serialize)?;
        std::fs::write(path, json)?;
        println!("✓ Result written to {}", path.display());
    } else {
        let summary = query::get_result_summary(&response.result)?;
        println!(
            "  Time points: {} ({} .. {} s)",
            summary.sample_count, summary.time_range.0, summary.time_range.1
        );
        println!("  Series: {}", summary.component_names.join(", "));
    }

    Ok(())
}

fn render_cli_progress(event: &RunProgressEvent) {
    match &event.message {
        Some(message) => eprintln!(
            "  [{:>7.3}s] {}: {}",
            event.elapsed_wall_s,
            event.stage.label(),
            message
        ),
        None => eprintln!("  [{:>7.3}s] {}", event.elapsed_wall_s, event.stage.label()),
    }
}

fn print_timing_summary(timing: &RunTimingSummary) {
    println!("  Timing:");
    println!("    compile: {:.3} s", timing.compile_time_s);
    println!("    write:   {:.3} s", timing.write_time_s);
    println!("    solve:   {:.3} s", timing.solve_time_s);
    println!("    decode:  {:.3} s", timing.decode_time_s);
    println!("    total:   {:.3} s", timing.total_time_s);
}

fn cmd_export_series(
    result_path: &Path,
    component: &str,
    variable: &str,
    output: Option<&Path>,
) -> AppResult<()> {
    let text = std::fs::read_to_string(result_path)?;
    let result: SimulationResult = serde_json::from_str(&text)
        .map_err(|e| AppError::InvalidInput(format!("{}: {}", result_path.display(), e)))?;

    let series = query::extract_series(&result, component, variable)?;
    let csv = query::series_to_csv(&series);

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!(
            "✓ Exported {} data points to {}",
            series.len(),
            path.display()
        );
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn cmd_probe(solver_args: &SolverArgs) -> AppResult<()> {
    let config = load_config(solver_args)?;
    let solver = ProcessSolver::new(config.solver_command());
    let version = solver.probe()?;

    println!("✓ {} is available: {}", config.solver.program.display(), version);
    if let Some(script) = &config.solver.script {
        if script.exists() {
            println!("✓ Script found: {}", script.display());
        } else {
            println!("✗ Script not found: {}", script.display());
        }
    }
    println!("  Workspace root: {}", config.workspace_root.display());

    Ok(())
}
