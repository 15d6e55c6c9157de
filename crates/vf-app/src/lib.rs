//! Shared application service layer for voltflow.
//!
//! Turns a simulation request (a drawn circuit plus a duration, attributed to
//! a caller identity) into a result: compile the netlist, stage it in a
//! per-request workspace, run the solver, decode what it printed, and clean
//! up. Front ends (the CLI, an HTTP layer) only call into this crate.

pub mod config;
pub mod error;
pub mod progress;
pub mod query;
pub mod request;
pub mod run_service;
pub mod workspace;

// Re-export key types for convenience
pub use config::{SimulatorConfig, SolverConfig};
pub use error::{AppError, AppResult, ErrorClass};
pub use progress::{RunProgressEvent, RunStage};
pub use query::{
    ResultSummary, extract_series, get_result_summary, list_component_ids, series_to_csv,
};
pub use request::{DEFAULT_DURATION_S, GraphData, SimulationPayload, SimulationRequest};
pub use run_service::{
    RunTimingSummary, SimulationResponse, simulate, simulate_concurrent, simulate_with_progress,
};
pub use workspace::{NETLIST_FILE, Workspace, WorkspaceRoot};
