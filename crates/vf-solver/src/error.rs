//! Error types for solver invocation.

use std::time::Duration;

use thiserror::Error;

pub type SolverResult<T> = Result<T, SolverError>;

/// Failures to run the solver at all. A solver that runs and exits nonzero
/// is not an error here; see [`crate::SolverOutput::success`].
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to launch solver '{program}': {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("failed waiting for solver: {0}")]
    Wait(std::io::Error),

    #[error("failed reading solver output: {0}")]
    Io(std::io::Error),

    #[error("solver output reader panicked")]
    ReaderPanicked,

    #[error("solver timed out after {:.1}s", .0.as_secs_f64())]
    Timeout(Duration),

    #[error("solver probe failed: {0}")]
    Probe(String),
}
