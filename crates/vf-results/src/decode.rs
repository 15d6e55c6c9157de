//! Decode solver output buffers.

use serde::Deserialize;

use crate::ResultsResult;
use crate::types::SimulationResult;

/// Parse the stdout of a solver that exited 0.
pub fn decode_success(stdout: &[u8]) -> ResultsResult<SimulationResult> {
    let result: SimulationResult = serde_json::from_slice(stdout)?;
    result.check_lengths()?;
    Ok(result)
}

/// How a failed solver run should be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverFailure {
    /// The solver explained the problem itself (`{"error": "..."}`); the
    /// message is written for end users.
    Rejected { message: String },
    /// Anything else. `detail` is the raw stderr, for diagnostics only.
    Engine { detail: String },
}

#[derive(Deserialize)]
struct ErrorPayload {
    error: String,
}

/// Classify the stderr of a solver that exited nonzero.
pub fn decode_failure(stderr: &[u8]) -> SolverFailure {
    match serde_json::from_slice::<ErrorPayload>(stderr) {
        Ok(payload) => SolverFailure::Rejected {
            message: payload.error,
        },
        Err(_) => SolverFailure::Engine {
            detail: String::from_utf8_lossy(stderr).trim().to_string(),
        },
    }
}
