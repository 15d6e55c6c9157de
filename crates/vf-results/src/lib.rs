//! vf-results: simulation result types and solver output decoding.

pub mod decode;
pub mod hash;
pub mod types;

pub use decode::{SolverFailure, decode_failure, decode_success};
pub use hash::netlist_digest;
pub use types::*;

pub type ResultsResult<T> = Result<T, ResultsError>;

#[derive(thiserror::Error, Debug)]
pub enum ResultsError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Series length mismatch for {component}.{series}: {len} samples, time has {expected}")]
    SeriesLength {
        component: String,
        series: &'static str,
        len: usize,
        expected: usize,
    },
}
