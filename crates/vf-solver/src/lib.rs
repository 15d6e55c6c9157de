//! vf-solver: adapter around the external circuit solver executable.
//!
//! The solver is a black box: it reads a netlist file and a simulation
//! duration, writes a JSON time series on stdout and exits 0, or writes a
//! diagnostic (ideally `{"error": "..."}`) on stderr and exits nonzero.
//! This crate only launches it, drains its output and classifies how it
//! terminated; decoding the output lives in `vf-results`.

pub mod backend;
pub mod error;
pub mod process;

pub use backend::{SolverBackend, SolverOutput};
pub use error::{SolverError, SolverResult};
pub use process::{ProcessSolver, SolverCommand};
