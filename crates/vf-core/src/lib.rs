//! vf-core: stable foundation for voltflow.
//!
//! Contains:
//! - numeric (Real + netlist/CLI number formatting + finiteness checks)
//! - timing (per-stage wall clock timers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod timing;

// Re-exports: nice ergonomics for downstream crates
pub use error::{VfError, VfResult};
pub use numeric::*;
pub use timing::Timer;
