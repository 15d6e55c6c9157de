//! The solver capability seen by the rest of the pipeline.

use std::path::Path;

use crate::error::SolverResult;

/// Everything the solver produced, available only after it terminated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SolverOutput {
    /// Process exit code; `None` when the process was ended by a signal.
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl SolverOutput {
    /// Exit code 0. Anything else, including death by signal, is a failure.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stderr as text, for logs and diagnostics.
    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// A solver that turns a netlist file plus a duration into output buffers.
///
/// `ProcessSolver` is the production implementation; tests and embedders can
/// substitute their own.
pub trait SolverBackend: Send + Sync {
    /// Run one simulation of `duration_s` seconds over the netlist at
    /// `netlist_path`, blocking until the solver has terminated.
    fn run(&self, netlist_path: &Path, duration_s: f64) -> SolverResult<SolverOutput>;

    /// Short name used in logs.
    fn name(&self) -> &str {
        "solver"
    }
}

impl<T: SolverBackend + ?Sized> SolverBackend for &T {
    fn run(&self, netlist_path: &Path, duration_s: f64) -> SolverResult<SolverOutput> {
        (**self).run(netlist_path, duration_s)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_requires_exit_zero() {
        let mut out = SolverOutput {
            exit_code: Some(0),
            ..Default::default()
        };
        assert!(out.success());
        out.exit_code = Some(1);
        assert!(!out.success());
        out.exit_code = None;
        assert!(!out.success());
    }

    #[test]
    fn stderr_lossy_tolerates_bad_utf8() {
        let out = SolverOutput {
            exit_code: Some(1),
            stdout: vec![],
            stderr: vec![b'o', b'k', 0xff],
        };
        assert!(out.stderr_lossy().starts_with("ok"));
    }
}
