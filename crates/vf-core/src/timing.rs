//! Lightweight stage timing utilities.
//!
//! The run service times each pipeline stage (compile, workspace, solve,
//! decode) and reports the totals back to the caller. Timers also emit a
//! `debug` event so stage durations show up in logs without extra wiring.

use std::time::Instant;

/// A simple timer that measures elapsed time.
#[derive(Debug)]
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Seconds elapsed so far, without stopping the timer.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        let elapsed = self.elapsed_s();
        tracing::debug!(stage = self.label, elapsed_s = elapsed, "stage finished");
        elapsed
    }
}
