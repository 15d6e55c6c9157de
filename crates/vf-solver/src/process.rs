//! Solver subprocess runner.
//!
//! Invocation is `<program> [script] <netlist path> <duration seconds>`.
//! Stdout and stderr are drained on their own threads while the process runs
//! so a chatty solver can never fill a pipe and stall.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use vf_core::format_decimal;

use crate::backend::{SolverBackend, SolverOutput};
use crate::error::{SolverError, SolverResult};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// How to launch the solver.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverCommand {
    /// Interpreter or executable, e.g. `python3`.
    pub program: PathBuf,
    /// Script passed as the first argument when the program is an interpreter.
    pub script: Option<PathBuf>,
    /// Kill the solver if it runs longer than this. `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for SolverCommand {
    fn default() -> Self {
        Self {
            program: PathBuf::from("python3"),
            script: Some(PathBuf::from("circuit_solver/main.py")),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

/// Runs the solver as a child process.
#[derive(Debug, Clone, Default)]
pub struct ProcessSolver {
    command: SolverCommand,
}

type ReaderHandle = JoinHandle<std::io::Result<Vec<u8>>>;

impl ProcessSolver {
    pub fn new(command: SolverCommand) -> Self {
        Self { command }
    }

    pub fn command(&self) -> &SolverCommand {
        &self.command
    }

    /// Positional arguments for one run.
    pub fn args(&self, netlist_path: &Path, duration_s: f64) -> Vec<String> {
        let mut args = Vec::with_capacity(3);
        if let Some(script) = &self.command.script {
            args.push(script.display().to_string());
        }
        args.push(netlist_path.display().to_string());
        args.push(format_decimal(duration_s));
        args
    }

    /// Check that the program can be launched; returns the first line it
    /// prints for `--version`.
    pub fn probe(&self) -> SolverResult<String> {
        let output = Command::new(&self.command.program)
            .arg("--version")
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SolverError::Spawn {
                program: self.program_name(),
                source,
            })?;

        if !output.status.success() {
            return Err(SolverError::Probe(format!(
                "'{} --version' exited with {}",
                self.program_name(),
                output.status
            )));
        }

        // python prints its version to stdout, some older builds to stderr
        let text = if output.stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            String::from_utf8_lossy(&output.stdout).into_owned()
        };
        Ok(text.lines().next().unwrap_or("unknown").trim().to_string())
    }

    fn program_name(&self) -> String {
        self.command.program.display().to_string()
    }
}

impl SolverBackend for ProcessSolver {
    fn run(&self, netlist_path: &Path, duration_s: f64) -> SolverResult<SolverOutput> {
        let args = self.args(netlist_path, duration_s);
        tracing::debug!(program = %self.program_name(), ?args, "spawning solver");

        let mut child = Command::new(&self.command.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SolverError::Spawn {
                program: self.program_name(),
                source,
            })?;

        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = match wait_with_deadline(&mut child, self.command.timeout) {
            Ok(status) => status,
            Err(err) => {
                // Readers are detached: a grandchild may still hold the pipes
                // open and joining would block until it exits.
                drop(stdout_reader);
                drop(stderr_reader);
                return Err(err);
            }
        };

        let stdout = join_reader(stdout_reader)?;
        let stderr = join_reader(stderr_reader)?;

        tracing::debug!(
            exit_code = ?status.code(),
            stdout_bytes = stdout.len(),
            stderr_bytes = stderr.len(),
            "solver terminated"
        );

        Ok(SolverOutput {
            exit_code: status.code(),
            stdout,
            stderr,
        })
    }

    fn name(&self) -> &str {
        "process"
    }
}

fn spawn_reader<R>(stream: Option<R>) -> ReaderHandle
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut stream) = stream {
            stream.read_to_end(&mut buf)?;
        }
        Ok(buf)
    })
}

fn join_reader(handle: ReaderHandle) -> SolverResult<Vec<u8>> {
    handle
        .join()
        .map_err(|_| SolverError::ReaderPanicked)?
        .map_err(SolverError::Io)
}

/// Wait for the child, killing it once `timeout` has elapsed.
fn wait_with_deadline(child: &mut Child, timeout: Option<Duration>) -> SolverResult<ExitStatus> {
    let Some(timeout) = timeout else {
        return child.wait().map_err(SolverError::Wait);
    };

    let start = Instant::now();
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) => {
                if start.elapsed() >= timeout {
                    tracing::warn!(timeout_s = timeout.as_secs_f64(), "solver deadline reached, killing");
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(SolverError::Timeout(timeout));
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => return Err(SolverError::Wait(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_command_targets_python_script() {
        let cmd = SolverCommand::default();
        assert_eq!(cmd.program, PathBuf::from("python3"));
        assert_eq!(cmd.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn args_put_script_first_and_format_duration() {
        let solver = ProcessSolver::new(SolverCommand {
            program: PathBuf::from("python3"),
            script: Some(PathBuf::from("solver/main.py")),
            timeout: None,
        });
        let args = solver.args(Path::new("/tmp/w/circuit.cir"), 0.01);
        assert_eq!(args, vec!["solver/main.py", "/tmp/w/circuit.cir", "0.01"]);
    }

    #[test]
    fn args_without_script() {
        let solver = ProcessSolver::new(SolverCommand {
            program: PathBuf::from("/usr/local/bin/solve"),
            script: None,
            timeout: None,
        });
        let args = solver.args(Path::new("net.cir"), 2.0);
        assert_eq!(args, vec!["net.cir", "2"]);
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let solver = ProcessSolver::new(SolverCommand {
            program: PathBuf::from("/nonexistent/voltflow-solver"),
            script: None,
            timeout: Some(Duration::from_secs(1)),
        });
        let err = solver.run(Path::new("net.cir"), 0.01).unwrap_err();
        assert!(matches!(err, SolverError::Spawn { .. }));
    }
}
