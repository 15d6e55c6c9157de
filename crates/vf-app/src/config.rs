//! Simulator configuration: which solver to launch, where workspaces live, and
//! the default run parameters.
//!
//! Loaded from YAML with every field optional, then overlaid with `VOLTFLOW_*`
//! environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vf_solver::SolverCommand;

use crate::error::{AppError, AppResult};
use crate::request::DEFAULT_DURATION_S;

pub const ENV_SOLVER: &str = "VOLTFLOW_SOLVER";
pub const ENV_SOLVER_SCRIPT: &str = "VOLTFLOW_SOLVER_SCRIPT";
pub const ENV_WORKSPACE: &str = "VOLTFLOW_WORKSPACE";
pub const ENV_TIMEOUT_S: &str = "VOLTFLOW_TIMEOUT_S";

const DEFAULT_TIMEOUT_S: f64 = 60.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub program: PathBuf,
    pub script: Option<PathBuf>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        let command = SolverCommand::default();
        Self {
            program: command.program,
            script: command.script,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulatorConfig {
    pub solver: SolverConfig,
    /// Parent directory of all per-identity workspaces.
    pub workspace_root: PathBuf,
    /// Solver deadline in seconds; `null` disables it.
    pub timeout_s: Option<f64>,
    /// Used when a request leaves the duration unset or zero.
    pub default_duration_s: f64,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            solver: SolverConfig::default(),
            workspace_root: std::env::temp_dir().join("voltflow-simulations"),
            timeout_s: Some(DEFAULT_TIMEOUT_S),
            default_duration_s: DEFAULT_DURATION_S,
        }
    }
}

impl SimulatorConfig {
    pub fn load(path: &Path) -> AppResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| AppError::ConfigFileRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    pub fn from_yaml(text: &str) -> AppResult<Self> {
        let config: Self = serde_yaml::from_str(text)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay `VOLTFLOW_*` variables from the process environment.
    pub fn apply_env(&mut self) -> AppResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Overlay `VOLTFLOW_*` variables using `lookup` as the environment.
    /// Empty values are ignored.
    pub fn apply_env_from<F>(&mut self, lookup: F) -> AppResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(program) = get(ENV_SOLVER) {
            self.solver.program = PathBuf::from(program);
        }
        if let Some(script) = get(ENV_SOLVER_SCRIPT) {
            self.solver.script = Some(PathBuf::from(script));
        }
        if let Some(root) = get(ENV_WORKSPACE) {
            self.workspace_root = PathBuf::from(root);
        }
        if let Some(raw) = get(ENV_TIMEOUT_S) {
            let secs: f64 = raw.trim().parse().map_err(|_| {
                AppError::Config(format!("{} is not a number: '{}'", ENV_TIMEOUT_S, raw))
            })?;
            // 0 turns the deadline off
            self.timeout_s = if secs == 0.0 { None } else { Some(secs) };
        }
        self.validate()
    }

    pub fn validate(&self) -> AppResult<()> {
        if let Some(t) = self.timeout_s {
            if !(t.is_finite() && t > 0.0) {
                return Err(AppError::Config(format!(
                    "timeout_s must be positive, got {}",
                    t
                )));
            }
            if Duration::try_from_secs_f64(t).is_err() {
                return Err(AppError::Config(format!("timeout_s is too large: {}", t)));
            }
        }
        if !(self.default_duration_s.is_finite() && self.default_duration_s > 0.0) {
            return Err(AppError::Config(format!(
                "default_duration_s must be positive, got {}",
                self.default_duration_s
            )));
        }
        if self.solver.program.as_os_str().is_empty() {
            return Err(AppError::Config("solver.program is empty".to_string()));
        }
        Ok(())
    }

    /// Solver deadline. Values `validate` would reject count as no deadline.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_s
            .filter(|t| *t > 0.0)
            .and_then(|t| Duration::try_from_secs_f64(t).ok())
    }

    pub fn solver_command(&self) -> SolverCommand {
        SolverCommand {
            program: self.solver.program.clone(),
            script: self.solver.script.clone(),
            timeout: self.timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_launch_python_solver_with_deadline() {
        let config = SimulatorConfig::default();
        assert_eq!(config.solver.program, PathBuf::from("python3"));
        assert_eq!(config.timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.default_duration_s, 0.01);
        config.validate().unwrap();
    }

    #[test]
    fn partial_yaml_keeps_defaults() {
        let config = SimulatorConfig::from_yaml(
            "workspace_root: /srv/voltflow\nsolver:\n  script: solver/run.py\n",
        )
        .unwrap();
        assert_eq!(config.workspace_root, PathBuf::from("/srv/voltflow"));
        assert_eq!(config.solver.script, Some(PathBuf::from("solver/run.py")));
        assert_eq!(config.solver.program, PathBuf::from("python3"));
        assert_eq!(config.timeout_s, Some(60.0));
    }

    #[test]
    fn null_timeout_disables_deadline() {
        let config = SimulatorConfig::from_yaml("timeout_s: null\n").unwrap();
        assert_eq!(config.timeout(), None);
        assert_eq!(config.solver_command().timeout, None);
    }

    #[test]
    fn bad_yaml_is_config_error() {
        assert!(matches!(
            SimulatorConfig::from_yaml("timeout_s: [1, 2"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            SimulatorConfig::from_yaml("timeout_s: -5\n"),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn oversized_timeout_is_config_error() {
        assert!(matches!(
            SimulatorConfig::from_yaml("timeout_s: 1.0e30\n"),
            Err(AppError::Config(_))
        ));

        let mut config = SimulatorConfig::default();
        let err = config
            .apply_env_from(env(&[(ENV_TIMEOUT_S, "1e30")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        // set directly, bypassing validation
        let config = SimulatorConfig {
            timeout_s: Some(1.0e30),
            ..SimulatorConfig::default()
        };
        assert!(config.validate().is_err());
        assert_eq!(config.solver_command().timeout, None);
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = SimulatorConfig::load(Path::new("/nonexistent/voltflow.yaml")).unwrap_err();
        assert!(matches!(err, AppError::ConfigFileRead { .. }));
    }

    #[test]
    fn env_overrides_apply() {
        let mut config = SimulatorConfig::default();
        config
            .apply_env_from(env(&[
                (ENV_SOLVER, "/opt/py/bin/python"),
                (ENV_SOLVER_SCRIPT, "/opt/solver/main.py"),
                (ENV_WORKSPACE, "/var/tmp/vf"),
                (ENV_TIMEOUT_S, "2.5"),
            ]))
            .unwrap();

        let cmd = config.solver_command();
        assert_eq!(cmd.program, PathBuf::from("/opt/py/bin/python"));
        assert_eq!(cmd.script, Some(PathBuf::from("/opt/solver/main.py")));
        assert_eq!(cmd.timeout, Some(Duration::from_millis(2500)));
        assert_eq!(config.workspace_root, PathBuf::from("/var/tmp/vf"));
    }

    #[test]
    fn env_zero_timeout_disables_and_garbage_fails() {
        let mut config = SimulatorConfig::default();
        config.apply_env_from(env(&[(ENV_TIMEOUT_S, "0")])).unwrap();
        assert_eq!(config.timeout_s, None);

        let err = config
            .apply_env_from(env(&[(ENV_TIMEOUT_S, "soon")]))
            .unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let mut config = SimulatorConfig::default();
        config.apply_env_from(env(&[(ENV_SOLVER, "  ")])).unwrap();
        assert_eq!(config.solver.program, PathBuf::from("python3"));
    }
}
