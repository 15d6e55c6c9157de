//! Error types for the vf-app service layer.

use std::path::PathBuf;

use vf_results::ResultsError;
use vf_solver::SolverError;

/// Who is at fault, for mapping onto response codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The request itself is unusable (4xx-equivalent).
    Client,
    /// Something went wrong on our side (5xx-equivalent).
    Server,
}

/// Application error type that wraps errors from the backend crates and
/// carries the simulation failure taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Circuit is empty: add at least one node and one component")]
    EmptyCircuit,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The solver refused the circuit and said why.
    #[error("{message}")]
    SolverRejected { message: String },

    /// The solver failed without a usable explanation. `detail` holds the raw
    /// stderr and never appears in the display text.
    #[error("Simulation engine failed")]
    SolverEngine {
        exit_code: Option<i32>,
        detail: String,
    },

    #[error("Failed to parse solver output: {0}")]
    ResultParse(#[from] ResultsError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Workspace error at {path}: {source}")]
    Workspace {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read config file: {path}")]
    ConfigFileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize output: {0}")]
    Serialize(serde_json::Error),

    #[error("Simulation worker panicked")]
    WorkerPanicked,
}

/// Result type for vf-app operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn class(&self) -> ErrorClass {
        match self {
            AppError::EmptyCircuit | AppError::InvalidInput(_) | AppError::SolverRejected { .. } => {
                ErrorClass::Client
            }
            _ => ErrorClass::Server,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.class() == ErrorClass::Client
    }

    /// Diagnostic text that must not be shown as the primary message.
    pub fn detail(&self) -> Option<&str> {
        match self {
            AppError::SolverEngine { detail, .. } if !detail.is_empty() => Some(detail),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_displays_solver_message_verbatim() {
        let err = AppError::SolverRejected {
            message: "singular matrix".to_string(),
        };
        assert_eq!(err.to_string(), "singular matrix");
        assert_eq!(err.class(), ErrorClass::Client);
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn engine_failure_hides_detail_from_display() {
        let err = AppError::SolverEngine {
            exit_code: Some(1),
            detail: "not json".to_string(),
        };
        assert_eq!(err.to_string(), "Simulation engine failed");
        assert!(!err.is_client_error());
        assert_eq!(err.detail(), Some("not json"));
    }

    #[test]
    fn classes() {
        assert!(AppError::EmptyCircuit.is_client_error());
        assert!(AppError::InvalidInput("x".into()).is_client_error());
        assert!(!AppError::Config("x".into()).is_client_error());
        let timeout = AppError::from(SolverError::Timeout(std::time::Duration::from_secs(1)));
        assert_eq!(timeout.class(), ErrorClass::Server);
    }

    #[test]
    fn output_serialization_failure_is_server_side() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = AppError::Serialize(json_err);
        assert_eq!(err.class(), ErrorClass::Server);
        assert!(err.to_string().starts_with("Failed to serialize output"));
    }
}
