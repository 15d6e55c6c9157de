//! Graph-specific error types.

pub type GraphResult<T> = Result<T, GraphError>;

/// Graph construction errors.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphError {
    /// A node has a NaN or infinite coordinate.
    NonFiniteNode { node: usize, value: f64 },

    /// An edge endpoint has a NaN or infinite coordinate.
    NonFiniteEndpoint { edge: usize, value: f64 },

    /// An edge carries a NaN or infinite numeric value.
    NonFiniteValue { edge: usize, value: f64 },
}

impl std::fmt::Display for GraphError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GraphError::NonFiniteNode { node, value } => {
                write!(f, "Node {} has non-finite coordinate {}", node, value)
            }
            GraphError::NonFiniteEndpoint { edge, value } => {
                write!(f, "Edge {} has non-finite endpoint coordinate {}", edge, value)
            }
            GraphError::NonFiniteValue { edge, value } => {
                write!(f, "Edge {} has non-finite value {}", edge, value)
            }
        }
    }
}

impl std::error::Error for GraphError {}
