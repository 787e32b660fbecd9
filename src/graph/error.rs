//! Errors reported by graph operations

use thiserror::Error;

/// Errors that can occur during graph operations
///
/// Every error is returned by the call that triggered it, before any state
/// change has happened.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The caller supplied a malformed shape
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// A referenced node, edge or path does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// The operation is incompatible with the graph configuration or state
    #[error("Usage error: {0}")]
    Usage(String),
}

/// Coarse classification of a [`GraphError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArguments,
    NotFound,
    Usage,
}

impl GraphError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::InvalidArguments(_) => ErrorKind::InvalidArguments,
            GraphError::NotFound(_) => ErrorKind::NotFound,
            GraphError::Usage(_) => ErrorKind::Usage,
        }
    }

    pub(crate) fn node_not_found(key: &str) -> Self {
        GraphError::NotFound(format!("node \"{}\" not found", key))
    }

    pub(crate) fn edge_not_found(key: &str) -> Self {
        GraphError::NotFound(format!("edge \"{}\" not found", key))
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
