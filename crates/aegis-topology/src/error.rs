//! Error types for topology construction and path queries.

use thiserror::Error;

/// Result type for topology operations.
pub type Result<T> = std::result::Result<T, TopologyError>;

/// Errors raised while building or mutating a topology.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    /// No node with this name exists
    #[error("unknown node '{0}'")]
    NotFound(String),

    /// A node with this name already exists
    #[error("node '{0}' already exists")]
    DuplicateNode(String),

    /// Node names must be non-empty
    #[error("node name must not be empty")]
    EmptyName,

    /// A link may not connect a node to itself
    #[error("link from '{0}' to itself is not allowed")]
    SelfLoop(String),

    /// The two nodes are already linked
    #[error("nodes '{from}' and '{to}' are already linked")]
    DuplicateLink { from: String, to: String },
}

/// Errors returned by the path engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    /// One of the endpoints does not exist
    #[error("unknown node '{0}'")]
    NotFound(String),

    /// No path over active nodes connects the endpoints
    #[error("no route between '{from}' and '{to}'")]
    Unreachable { from: String, to: String },
}

