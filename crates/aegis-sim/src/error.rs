//! Error types for the simulator.

use aegis_topology::{PathError, TopologyError};
use thiserror::Error;

/// Result type for simulator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in simulator operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown node
    #[error("Node '{0}' not found")]
    NotFound(String),

    /// No active path between two known nodes
    #[error("No route between '{from}' and '{to}'")]
    Unreachable { from: String, to: String },

    /// Direct send between nodes that share no link
    #[error("'{from}' and '{to}' are not neighbors")]
    NotNeighbors { from: String, to: String },

    /// A node on a planned route went offline before delivery reached it
    #[error("Delivery failed at hop '{hop}': node is offline")]
    HopOffline {
        hop: String,
        /// Nodes the message passed through before the failure
        travelled: Vec<String>,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// State that correct locking should make impossible
    #[error("Internal error: {0}")]
    Internal(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report encoding error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<PathError> for Error {
    fn from(e: PathError) -> Self {
        match e {
            PathError::NotFound(name) => Error::NotFound(name),
            PathError::Unreachable { from, to } => Error::Unreachable { from, to },
        }
    }
}

impl From<TopologyError> for Error {
    fn from(e: TopologyError) -> Self {
        match e {
            TopologyError::NotFound(name) => Error::NotFound(name),
            other => Error::InvalidInput(other.to_string()),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
