use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::graph::NodeId;

/// Errors raised while loading or building a graph.
///
/// Queries never fail: out-of-range nodes yield `0` / empty results instead.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The edge list could not be opened.
    #[error("could not open edge list {}", .path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Reading failed after the source was opened.
    #[error("I/O error reading edge list: {0}")]
    Io(#[from] io::Error),

    /// The graph would not fit in the configured memory budget.
    #[error(
        "graph needs ~{} MB resident during build, exceeds limit of {} MB",
        .required_bytes / (1024 * 1024),
        .limit_bytes / (1024 * 1024)
    )]
    MemoryLimitExceeded {
        required_bytes: usize,
        limit_bytes: usize,
    },

    /// An edge endpoint lies outside `[0, num_nodes)`.
    #[error("node {node} out of range for graph with {num_nodes} nodes")]
    NodeOutOfRange { node: NodeId, num_nodes: usize },

    /// A CSR invariant does not hold.
    #[error("invalid CSR structure: {0}")]
    InvalidCsr(String),

    /// The engine already holds a graph; stores are loaded exactly once.
    #[error("graph already loaded from {}", .0.display())]
    AlreadyLoaded(PathBuf),
}

/// Result alias for graph construction.
pub type Result<T> = std::result::Result<T, GraphError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_limit_message_in_mb() {
        let err = GraphError::MemoryLimitExceeded {
            required_bytes: 3 * 1024 * 1024,
            limit_bytes: 2 * 1024 * 1024,
        };
        assert_eq!(
            err.to_string(),
            "graph needs ~3 MB resident during build, exceeds limit of 2 MB"
        );
    }

    #[test]
    fn test_source_unreadable_keeps_io_source() {
        use std::error::Error as _;

        let err = GraphError::SourceUnreadable {
            path: PathBuf::from("missing.txt"),
            source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
        };
        assert!(err.to_string().contains("missing.txt"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_io_from_conversion() {
        let err: GraphError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert!(matches!(err, GraphError::Io(_)));
    }
}
