use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias for the droneroute library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
///
/// Only structural problems and precondition violations surface here. A route
/// that cannot satisfy the battery ceiling, or an unreachable destination, is a
/// normal outcome and is reported as `None` by the search functions.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a node identifier could not be found in the network.
    #[error("unknown node: {name}{}", format_suggestions(.suggestions))]
    UnknownNode {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when the same node identifier is declared twice.
    #[error("duplicate node identifier: {id}")]
    DuplicateNode { id: String },

    /// Raised when a node identifier is empty or contains the route separator.
    #[error("invalid node identifier {id:?}: {reason}")]
    InvalidNodeId { id: String, reason: &'static str },

    /// Raised when more than one edge connects the same pair of nodes.
    #[error("duplicate edge between {a} and {b}")]
    DuplicateEdge { a: String, b: String },

    /// Raised when an edge connects a node to itself.
    #[error("self loop on node {id}")]
    SelfLoop { id: String },

    /// Raised when an edge references a node that was never declared.
    #[error("edge {source_id} - {target_id} references unknown node {missing}")]
    DanglingEdge {
        source_id: String,
        target_id: String,
        missing: String,
    },

    /// Network file could not be located at the resolved path.
    #[error("network file not found at {path}")]
    NetworkNotFound { path: PathBuf },

    /// No suitable project directories could be resolved for this platform.
    #[error("failed to resolve project directories for the default network location")]
    ProjectDirsUnavailable,

    /// Raised when a computed route plan lacks any nodes.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON decoding errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
