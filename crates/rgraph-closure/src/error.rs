//! Errors raised assembling the transitive closure.

use rgraph_resource::ResourceID;

/// Errors raised by [`crate::compute_transitive_closure`] itself (as opposed
/// to per-node fetch failures, which are collected rather than raised —
/// spec §4.5: "Failures per node are recorded and do not abort other
/// fetches").
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node's resource kind has no registered [`crate::ResourceAdapter`].
    #[error("no resource adapter registered for kind '{0}'")]
    UnknownResourceKind(String),
    /// Sealing the closed graph failed (duplicate id or dangling out-ref).
    #[error(transparent)]
    Graph(#[from] rgraph_graph::Error),
}

/// Result alias for `rgraph-closure`.
pub type Result<T> = std::result::Result<T, Error>;

/// One node's fetch failure, recorded rather than aborting the whole pass.
#[derive(Debug, Clone)]
pub struct ClosureFailure {
    /// The node whose fetch failed.
    pub id: ResourceID,
    /// Why it failed.
    pub message: String,
}
