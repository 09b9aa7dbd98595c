//! Errors raised building or diffing the resource graph.

use rgraph_resource::ResourceID;

/// Errors raised by `rgraph-graph`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// [`crate::Graph::add`] was called with an id already present.
    #[error("duplicate node id: {0:?}")]
    DuplicateId(ResourceID),
    /// An out-ref points to an id with neither a node nor a tombstone.
    #[error("out-ref from {from:?} points to unknown id {to:?}")]
    DanglingOutRef {
        /// The referencing node.
        from: ResourceID,
        /// The unresolved target.
        to: ResourceID,
    },
    /// A diff was requested between two nodes whose attached resources are
    /// not the same concrete resource type.
    #[error("cannot diff nodes of different resource types: {0:?}")]
    TypeMismatch(ResourceID),
    /// Resolving a structural diff between attached resources failed.
    #[error(transparent)]
    Diff(#[from] rgraph_diff::Error),
}

/// Result alias for `rgraph-graph`.
pub type Result<T> = std::result::Result<T, Error>;
