//! Errors raised while planning, propagating recreates, or sanity-checking
//! a planned graph.

use rgraph_resource::ResourceID;

/// Errors raised by `rgraph-planner`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// `want` wants to manage a node that `got` reports as `External`.
    #[error("node '{0:?}' is owned externally but wanted as managed")]
    OwnershipConflict(ResourceID),
    /// Recreate propagation reached an externally owned dependent, which
    /// the engine must never mutate (spec §4.7).
    #[error("recreate propagation would require mutating externally owned node '{0:?}'")]
    ExternalRecreateDependency(ResourceID),
    /// Recreate propagation reached a dependent whose existing plan cannot
    /// be safely rewritten to `Recreate`.
    #[error("recreate propagation cannot reconcile node '{0:?}' with its current plan")]
    UnreconcilableRecreateDependency(ResourceID),
    /// A node is planned `Delete` but an in-ref still points to a node that
    /// is neither `Delete` nor tombstoned (spec §4.8).
    #[error("deleting '{deleted:?}' would leave a dangling reference from '{referrer:?}'")]
    DanglingReferenceOnDelete {
        /// The node being deleted.
        deleted: ResourceID,
        /// The node whose out-ref would dangle.
        referrer: ResourceID,
    },
    /// A node marked `protect` is planned `Delete`.
    #[error("node '{0:?}' is protected and cannot be deleted")]
    ProtectedDelete(ResourceID),
    /// Diffing two attached resources failed.
    #[error(transparent)]
    Graph(#[from] rgraph_graph::Error),
}

/// Result alias for `rgraph-planner`.
pub type Result<T> = std::result::Result<T, Error>;
