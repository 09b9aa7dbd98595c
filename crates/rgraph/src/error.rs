//! The top-level error taxonomy (spec §7): every sub-crate's error wired in
//! behind `#[from]`, plus the one condition none of them model alone — a
//! transitive closure that came back with per-node fetch failures.

/// Aggregated error type for [`crate::reconcile`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Constructing or mutating a [`rgraph_resource::Resource`] failed (for
    /// example the init-time schema check — spec §4.1 — rejecting a
    /// structural cycle or a GA field with no Alpha/Beta counterpart).
    #[error(transparent)]
    Resource(#[from] rgraph_resource::Error),
    /// Assembling or sealing a [`rgraph_graph::Graph`] failed.
    #[error(transparent)]
    Graph(#[from] rgraph_graph::Error),
    /// The transitive closure pass itself failed (not a per-node fetch
    /// failure, which is reported via [`Self::ClosureFailures`] instead).
    #[error(transparent)]
    Closure(#[from] rgraph_closure::Error),
    /// The closure completed, but one or more nodes could not be fetched
    /// (spec §4.5: "Failures per node are recorded and do not abort other
    /// fetches" — reconcile surfaces them here rather than silently planning
    /// against an incomplete `got`).
    #[error("transitive closure left {} node(s) unresolved", .0.len())]
    ClosureFailures(Vec<rgraph_closure::ClosureFailure>),
    /// Planning (local diff, recreate propagation, or the delete-consistency
    /// check) failed.
    #[error(transparent)]
    Planner(#[from] rgraph_planner::Error),
    /// Compiling the planned graph into an action list failed.
    #[error(transparent)]
    Compiler(#[from] rgraph_compiler::Error),
}

/// Result alias for `rgraph`.
pub type Result<T> = std::result::Result<T, Error>;
