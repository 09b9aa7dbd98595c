//! Errors raised compiling a planned graph into actions.

use rgraph_resource::ResourceID;

/// Errors raised by [`crate::compile`].
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A node has no recorded plan; the planner must run before the
    /// compiler.
    #[error("node '{0:?}' has not been planned")]
    NotPlanned(ResourceID),
    /// An `Update` targets a resource kind that uses optimistic-concurrency
    /// fingerprints, but got's value carried none (spec §4.9).
    #[error("update for '{0:?}' requires a fingerprint but got carried none")]
    MissingFingerprint(ResourceID),
    /// A `Create`/`Update`/`Recreate` plan has no attached resource to read
    /// a payload from; the planner should never produce one of these without
    /// `want` carrying a resource.
    #[error("node '{0:?}' is planned to be created or updated but want carries no resource")]
    MissingPayload(ResourceID),
}

/// Result alias for `rgraph-compiler`.
pub type Result<T> = std::result::Result<T, Error>;
