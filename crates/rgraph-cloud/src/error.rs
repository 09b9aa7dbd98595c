//! The error shape a [`crate::CloudClient`] implementation must return
//! (spec §6: "Errors must be either 'not found' or a generic `CloudError`").

/// An error surfaced by a cloud API call.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CloudError {
    /// The requested resource does not exist. The core pattern-matches on
    /// this specifically to turn a failed `get` into `NodeState::DoesNotExist`
    /// rather than aborting transitive closure (spec §4.5).
    #[error("resource not found")]
    NotFound,
    /// Any other cloud-side failure.
    #[error("cloud error {code}: {message}")]
    Generic {
        /// A stable, implementation-defined error code.
        code: String,
        /// A human-readable description.
        message: String,
    },
}

/// Result alias for cloud calls.
pub type CloudResult<T> = std::result::Result<T, CloudError>;
