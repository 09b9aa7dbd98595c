//! Errors raised by the diff engine.

/// Errors raised while diffing two resources.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A diff was requested between Alpha and Beta payloads directly; the
    /// spec rejects this as unsupported (spec §4.2, §9 open questions).
    #[error("cannot diff Alpha against Beta directly; convert explicitly first")]
    UnsupportedVariantPair,
    /// Payload (de)serialization to the JSON structural representation failed.
    #[error("resource payload (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
    /// Converting one side to the other's shape ahead of a cross-variant diff
    /// failed at the resource-model layer.
    #[error(transparent)]
    Resource(#[from] rgraph_resource::Error),
}

/// Result alias for `rgraph-diff`.
pub type Result<T> = std::result::Result<T, Error>;
