//! Error types for the resource model.

use rgraph_path::Path;

use crate::identity::Variant;

/// Errors raised while validating a payload just after it was mutated through
/// `access_v` (spec §4.1.1).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// A `System`/`OutputOnly` field carried a non-zero value.
    #[error("field '{field}' is system/output-only but holds a non-zero value")]
    InvalidFieldValue {
        /// The offending field's name.
        field: String,
    },
    /// An ordinary/non-zero-value field was zero without a meta-field entry.
    #[error("field '{field}' is zero but is not listed in null_fields or force_send_fields")]
    ZeroWithoutMetaField {
        /// The offending field's name.
        field: String,
    },
    /// A field was non-zero yet still listed in `null_fields`.
    #[error("field '{field}' is non-zero but listed in null_fields")]
    ConflictingMetaField {
        /// The offending field's name.
        field: String,
    },
}

/// One field that could not be carried across a structural copy.
#[derive(Debug, Clone, PartialEq)]
pub struct MissingFieldEntry {
    /// Where in the source payload the field lives.
    pub path: Path,
    /// The value that could not be represented on the destination side.
    pub value: serde_json::Value,
    /// The conversion direction the field went missing in.
    pub direction: (Variant, Variant),
}

/// The conversion-missing set attached to a [`crate::Resource::to_v`] result.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionError {
    /// The fields that were dropped.
    pub missing: Vec<MissingFieldEntry>,
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} field(s) could not be represented in the requested variant", self.missing.len())
    }
}

impl std::error::Error for ConversionError {}

/// Top-level error type for `rgraph-resource`.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A `SelfLink`/resource URL could not be parsed.
    #[error("invalid resource URL: {0}")]
    InvalidUrl(String),
    /// An API version segment did not name a known variant.
    #[error("unknown API variant segment '{0}'")]
    UnknownVariant(String),
    /// A resource's shape nested deeper than is ever legitimate; treated as
    /// evidence of a structural cycle (spec §4.1 init-time schema check).
    #[error("resource shape recursed past the maximum nesting depth ({0}); suspect a structural cycle")]
    SchemaCycle(usize),
    /// A GA field has no counterpart of the same name in a Beta/Alpha peer.
    #[error("GA field '{field}' has no counterpart in {variant:?}")]
    GaNotSubset {
        /// The GA-only field's name.
        field: String,
        /// The variant missing it.
        variant: Variant,
    },
    /// Validation of a payload mutated through `access_v` failed.
    #[error("access validation failed: {0}")]
    AccessValidation(#[from] AccessError),
    /// An operation was attempted on a variant that is currently a placeholder.
    #[error("operation attempted on placeholder variant {0:?}")]
    PlaceholderMisuse(Variant),
    /// No variant converts to a payload without dropping fields.
    #[error("no variant converts without loss; version is indeterminate")]
    IndeterminateVersion,
    /// Payload (de)serialization to the JSON structural representation failed.
    #[error("resource payload (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result alias for `rgraph-resource`.
pub type Result<T> = std::result::Result<T, Error>;
