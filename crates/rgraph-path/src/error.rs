//! Error types for path resolution.

use std::fmt;

/// Result type for path operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving a [`crate::Path`] against a
/// [`crate::TypeShape`].
#[derive(Debug, Clone)]
pub enum Error {
    /// A `Field` step named a field the struct shape doesn't have.
    FieldNotFound {
        /// The field name that wasn't found.
        field: String,
        /// The path at which resolution failed, for error messages.
        at: String,
    },
    /// An `Index`/`AnySliceIndex` step was applied to a non-slice type.
    NotIndexable {
        /// The path at which resolution failed.
        at: String,
    },
    /// A `MapIndex`/`AnyMapIndex` step was applied to a non-map type.
    NotMapIndexable {
        /// The path at which resolution failed.
        at: String,
    },
    /// A `Pointer` step was applied to a non-pointer type.
    NotAPointer {
        /// The path at which resolution failed.
        at: String,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldNotFound { field, at } => {
                write!(f, "field '{field}' not found resolving path at {at}")
            }
            Self::NotIndexable { at } => {
                write!(f, "cannot index into non-slice type at {at}")
            }
            Self::NotMapIndexable { at } => {
                write!(f, "cannot map-index into non-map type at {at}")
            }
            Self::NotAPointer { at } => {
                write!(f, "cannot dereference non-pointer type at {at}")
            }
        }
    }
}

impl std::error::Error for Error {}
