//! Structural paths into a resource and field-type classification.
//!
//! This crate provides [`Path`], the structural-step representation used
//! throughout `rgraph` to address a leaf value inside a resource payload
//! (struct field, slice index, map key, pointer dereference, and their
//! wildcard forms), the [`FieldType`]/[`FieldTraits`] classification table
//! consulted by access validation, copying, and diffing, and [`TypeShape`] /
//! [`resolve_type`] for walking a hand-written schema shape along a path.

mod error;
mod path;
pub mod reserved;
mod shape;
mod traits;

pub use error::{Error, Result};
pub use path::{Path, Step};
pub use reserved::is_reserved;
pub use shape::{resolve_type, TypeShape};
pub use traits::{FieldTraits, FieldType};
