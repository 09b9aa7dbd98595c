//! Structural, traits-aware diff of two resource payloads (spec §4.2).
//!
//! [`diff`] walks two payloads of the same concrete variant type, skipping
//! `OutputOnly`/`System` fields, and records added/removed/changed leaves as
//! a [`DiffResult`]. [`diff_frozen`] extends this to a pair of
//! [`rgraph_resource::FrozenResource`]s, resolving a common variant first
//! (GA converts to whichever side is non-GA; Alpha↔Beta is rejected).

mod engine;
mod error;
mod frozen;
mod result;

pub use engine::{diff, diff_values};
pub use error::{Error, Result};
pub use frozen::diff_frozen;
pub use result::{DiffItem, DiffResult, DiffState};
