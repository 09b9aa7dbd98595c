//! Fetches the `got` side of a graph from the cloud (spec §4.5 Transitive
//! Closure): starting from the `want` graph's identities as seeds, follow
//! every out-ref discovered in the fetched resources until no new identity
//! is reachable.

mod closure;
mod error;
mod registry;

pub use closure::{compute_transitive_closure, DefaultOnGet, OnGetHook};
pub use error::{ClosureFailure, Error, Result};
pub use registry::{Registry, ResourceAdapter, TypedAdapter};
