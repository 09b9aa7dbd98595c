//! The resource graph (spec §3, §4.3, §4.4): nodes keyed by resource
//! identity, typed cross-references derived from `SelfLink` fields, and the
//! per-node plan slot the planner fills in.
//!
//! Node resources are held behind [`ErasedResource`] so one [`Graph`] can
//! hold nodes of heterogeneous concrete resource types (spec §9's
//! "hand-write [visitors] per resource", realized here as a small trait
//! object rather than runtime reflection).

mod erased;
mod error;
mod graph;
mod node;
mod plan;
mod refs;
mod summary;

pub use erased::{ErasedResource, FingerprintStatus};
pub use error::{Error, Result};
pub use graph::{Graph, GraphBuilder};
pub use node::{Node, NodeBuilder, NodeState, Ownership};
pub use plan::{Operation, PlanSlot};
pub use refs::ResourceRef;
pub use summary::{PlanSummary, PlanSummaryEntry};
