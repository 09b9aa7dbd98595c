//! A declarative resource-graph reconciliation engine for cloud
//! infrastructure (spec §1, §2): given a *want* graph of typed resources,
//! drive the cloud toward it by diffing against its current state, planning
//! the minimal set of create/update/recreate/delete operations, and
//! executing them in dependency order.
//!
//! This crate is a thin facade over the engine's stages, each its own
//! sub-crate:
//!
//! - [`rgraph_resource`] — the multi-version (GA/Alpha/Beta) resource model.
//! - [`rgraph_path`] — structural paths and field-trait classification.
//! - [`rgraph_diff`] — the structural differ.
//! - [`rgraph_graph`] — the resource graph and its plan slots.
//! - [`rgraph_cloud`] — the external `CloudClient`/`Observer` interfaces.
//! - [`rgraph_closure`] — the transitive-closure fetch.
//! - [`rgraph_planner`] — local planning, recreate propagation, sanity checks.
//! - [`rgraph_compiler`] — planned-graph-to-action-list compilation.
//! - [`rgraph_executor`] — action execution.
//! - [`rgraph_viz`] — Graphviz rendering of a graph and its plan.
//!
//! [`reconcile`] wires every stage together in the order spec §2 describes.

mod error;
mod reconcile;

pub use error::{Error, Result};
pub use reconcile::{reconcile, ReconcileReport};

pub use rgraph_closure::{compute_transitive_closure, ClosureFailure, DefaultOnGet, OnGetHook, Registry, ResourceAdapter, TypedAdapter};
pub use rgraph_cloud::{CallContextKey, CloudClient, CloudError, CloudResult, Context, ListScope, NullObserver, Observer, TracingObserver};
pub use rgraph_compiler::{compile, Action, ActionBody, Event};
pub use rgraph_diff::{diff, DiffResult};
pub use rgraph_executor::{CancellationHandle, ExecutionReport, Executor, ExecutorConfig, NullTracer, Tracer, TracingTracer};
pub use rgraph_graph::{
    ErasedResource, Graph, GraphBuilder, Node, NodeBuilder, NodeState, Operation, Ownership, PlanSlot, PlanSummary, PlanSummaryEntry, ResourceRef,
};
pub use rgraph_path::{FieldTraits, FieldType, Path, Step, TypeShape};
pub use rgraph_planner::{check_delete_consistency, plan, plan_locally, plan_locally_with_config, plan_with_config, propagate_recreates, PlannerConfig};
pub use rgraph_resource::{ApiDomain, FrozenResource, Payload, Resource, ResourceID, ResourceKey, Variant};
pub use rgraph_viz::render as render_dot;
