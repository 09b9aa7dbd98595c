//! The `CloudClient` contract (spec §6): per-resource-kind, per-variant
//! CRUD, consumed by the planner (to fetch `got`) and the executor (to
//! apply a compiled action). The raw per-resource API bindings behind an
//! implementation are an external collaborator (spec §1).
//!
//! Payloads cross this boundary as `serde_json::Value` rather than a
//! concrete `Payload` type: the engine attaches heterogeneous resource
//! kinds to one graph (spec §9's visitor generalization), so the one trait
//! object every resource kind's client implements has to speak a shape-
//! independent wire value. `Payload::to_value`/`Payload::from_value`
//! (`rgraph-resource`) are the conversion points at the call sites that
//! still know the concrete type.

use async_trait::async_trait;
use rgraph_resource::{ResourceID, Variant};
use serde_json::Value;

use crate::error::CloudResult;

/// A scope to `list` resources within: a project, optionally narrowed to a
/// region or zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListScope {
    /// Every instance in the project regardless of location.
    Project(String),
    /// Every instance in a project's region.
    Region(String, String),
    /// Every instance in a project's zone.
    Zone(String, String),
}

/// Per-resource-kind, per-variant CRUD against the cloud.
#[async_trait]
pub trait CloudClient: Send + Sync {
    /// Fetch one resource instance. Implementations return
    /// [`crate::CloudError::NotFound`] rather than a generic error when the
    /// instance does not exist.
    async fn get(&self, ctx: &crate::Context, id: &ResourceID, variant: Variant) -> CloudResult<Value>;

    /// Create a new resource instance.
    async fn insert(&self, ctx: &crate::Context, id: &ResourceID, variant: Variant, payload: Value) -> CloudResult<()>;

    /// Update an existing resource instance. `fingerprint` carries the
    /// optimistic-concurrency token read at got-time, if the resource kind
    /// uses one (spec §4.9, §9).
    async fn update(
        &self,
        ctx: &crate::Context,
        id: &ResourceID,
        variant: Variant,
        payload: Value,
        fingerprint: Option<&str>,
    ) -> CloudResult<()>;

    /// Delete a resource instance.
    async fn delete(&self, ctx: &crate::Context, id: &ResourceID, variant: Variant) -> CloudResult<()>;

    /// List resource instances within `scope`, optionally narrowed by a
    /// provider-defined `filter` expression.
    async fn list(&self, ctx: &crate::Context, scope: ListScope, filter: Option<&str>) -> CloudResult<Vec<Value>>;
}
