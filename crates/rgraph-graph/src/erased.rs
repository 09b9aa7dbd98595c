//! Type erasure over `FrozenResource<G, A, B>` so a single [`crate::Graph`]
//! can hold nodes of heterogeneous resource kinds (spec §9: "generate
//! per-variant visitors at build time or hand-write them per resource").
//!
//! The graph, builder, planner, and compiler only ever need two things from
//! an attached resource: its out-refs, and a diff against another resource
//! known (by the caller) to be the same concrete type. [`ErasedResource`]
//! exposes exactly that over `dyn`, with [`std::any::Any`] backing the
//! type-checked downcast a same-type diff requires.

use std::any::Any;
use std::fmt;

use rgraph_diff::{diff_frozen, DiffResult};
use rgraph_path::{Path, Step};
use rgraph_resource::{parse_resource_url, FrozenResource, Payload, ResourceID};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::refs::ResourceRef;

/// A resource attached to a node, with its concrete payload types erased.
pub trait ErasedResource: fmt::Debug + Send + Sync {
    /// This resource's identity.
    fn id(&self) -> &ResourceID;

    /// Upcast for a same-concrete-type downcast in [`ErasedResource::diff`].
    fn as_any(&self) -> &dyn Any;

    /// Every outbound reference discoverable from this resource's GA payload
    /// (spec §4.3: "derived by walking the resource and finding fields typed
    /// as `SelfLink`s").
    fn out_refs(&self, from: &ResourceID) -> Vec<ResourceRef>;

    /// Diff this resource against `other`, which must be the same concrete
    /// `FrozenResource<G, A, B>` instantiation.
    fn diff(&self, other: &dyn ErasedResource) -> Result<DiffResult>;

    /// Whether `diff` touches any field this resource kind registered as
    /// `FieldType::Immutable` (spec §4.6: "classifying specific field
    /// changes as requires recreate... versus can update in place").
    fn requires_recreate(&self, diff: &DiffResult) -> bool;

    /// This resource's optimistic-concurrency fingerprint, if its shape
    /// declares a `fingerprint` field at all (spec §4.9, §9).
    fn fingerprint(&self) -> FingerprintStatus;

    /// This resource's GA payload, reduced to its JSON structural
    /// representation, for the compiler to close over as an action's
    /// payload (spec §9: closed over at compile time, not re-read at
    /// execute time).
    fn ga_value(&self) -> Option<Value>;
}

/// Whether a resource kind uses an optimistic-concurrency fingerprint, and
/// if so, whether the got-time value was actually present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FingerprintStatus {
    /// This resource kind's shape has no `fingerprint` field.
    NotUsed,
    /// The fingerprint was read at got-time.
    Present(String),
    /// This resource kind uses fingerprints but got's value carried none.
    Missing,
}

impl<G: Payload, A: Payload, B: Payload> ErasedResource for FrozenResource<G, A, B> {
    fn id(&self) -> &ResourceID {
        FrozenResource::id(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn out_refs(&self, from: &ResourceID) -> Vec<ResourceRef> {
        let Ok(value) = self.ga().to_value() else { return Vec::new() };
        let traits = G::field_traits();
        let mut refs = Vec::new();
        for path in traits.ref_paths() {
            for leaf in collect_leaves(&value, path.steps()) {
                let Some(link) = leaf.as_str() else { continue };
                let Ok((to, _variant)) = parse_resource_url(link) else {
                    tracing::warn!(from = ?from, path = %path, link, "ref field did not parse as a SelfLink");
                    continue;
                };
                refs.push(ResourceRef { from: from.clone(), to, path: path.clone() });
            }
        }
        refs
    }

    fn diff(&self, other: &dyn ErasedResource) -> Result<DiffResult> {
        let other = other.as_any().downcast_ref::<Self>().ok_or_else(|| Error::TypeMismatch(self.id().clone()))?;
        Ok(diff_frozen(self, other)?)
    }

    fn requires_recreate(&self, diff: &DiffResult) -> bool {
        G::field_traits().immutable_paths().into_iter().any(|path| diff.touches(path))
    }

    fn fingerprint(&self) -> FingerprintStatus {
        let uses_fingerprint = matches!(G::shape(), rgraph_path::TypeShape::Struct(fields) if fields.iter().any(|(name, _)| name == "fingerprint"));
        if !uses_fingerprint {
            return FingerprintStatus::NotUsed;
        }
        match self.ga().to_value() {
            Ok(value) => match value.get("fingerprint").and_then(Value::as_str) {
                Some(fingerprint) if !fingerprint.is_empty() => FingerprintStatus::Present(fingerprint.to_string()),
                _ => FingerprintStatus::Missing,
            },
            Err(_) => FingerprintStatus::Missing,
        }
    }

    fn ga_value(&self) -> Option<Value> {
        self.ga().to_value().ok()
    }
}

/// Collect every JSON leaf reached by walking `value` along `steps`,
/// expanding wildcard steps (`AnySliceIndex`/`AnyMapIndex`) into every match.
fn collect_leaves<'a>(value: &'a Value, steps: &[Step]) -> Vec<&'a Value> {
    let mut frontier = vec![value];
    for step in steps {
        let mut next = Vec::new();
        for value in frontier {
            match step {
                Step::Field(name) => {
                    if let Some(field) = value.as_object().and_then(|o| o.get(name)) {
                        next.push(field);
                    }
                }
                Step::Index(i) => {
                    if let Some(item) = value.as_array().and_then(|a| a.get(*i)) {
                        next.push(item);
                    }
                }
                Step::AnySliceIndex => {
                    if let Some(items) = value.as_array() {
                        next.extend(items.iter());
                    }
                }
                Step::MapIndex(key) => {
                    if let Some(entry) = value.as_object().and_then(|o| o.get(key)) {
                        next.push(entry);
                    }
                }
                Step::AnyMapIndex => {
                    if let Some(entries) = value.as_object() {
                        next.extend(entries.values());
                    }
                }
                Step::Pointer => next.push(value),
            }
        }
        frontier = next;
    }
    frontier
}
