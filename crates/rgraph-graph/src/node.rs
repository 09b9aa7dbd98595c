//! A single node in the resource graph (spec §3 `Node`, §4.3).

use std::sync::Arc;

use rgraph_resource::ResourceID;

use crate::erased::ErasedResource;
use crate::plan::PlanSlot;
use crate::refs::ResourceRef;

/// Whether a node's resource currently exists in the cloud.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// No instance exists (or is wanted).
    DoesNotExist,
    /// An instance exists (or is wanted).
    Exists,
}

/// Who is responsible for a node's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    /// The engine may create/update/delete this resource.
    Managed,
    /// The engine must never mutate this resource; it may only appear with
    /// plan `Nothing` (spec §3 invariant).
    External,
}

/// A node in the resource graph: identity, state, ownership, references,
/// the attached resource (if any), and its plan slot.
#[derive(Debug, Clone)]
pub struct Node {
    id: ResourceID,
    state: NodeState,
    ownership: Ownership,
    protect: bool,
    out_refs: Vec<ResourceRef>,
    in_refs: Vec<ResourceRef>,
    resource: Option<Arc<dyn ErasedResource>>,
    plan: PlanSlot,
}

impl Node {
    /// This node's identity.
    #[must_use]
    pub fn id(&self) -> &ResourceID {
        &self.id
    }

    /// Whether this node's resource exists.
    #[must_use]
    pub fn state(&self) -> NodeState {
        self.state
    }

    /// Who owns this node's lifecycle.
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Whether this node is protected against deletion (spec's "protect"
    /// lifecycle hint): a planned `Delete` on a protected node is a sanity
    /// error rather than a silent deletion.
    #[must_use]
    pub fn protect(&self) -> bool {
        self.protect
    }

    /// This node's outbound references, derived from its attached resource.
    #[must_use]
    pub fn out_refs(&self) -> &[ResourceRef] {
        &self.out_refs
    }

    /// This node's inbound references, populated by [`crate::Graph::build`].
    #[must_use]
    pub fn in_refs(&self) -> &[ResourceRef] {
        &self.in_refs
    }

    /// The attached resource, if this node has one (absent for an empty
    /// placeholder node in a fresh transitive-closure builder graph).
    #[must_use]
    pub fn resource(&self) -> Option<&dyn ErasedResource> {
        self.resource.as_deref()
    }

    /// This node's plan slot.
    #[must_use]
    pub fn plan(&self) -> &PlanSlot {
        &self.plan
    }

    /// Mutable access to this node's plan slot, for the planner.
    pub fn plan_mut(&mut self) -> &mut PlanSlot {
        &mut self.plan
    }

    pub(crate) fn set_in_refs(&mut self, refs: Vec<ResourceRef>) {
        self.in_refs = refs;
    }
}

/// Assembles a [`Node`] (spec §4.3: "Builder setters").
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    id: ResourceID,
    state: NodeState,
    ownership: Ownership,
    protect: bool,
    resource: Option<Arc<dyn ErasedResource>>,
}

impl NodeBuilder {
    /// A new builder for `id`, defaulting to `DoesNotExist`/`Managed`/unprotected.
    #[must_use]
    pub fn new(id: ResourceID) -> Self {
        Self { id, state: NodeState::DoesNotExist, ownership: Ownership::Managed, protect: false, resource: None }
    }

    /// Set whether this node's resource exists.
    pub fn set_state(&mut self, state: NodeState) -> &mut Self {
        self.state = state;
        self
    }

    /// Set who owns this node's lifecycle.
    pub fn set_ownership(&mut self, ownership: Ownership) -> &mut Self {
        self.ownership = ownership;
        self
    }

    /// Mark this node protected against deletion.
    pub fn set_protect(&mut self, protect: bool) -> &mut Self {
        self.protect = protect;
        self
    }

    /// Attach an already-frozen resource. Out-refs are derived from it when
    /// [`NodeBuilder::build`] runs.
    pub fn set_resource<R: ErasedResource + 'static>(&mut self, resource: R) -> &mut Self {
        self.resource = Some(Arc::new(resource));
        self
    }

    /// Attach a resource that has already been type-erased behind an `Arc`
    /// (e.g. one returned by a [`ErasedResource`]-returning fetch), without
    /// requiring the caller to know its concrete type.
    pub fn set_resource_arc(&mut self, resource: Arc<dyn ErasedResource>) -> &mut Self {
        self.resource = Some(resource);
        self
    }

    /// This builder's id, for callers that need it before `build` consumes
    /// the builder (e.g. queuing discovered neighbors during closure).
    #[must_use]
    pub fn id(&self) -> &ResourceID {
        &self.id
    }

    /// This builder's current ownership.
    #[must_use]
    pub fn ownership(&self) -> Ownership {
        self.ownership
    }

    /// Derive out-refs from the attached resource (if any) and seal this
    /// builder into a [`Node`] with an empty plan slot and no in-refs yet
    /// (those are resolved by [`crate::Graph::build`]).
    #[must_use]
    pub fn build(self) -> Node {
        let out_refs = self.resource.as_deref().map(|r| r.out_refs(&self.id)).unwrap_or_default();
        Node {
            id: self.id,
            state: self.state,
            ownership: self.ownership,
            protect: self.protect,
            out_refs,
            in_refs: Vec::new(),
            resource: self.resource,
            plan: PlanSlot::empty(),
        }
    }
}
