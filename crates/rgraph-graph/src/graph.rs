//! The resource graph (spec §3 `Graph`, §4.4): nodes keyed by identity, plus
//! tombstones for resources that must not exist post-reconcile.

use std::collections::{HashMap, HashSet};

use rgraph_resource::ResourceID;

use crate::error::{Error, Result};
use crate::node::{Node, NodeBuilder};
use crate::refs::ResourceRef;

/// Assembles a [`Graph`]: add nodes and tombstones, then [`GraphBuilder::build`]
/// to resolve in-refs and check referential integrity.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: HashMap<ResourceID, NodeBuilder>,
    tombstones: HashSet<ResourceID>,
}

impl GraphBuilder {
    /// An empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `builder` by its id. Errors on a duplicate id (spec §3 graph
    /// invariant: node identity is unique).
    pub fn add(&mut self, builder: NodeBuilder) -> Result<()> {
        let id = builder.id().clone();
        if self.nodes.contains_key(&id) || self.tombstones.contains(&id) {
            return Err(Error::DuplicateId(id));
        }
        self.nodes.insert(id, builder);
        Ok(())
    }

    /// Declare that `id` must not exist post-reconcile.
    pub fn add_tombstone(&mut self, id: ResourceID) {
        self.tombstones.insert(id);
    }

    /// Whether a node or tombstone is already registered for `id`.
    #[must_use]
    pub fn contains(&self, id: &ResourceID) -> bool {
        self.nodes.contains_key(id) || self.tombstones.contains(id)
    }

    /// Mutable access to an already-added node builder, for closure/planner
    /// passes that need to update state/ownership/resource after the initial
    /// add.
    pub fn get_mut(&mut self, id: &ResourceID) -> Option<&mut NodeBuilder> {
        self.nodes.get_mut(id)
    }

    /// Every id currently registered as a node (not a tombstone).
    pub fn ids(&self) -> impl Iterator<Item = &ResourceID> {
        self.nodes.keys()
    }

    /// Seal every node builder, resolve in-refs as the reverse of every
    /// node's out-refs, and verify referential integrity (spec §4.4).
    pub fn build(self) -> Result<Graph> {
        let tombstones = self.tombstones;
        let mut nodes: HashMap<ResourceID, Node> = self.nodes.into_iter().map(|(id, builder)| (id, builder.build())).collect();

        for node in nodes.values() {
            for out_ref in node.out_refs() {
                if !nodes.contains_key(&out_ref.to) && !tombstones.contains(&out_ref.to) {
                    return Err(Error::DanglingOutRef { from: out_ref.from.clone(), to: out_ref.to.clone() });
                }
            }
        }

        let mut in_refs: HashMap<ResourceID, Vec<ResourceRef>> = HashMap::new();
        for node in nodes.values() {
            for out_ref in node.out_refs() {
                in_refs.entry(out_ref.to.clone()).or_default().push(out_ref.clone());
            }
        }
        for (id, refs) in in_refs {
            if let Some(node) = nodes.get_mut(&id) {
                node.set_in_refs(refs);
            }
        }

        Ok(Graph { nodes, tombstones })
    }
}

/// A built, referentially-sound resource graph.
#[derive(Debug, Default)]
pub struct Graph {
    nodes: HashMap<ResourceID, Node>,
    tombstones: HashSet<ResourceID>,
}

impl Graph {
    /// Look up a node by id.
    #[must_use]
    pub fn get(&self, id: &ResourceID) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable lookup, for the planner recording decisions.
    pub fn get_mut(&mut self, id: &ResourceID) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    /// Every node in the graph, in unspecified order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Every tombstoned id.
    pub fn tombstones(&self) -> impl Iterator<Item = &ResourceID> {
        self.tombstones.iter()
    }

    /// Whether `id` is tombstoned.
    #[must_use]
    pub fn is_tombstoned(&self, id: &ResourceID) -> bool {
        self.tombstones.contains(id)
    }

    /// How many nodes this graph holds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether this graph holds no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// A human-readable report of every planned node (spec's "what will
    /// happen" output): counts per operation kind plus per-node rationale.
    #[must_use]
    pub fn plan_summary(&self) -> crate::summary::PlanSummary {
        crate::summary::PlanSummary::of(self)
    }

    /// A fresh [`GraphBuilder`] with the same node ids as `self` but no
    /// attached resources, state reset to `DoesNotExist`, ownership reset to
    /// `Managed` (spec §4.4: the input to transitive closure). Tombstones
    /// carry over unchanged.
    #[must_use]
    pub fn new_builder_with_empty_nodes(&self) -> GraphBuilder {
        let mut builder = GraphBuilder::new();
        for id in self.nodes.keys() {
            // `add` cannot fail here: ids are unique by construction of `self`.
            let _ = builder.add(NodeBuilder::new(id.clone()));
        }
        builder.tombstones = self.tombstones.clone();
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{NodeState, Ownership};
    use rgraph_resource::ResourceKey;

    fn id(name: &str) -> ResourceID {
        ResourceID::new("proj", "compute", "healthChecks", ResourceKey::Global(name.into()))
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let mut builder = GraphBuilder::new();
        builder.add(NodeBuilder::new(id("a"))).unwrap();
        let err = builder.add(NodeBuilder::new(id("a"))).unwrap_err();
        assert!(matches!(err, Error::DuplicateId(_)));
    }

    #[test]
    fn a_resourceless_node_has_no_out_refs_and_builds_cleanly() {
        let mut builder = GraphBuilder::new();
        builder.add(NodeBuilder::new(id("a"))).unwrap();
        let graph = builder.build().unwrap();
        assert_eq!(graph.len(), 1);
        assert!(graph.get(&id("a")).unwrap().out_refs().is_empty());
    }

    #[test]
    fn new_builder_with_empty_nodes_preserves_ids_and_tombstones() {
        let mut builder = GraphBuilder::new();
        builder.add(NodeBuilder::new(id("a"))).unwrap();
        builder.add_tombstone(id("gone"));
        let graph = builder.build().unwrap();

        let reset = graph.new_builder_with_empty_nodes();
        assert!(reset.contains(&id("a")));
        assert!(reset.contains(&id("gone")));

        let rebuilt = reset.build().unwrap();
        assert_eq!(rebuilt.get(&id("a")).unwrap().state(), NodeState::DoesNotExist);
        assert_eq!(rebuilt.get(&id("a")).unwrap().ownership(), Ownership::Managed);
        assert!(rebuilt.is_tombstoned(&id("gone")));
    }
}
