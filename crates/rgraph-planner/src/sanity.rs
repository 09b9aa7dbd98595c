//! The delete-consistency sanity check (spec §4.8): every node planned
//! `Delete` must have every in-ref also planned `Delete` (or tombstoned),
//! otherwise removing it would leave a dangling reference.

use rgraph_graph::{Graph, Operation};

use crate::error::{Error, Result};

/// Verify delete consistency across the whole planned graph.
///
/// Also rejects a planned `Delete` on any node marked [`rgraph_graph::Node::protect`]
/// (a caller-set lifecycle hint, not derived from the diff): protection is a
/// safety rail the diff/propagation stages must not silently override.
pub fn check_delete_consistency(graph: &Graph) -> Result<()> {
    for node in graph.nodes() {
        if !matches!(node.plan().operation(), Some(Operation::Delete { .. })) {
            continue;
        }

        if node.protect() {
            return Err(Error::ProtectedDelete(node.id().clone()));
        }

        for in_ref in node.in_refs() {
            if graph.is_tombstoned(&in_ref.from) {
                continue;
            }

            let referrer_is_deleting = graph
                .get(&in_ref.from)
                .is_some_and(|referrer| matches!(referrer.plan().operation(), Some(Operation::Delete { .. })));

            if !referrer_is_deleting {
                return Err(Error::DanglingReferenceOnDelete { deleted: node.id().clone(), referrer: in_ref.from.clone() });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use rgraph_graph::{GraphBuilder, NodeBuilder, NodeState};
    use rgraph_path::{FieldTraits, Path, TypeShape};
    use rgraph_resource::{ApiDomain, Payload, Resource, ResourceID, ResourceKey, Variant};
    use serde::{Deserialize, Serialize};

    use super::*;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Linked {
        name: String,
        target: String,
        #[serde(default)]
        null_fields: Vec<String>,
        #[serde(default)]
        force_send_fields: Vec<String>,
    }

    impl Payload for Linked {
        fn shape() -> TypeShape {
            TypeShape::Struct(vec![("name".into(), TypeShape::Str), ("target".into(), TypeShape::Str)])
        }
        fn field_traits() -> FieldTraits {
            FieldTraits::new().with_ref(Path::field("target"))
        }
        fn null_fields(&self) -> &[String] {
            &self.null_fields
        }
        fn null_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.null_fields
        }
        fn force_send_fields(&self) -> &[String] {
            &self.force_send_fields
        }
        fn force_send_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.force_send_fields
        }
    }

    fn id(name: &str) -> ResourceID {
        ResourceID::new("proj", "compute", "linked", ResourceKey::Global(name.into()))
    }

    fn graph_with_route(bs_plan: Operation, route_plan: Operation) -> Graph {
        let bs_link = id("bs").self_link(Variant::Ga, ApiDomain::Default);
        let mut builder = GraphBuilder::new();

        let mut bs = NodeBuilder::new(id("bs"));
        bs.set_state(NodeState::Exists);
        bs.set_resource(Resource::<Linked, Linked, Linked>::new(id("bs"), Linked { name: "bs".into(), ..Default::default() }).unwrap().freeze().unwrap());
        builder.add(bs).unwrap();

        let mut route = NodeBuilder::new(id("route"));
        route.set_state(NodeState::Exists);
        route.set_resource(
            Resource::<Linked, Linked, Linked>::new(id("route"), Linked { name: "route".into(), target: bs_link }).unwrap().freeze().unwrap(),
        );
        builder.add(route).unwrap();

        let mut graph = builder.build().unwrap();
        graph.get_mut(&id("bs")).unwrap().plan_mut().set(bs_plan);
        graph.get_mut(&id("route")).unwrap().plan_mut().set(route_plan);
        graph
    }

    #[test]
    fn deleting_a_node_whose_referrer_also_deletes_is_fine() {
        let graph = graph_with_route(
            Operation::Delete { why: "wanted absent".into() },
            Operation::Delete { why: "wanted absent".into() },
        );
        check_delete_consistency(&graph).unwrap();
    }

    #[test]
    fn deleting_a_node_whose_referrer_survives_is_dangling() {
        let graph = graph_with_route(
            Operation::Delete { why: "wanted absent".into() },
            Operation::Nothing { why: "want and got agree".into() },
        );
        let err = check_delete_consistency(&graph).unwrap_err();
        assert!(matches!(err, Error::DanglingReferenceOnDelete { .. }));
    }

    #[test]
    fn deleting_a_protected_node_is_rejected_even_with_no_referrers() {
        let mut builder = GraphBuilder::new();
        let mut bs = NodeBuilder::new(id("bs"));
        bs.set_state(NodeState::Exists);
        bs.set_protect(true);
        bs.set_resource(Resource::<Linked, Linked, Linked>::new(id("bs"), Linked { name: "bs".into(), ..Default::default() }).unwrap().freeze().unwrap());
        builder.add(bs).unwrap();
        let mut graph = builder.build().unwrap();
        graph.get_mut(&id("bs")).unwrap().plan_mut().set(Operation::Delete { why: "wanted absent".into() });

        let err = check_delete_consistency(&graph).unwrap_err();
        assert!(matches!(err, Error::ProtectedDelete(_)));
    }
}
