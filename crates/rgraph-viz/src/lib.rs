//! Graphviz textual rendering of a resource graph and its plan (spec §6
//! "Graph visualization"): one node per resource labeled by its id, one
//! edge per out-ref labeled by the originating field path, node colors
//! keyed by the planned operation.

use std::fmt::Write as _;

use rgraph_graph::{Graph, Node, Operation};
use rgraph_resource::{ResourceID, ResourceKey};

/// Render `graph` as a Graphviz `digraph` description.
///
/// Node color follows the node's planned operation, if any (spec §6: "node
/// colors keyed by planned operation"); an unplanned node (e.g. a raw `got`
/// graph, which carries no plan) renders gray.
#[must_use]
pub fn render(graph: &Graph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "digraph rgraph {{");
    let _ = writeln!(out, "  rankdir=LR;");

    for node in graph.nodes() {
        let label = escape(&label_for(node.id()));
        let color = color_for(node);
        let _ = writeln!(out, "  \"{}\" [label=\"{label}\", style=filled, fillcolor=\"{color}\"];", node_key(node.id()));
    }

    for tombstone in graph.tombstones() {
        let label = escape(&label_for(tombstone));
        let _ = writeln!(out, "  \"{}\" [label=\"{label}\", style=filled, fillcolor=\"black\", fontcolor=\"white\"];", node_key(tombstone));
    }

    for node in graph.nodes() {
        for out_ref in node.out_refs() {
            let label = escape(&out_ref.path.to_string());
            let _ = writeln!(out, "  \"{}\" -> \"{}\" [label=\"{label}\"];", node_key(&out_ref.from), node_key(&out_ref.to));
        }
    }

    let _ = writeln!(out, "}}");
    out
}

fn node_key(id: &ResourceID) -> String {
    format!("{}/{}/{}", id.project, id.api_group, instance_key(id))
}

fn instance_key(id: &ResourceID) -> String {
    match &id.key {
        ResourceKey::Global(name) => format!("{}/{name}", id.resource),
        ResourceKey::Regional(name, region) => format!("{}/{region}/{name}", id.resource),
        ResourceKey::Zonal(name, zone) => format!("{}/{zone}/{name}", id.resource),
        ResourceKey::None => id.resource.clone(),
    }
}

fn label_for(id: &ResourceID) -> String {
    format!("{}\\n{}", id.resource, instance_key(id))
}

fn color_for(node: &Node) -> &'static str {
    match node.plan().operation() {
        None => "gray",
        Some(Operation::Nothing { .. }) => "lightgray",
        Some(Operation::Create { .. }) => "palegreen",
        Some(Operation::Update { .. }) => "khaki",
        Some(Operation::Recreate { .. }) => "orange",
        Some(Operation::Delete { .. }) => "lightcoral",
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use rgraph_graph::{GraphBuilder, NodeBuilder, NodeState, Operation};
    use rgraph_path::{FieldTraits, Path, TypeShape};
    use rgraph_resource::{ApiDomain, Payload, Resource, Variant};
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

    #[test]
    fn renders_a_node_per_resource_and_an_edge_per_out_ref() {
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
        graph.get_mut(&id("bs")).unwrap().plan_mut().set(Operation::Recreate { why: "immutable field changed".into(), diff: None });

        let dot = render(&graph);
        assert!(dot.starts_with("digraph rgraph {"));
        assert!(dot.contains("proj/compute/linked/bs"));
        assert!(dot.contains("proj/compute/linked/route"));
        assert!(dot.contains("fillcolor=\"orange\""));
        assert!(dot.contains("-> \"proj/compute/linked/bs\""));
        assert!(dot.contains("label=\".target\""));
    }

    #[test]
    fn an_unplanned_node_renders_gray() {
        let mut builder = GraphBuilder::new();
        builder.add(NodeBuilder::new(id("bs"))).unwrap();
        let graph = builder.build().unwrap();
        let dot = render(&graph);
        assert!(dot.contains("fillcolor=\"gray\""));
    }

    #[test]
    fn a_tombstone_renders_as_a_black_node_with_no_out_edges() {
        let mut builder = GraphBuilder::new();
        builder.add_tombstone(id("gone"));
        let graph = builder.build().unwrap();
        let dot = render(&graph);
        assert!(dot.contains("fillcolor=\"black\""));
    }
}
