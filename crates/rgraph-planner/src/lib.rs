//! Turns a want graph and a fetched got graph into a fully planned want
//! graph (spec §4.6-§4.8): per-node diff classification, recreate
//! propagation to dependents, and a final delete-consistency check.

mod config;
mod error;
mod local;
mod propagate;
mod sanity;

pub use config::PlannerConfig;
pub use error::{Error, Result};
pub use local::{plan_locally, plan_locally_with_config};
pub use propagate::propagate_recreates;
pub use sanity::check_delete_consistency;

use rgraph_graph::Graph;

/// Run the full planning pipeline with the default (strict) [`PlannerConfig`]:
/// local plan, then recreate propagation, then the delete-consistency
/// sanity check.
pub fn plan(want: &mut Graph, got: &Graph) -> Result<()> {
    plan_with_config(want, got, &PlannerConfig::default())
}

/// Run the full planning pipeline with an explicit [`PlannerConfig`].
pub fn plan_with_config(want: &mut Graph, got: &Graph, config: &PlannerConfig) -> Result<()> {
    plan_locally_with_config(want, got, config)?;
    propagate_recreates(want)?;
    check_delete_consistency(want)?;
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
        load_balancing_scheme: String,
        target: String,
        #[serde(default)]
        null_fields: Vec<String>,
        #[serde(default)]
        force_send_fields: Vec<String>,
    }

    impl Payload for Linked {
        fn shape() -> TypeShape {
            TypeShape::Struct(vec![
                ("name".into(), TypeShape::Str),
                ("load_balancing_scheme".into(), TypeShape::Str),
                ("target".into(), TypeShape::Str),
            ])
        }
        fn field_traits() -> FieldTraits {
            FieldTraits::new()
                .with(Path::field("load_balancing_scheme"), rgraph_path::FieldType::Immutable)
                .with_ref(Path::field("target"))
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

    fn build_graph(bs: Linked, route_target: &str) -> Graph {
        let mut builder = GraphBuilder::new();

        let mut bs_node = NodeBuilder::new(id("bs"));
        bs_node.set_state(NodeState::Exists);
        bs_node.set_resource(Resource::<Linked, Linked, Linked>::new(id("bs"), bs).unwrap().freeze().unwrap());
        builder.add(bs_node).unwrap();

        let mut route_node = NodeBuilder::new(id("route"));
        route_node.set_state(NodeState::Exists);
        route_node.set_resource(
            Resource::<Linked, Linked, Linked>::new(id("route"), Linked { name: "route".into(), target: route_target.into(), ..Default::default() })
                .unwrap()
                .freeze()
                .unwrap(),
        );
        builder.add(route_node).unwrap();

        builder.build().unwrap()
    }

    #[test]
    fn an_immutable_change_propagates_through_the_full_pipeline() {
        let bs_link = id("bs").self_link(Variant::Ga, ApiDomain::Default);

        let mut want = build_graph(
            Linked { name: "bs".into(), load_balancing_scheme: "INTERNAL_MANAGED".into(), ..Default::default() },
            &bs_link,
        );
        let got = build_graph(
            Linked { name: "bs".into(), load_balancing_scheme: "INTERNAL_SELF_MANAGED".into(), ..Default::default() },
            &bs_link,
        );

        plan(&mut want, &got).unwrap();

        assert_eq!(want.get(&id("bs")).unwrap().plan().operation().unwrap().kind(), "Recreate");
        assert_eq!(want.get(&id("route")).unwrap().plan().operation().unwrap().kind(), "Recreate");
    }
}
