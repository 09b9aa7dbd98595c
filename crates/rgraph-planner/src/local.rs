//! The local planner (spec §4.6): per-node diff of want vs got, producing an
//! `Operation` with a rationale, independent of any other node's plan.

use rgraph_graph::{Graph, NodeState, Operation, Ownership};

use crate::config::PlannerConfig;
use crate::error::{Error, Result};

/// Plan every node in `want` against its counterpart (if any) in `got`,
/// writing the decision into each node's plan slot, using the default
/// (strict) [`PlannerConfig`]. See [`plan_locally_with_config`] to
/// customize ownership-conflict handling.
pub fn plan_locally(want: &mut Graph, got: &Graph) -> Result<()> {
    plan_locally_with_config(want, got, &PlannerConfig::default())
}

/// Plan every node in `want` against its counterpart (if any) in `got`,
/// writing the decision into each node's plan slot.
///
/// `got` is expected to have been produced by [`rgraph_closure::compute_transitive_closure`]
/// seeded from `want.new_builder_with_empty_nodes()`, so every id in `want`
/// either has a matching node in `got` or is genuinely absent from the cloud.
pub fn plan_locally_with_config(want: &mut Graph, got: &Graph, config: &PlannerConfig) -> Result<()> {
    let ids: Vec<_> = want.nodes().map(|n| n.id().clone()).collect();

    for id in ids {
        let Some(want_node) = want.get(&id) else { continue };
        let got_node = got.get(&id);

        if let Some(got_node) = got_node {
            if want_node.ownership() == Ownership::Managed && got_node.ownership() == Ownership::External {
                if config.strict_ownership {
                    return Err(Error::OwnershipConflict(id));
                }
                if let Some(node) = want.get_mut(&id) {
                    node.plan_mut().set(Operation::Nothing { why: "externally owned in got; ownership conflict ignored per lenient config".to_string() });
                }
                continue;
            }
        }

        let want_node = want.get(&id).expect("id was just read from want.nodes()");
        let want_state = want_node.state();
        let got_state = got_node.map_or(NodeState::DoesNotExist, rgraph_graph::Node::state);

        let operation = match (want_state, got_state) {
            (NodeState::DoesNotExist, NodeState::DoesNotExist) => {
                Operation::Nothing { why: "already absent in got".to_string() }
            }
            (NodeState::Exists, NodeState::DoesNotExist) => {
                Operation::Create { why: "not present in got".to_string() }
            }
            (NodeState::DoesNotExist, NodeState::Exists) => {
                Operation::Delete { why: "wanted absent but present in got".to_string() }
            }
            (NodeState::Exists, NodeState::Exists) => classify_existing(want_node, got_node)?,
        };

        if let Some(node) = want.get_mut(&id) {
            node.plan_mut().set(operation);
        }
    }

    Ok(())
}

fn classify_existing(want_node: &rgraph_graph::Node, got_node: Option<&rgraph_graph::Node>) -> Result<Operation> {
    let (Some(want_resource), Some(got_resource)) = (want_node.resource(), got_node.and_then(rgraph_graph::Node::resource)) else {
        return Ok(Operation::Nothing { why: "no attached resource on one side to diff".to_string() });
    };

    let diff = want_resource.diff(got_resource)?;
    if diff.is_empty() {
        return Ok(Operation::Nothing { why: "want and got agree".to_string() });
    }

    if want_resource.requires_recreate(&diff) {
        Ok(Operation::Recreate { why: "an immutable field changed".to_string(), diff: Some(diff) })
    } else {
        Ok(Operation::Update { why: "one or more fields differ".to_string(), diff })
    }
}
