//! The action compiler (spec §4.9): turns a fully planned want graph into a
//! flat list of [`Action`]s wired together by [`Event`] pre/postconditions,
//! which the executor schedules into a dependency order.

use rgraph_graph::{ErasedResource, FingerprintStatus, Graph, Node, NodeState, Operation};
use rgraph_resource::ResourceID;
use serde_json::Value;

use crate::action::{Action, ActionBody, Event};
use crate::error::{Error, Result};

/// Compile every node's plan in `want` into one or two actions, reading
/// fingerprints for `Update` actions from `got` (spec §4.9: "the fingerprint
/// read from the got-node"). Actions are returned in unspecified order; the
/// executor, not the compiler, establishes run order from the
/// pre/postcondition event graph.
pub fn compile(want: &Graph, got: &Graph) -> Result<Vec<Action>> {
    let mut actions = Vec::new();

    for node in want.nodes() {
        let Some(operation) = node.plan().operation() else {
            return Err(Error::NotPlanned(node.id().clone()));
        };

        match operation {
            Operation::Nothing { .. } => match node.state() {
                NodeState::Exists => {
                    let event = Event::Exists(node.id().clone());
                    let preconditions = out_ref_exists_preconditions(node);
                    actions.push(Action::new(ActionBody::Event { event: event.clone() }, preconditions, event));
                }
                NodeState::DoesNotExist => {
                    let event = Event::Deleted(node.id().clone());
                    let preconditions = in_ref_deleted_preconditions(node);
                    actions.push(Action::new(ActionBody::Event { event: event.clone() }, preconditions, event));
                }
            },

            Operation::Create { .. } => {
                let id = node.id().clone();
                let payload = want_payload(node, &id)?;
                let preconditions = out_ref_exists_preconditions(node);
                actions.push(Action::new(ActionBody::Create { id: id.clone(), payload }, preconditions, Event::Exists(id)));
            }

            Operation::Update { .. } => {
                let id = node.id().clone();
                let payload = want_payload(node, &id)?;
                let fingerprint = got_fingerprint(got.get(&id), &id)?;
                let preconditions = out_ref_exists_preconditions(node);
                actions.push(Action::new(ActionBody::Update { id: id.clone(), payload, fingerprint }, preconditions, Event::Exists(id)));
            }

            Operation::Delete { .. } => {
                let id = node.id().clone();
                let preconditions = in_ref_deleted_preconditions(node);
                actions.push(Action::new(ActionBody::Delete { id: id.clone() }, preconditions, Event::Deleted(id)));
            }

            Operation::Recreate { .. } => {
                let id = node.id().clone();
                let payload = want_payload(node, &id)?;

                let delete_preconditions = in_ref_deleted_preconditions(node);
                actions.push(Action::new(ActionBody::Delete { id: id.clone() }, delete_preconditions, Event::Deleted(id.clone())));

                let mut create_preconditions = out_ref_exists_preconditions(node);
                create_preconditions.push(Event::Deleted(id.clone()));
                actions.push(Action::new(ActionBody::Create { id: id.clone(), payload }, create_preconditions, Event::Exists(id)));
            }
        }
    }

    Ok(actions)
}

fn out_ref_exists_preconditions(node: &Node) -> Vec<Event> {
    node.out_refs().iter().map(|r| Event::Exists(r.to.clone())).collect()
}

fn in_ref_deleted_preconditions(node: &Node) -> Vec<Event> {
    node.in_refs().iter().map(|r| Event::Deleted(r.from.clone())).collect()
}

fn want_payload(node: &Node, id: &ResourceID) -> Result<Value> {
    node.resource().and_then(ErasedResource::ga_value).ok_or_else(|| Error::MissingPayload(id.clone()))
}

fn got_fingerprint(got_node: Option<&Node>, id: &ResourceID) -> Result<Option<String>> {
    match got_node.and_then(Node::resource).map(ErasedResource::fingerprint) {
        None | Some(FingerprintStatus::NotUsed) => Ok(None),
        Some(FingerprintStatus::Present(fingerprint)) => Ok(Some(fingerprint)),
        Some(FingerprintStatus::Missing) => Err(Error::MissingFingerprint(id.clone())),
    }
}
