//! The transitive-closure BFS itself (spec §4.5): starting from a seed
//! builder graph, fetch each node's cloud state, discover neighbors via its
//! out-refs, and enqueue them until the frontier is empty.

use std::collections::VecDeque;

use rgraph_cloud::{CallContextKey, CloudClient, Context, Observer};
use rgraph_graph::{Graph, GraphBuilder, NodeBuilder, NodeState, Ownership};
use rgraph_resource::ResourceID;

use crate::error::{ClosureFailure, Result};
use crate::registry::Registry;

/// Decides the ownership of a newly discovered neighbor node (spec §4.5:
/// "ownership marked per the caller's `on_get` hook, default `Managed`").
pub trait OnGetHook: Send + Sync {
    /// The ownership to assign a node discovered by reference, not present
    /// in the seed graph.
    fn ownership_for(&self, id: &ResourceID) -> Ownership;
}

/// The default hook: every discovered neighbor is `Managed`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultOnGet;

impl OnGetHook for DefaultOnGet {
    fn ownership_for(&self, _id: &ResourceID) -> Ownership {
        Ownership::Managed
    }
}

/// Run the transitive closure: fetch cloud state for every seed node, then
/// for every newly referenced node not yet present, until the queue empties.
///
/// Per-node fetch failures are collected in the returned `Vec<ClosureFailure>`
/// rather than aborting the pass; a not-found result is not a failure, it
/// sets the node's state to `DoesNotExist`.
pub async fn compute_transitive_closure(
    mut builder: GraphBuilder,
    client: &dyn CloudClient,
    registry: &Registry,
    ctx: &Context,
    observer: &dyn Observer,
    on_get: &dyn OnGetHook,
) -> Result<(Graph, Vec<ClosureFailure>)> {
    let mut queue: VecDeque<ResourceID> = builder.ids().cloned().collect();
    let mut visited = std::collections::HashSet::new();
    let mut failures = Vec::new();

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id.clone()) {
            continue;
        }

        let Some(adapter) = registry.get(&id.resource).cloned() else {
            failures.push(ClosureFailure { id: id.clone(), message: format!("no resource adapter registered for kind '{}'", id.resource) });
            continue;
        };

        let key = CallContextKey {
            project: id.project.clone(),
            operation: "get",
            version: rgraph_resource::Variant::Ga,
            service: id.api_group.clone(),
            resource_key: id.clone(),
        };
        observer.start(ctx, &key);
        let fetched = adapter.fetch(ctx, client, &id).await;
        observer.end(ctx, &key, None);

        let Some(node) = builder.get_mut(&id) else {
            tracing::warn!(id = ?id, "closure queued an id that is no longer in the builder graph");
            continue;
        };

        match fetched {
            Ok(Some(resource)) => {
                let out_refs = resource.out_refs(&id);
                node.set_state(NodeState::Exists);
                node.set_resource_arc(resource);

                for out_ref in out_refs {
                    if !builder.contains(&out_ref.to) {
                        let mut neighbor = NodeBuilder::new(out_ref.to.clone());
                        neighbor.set_ownership(on_get.ownership_for(&out_ref.to));
                        // Ignore the error: `contains` above already proved
                        // this id is new, so `add` cannot fail.
                        let _ = builder.add(neighbor);
                    }
                    queue.push_back(out_ref.to.clone());
                }
            }
            Ok(None) => {
                node.set_state(NodeState::DoesNotExist);
            }
            Err(message) => {
                failures.push(ClosureFailure { id: id.clone(), message });
            }
        }
    }

    let graph = builder.build()?;
    Ok((graph, failures))
}
