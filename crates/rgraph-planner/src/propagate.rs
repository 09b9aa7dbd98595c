//! Recreate propagation (spec §4.7): every node planned `Recreate` forces
//! every node that transitively depends on it (via inbound references) to
//! recreate too, since its out-ref will momentarily point at a deleted id.

use std::collections::{HashSet, VecDeque};

use rgraph_graph::{Graph, Operation, Ownership};
use rgraph_resource::ResourceID;

use crate::error::{Error, Result};

/// Walk the inbound-reachable set of every `Recreate`-planned node and
/// rewrite `Nothing`/`Update` dependents to `Recreate`.
pub fn propagate_recreates(graph: &mut Graph) -> Result<()> {
    let seeds: Vec<ResourceID> = graph
        .nodes()
        .filter(|n| matches!(n.plan().operation(), Some(Operation::Recreate { .. })))
        .map(|n| n.id().clone())
        .collect();

    let mut visited: HashSet<ResourceID> = seeds.iter().cloned().collect();
    let mut queue: VecDeque<ResourceID> = VecDeque::new();
    for seed in &seeds {
        if let Some(node) = graph.get(seed) {
            queue.extend(node.in_refs().iter().map(|r| r.from.clone()));
        }
    }

    while let Some(id) = queue.pop_front() {
        if !visited.insert(id.clone()) {
            continue;
        }

        let Some(node) = graph.get(&id) else { continue };

        if node.ownership() == Ownership::External {
            return Err(Error::ExternalRecreateDependency(id));
        }

        let rewrite = match node.plan().operation() {
            Some(Operation::Create { .. } | Operation::Recreate { .. } | Operation::Delete { .. }) => None,
            Some(Operation::Nothing { .. }) => {
                Some(Operation::Recreate { why: format!("dependency {id:?} being recreated"), diff: None })
            }
            Some(Operation::Update { diff, .. }) => {
                Some(Operation::Recreate { why: format!("dependency {id:?} being recreated"), diff: Some(diff.clone()) })
            }
            None => return Err(Error::UnreconcilableRecreateDependency(id)),
        };

        let in_refs: Vec<ResourceID> = node.in_refs().iter().map(|r| r.from.clone()).collect();

        if let Some(operation) = rewrite {
            if let Some(node) = graph.get_mut(&id) {
                node.plan_mut().set(operation);
            }
        }

        queue.extend(in_refs);
    }

    Ok(())
}
