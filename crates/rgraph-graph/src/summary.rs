//! A human-readable report of a planned graph: counts per operation kind
//! plus the rationale recorded for each node (the ambient "what will happen"
//! output every reconciler in this space provides before executing).

use std::collections::BTreeMap;
use std::fmt;

use rgraph_resource::ResourceID;

use crate::graph::Graph;

/// One planned node's entry in a [`PlanSummary`].
#[derive(Debug, Clone)]
pub struct PlanSummaryEntry {
    /// The planned node's identity.
    pub id: ResourceID,
    /// The operation's short kind tag (`"Create"`, `"Update"`, ...).
    pub kind: &'static str,
    /// The rationale recorded for this operation.
    pub why: String,
}

/// A report over every planned node in a [`Graph`]: counts per operation
/// kind, and the per-node rationale, in id order for determinism.
#[derive(Debug, Clone, Default)]
pub struct PlanSummary {
    /// Number of nodes planned per operation kind.
    pub counts: BTreeMap<&'static str, usize>,
    /// One entry per planned node, sorted by id for stable output.
    pub entries: Vec<PlanSummaryEntry>,
}

impl PlanSummary {
    /// Summarize every planned node in `graph`. Nodes with an empty plan
    /// slot (never visited by the planner) are omitted.
    #[must_use]
    pub fn of(graph: &Graph) -> Self {
        let mut entries: Vec<_> = graph
            .nodes()
            .filter_map(|node| {
                let operation = node.plan().operation()?;
                Some(PlanSummaryEntry { id: node.id().clone(), kind: operation.kind(), why: operation.why().to_string() })
            })
            .collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));

        let mut counts = BTreeMap::new();
        for entry in &entries {
            *counts.entry(entry.kind).or_insert(0) += 1;
        }

        Self { counts, entries }
    }

    /// Total number of planned nodes across every kind.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for PlanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Plan: {} node(s)", self.total())?;
        for (kind, count) in &self.counts {
            writeln!(f, "  {kind}: {count}")?;
        }
        for entry in &self.entries {
            writeln!(f, "  {} {:?}: {}", entry.kind, entry.id, entry.why)?;
        }
        Ok(())
    }
}
