//! The per-node plan slot (spec §3 `Node.plan`, §4.6-§4.8).
//!
//! `rgraph-graph` only defines the *shape* of a plan; deciding what goes in
//! it is `rgraph-planner`'s job. Keeping the type here (rather than in the
//! planner crate) lets [`crate::Node`] hold a plan without the graph crate
//! depending back on the planner.

use rgraph_diff::DiffResult;

/// The chosen operation for a node, with a human-readable rationale and,
/// where relevant, the diff that produced it.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Want and got already agree; nothing to do.
    Nothing {
        /// Why this decision was reached.
        why: String,
    },
    /// The resource does not exist in got and must be created.
    Create {
        /// Why this decision was reached.
        why: String,
    },
    /// The resource exists in both and can be updated in place.
    Update {
        /// Why this decision was reached.
        why: String,
        /// The diff that justified an in-place update.
        diff: DiffResult,
    },
    /// The resource must be deleted and recreated.
    Recreate {
        /// Why this decision was reached.
        why: String,
        /// The diff that justified recreation, if any (propagated
        /// recreates from a dependency carry no local diff).
        diff: Option<DiffResult>,
    },
    /// The resource exists in got but must not exist per want.
    Delete {
        /// Why this decision was reached.
        why: String,
    },
}

impl Operation {
    /// A short, stable tag for this operation's kind, used in logs and
    /// deterministic action naming.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Nothing { .. } => "Nothing",
            Self::Create { .. } => "Create",
            Self::Update { .. } => "Update",
            Self::Recreate { .. } => "Recreate",
            Self::Delete { .. } => "Delete",
        }
    }

    /// The rationale recorded for this operation.
    #[must_use]
    pub fn why(&self) -> &str {
        match self {
            Self::Nothing { why } | Self::Create { why } | Self::Update { why, .. } | Self::Recreate { why, .. } | Self::Delete { why } => why,
        }
    }
}

/// A node's plan slot: empty until the planner visits it.
#[derive(Debug, Clone, Default)]
pub struct PlanSlot(Option<Operation>);

impl PlanSlot {
    /// An empty (unplanned) slot.
    #[must_use]
    pub fn empty() -> Self {
        Self(None)
    }

    /// The recorded operation, if the planner has visited this node.
    #[must_use]
    pub fn operation(&self) -> Option<&Operation> {
        self.0.as_ref()
    }

    /// Record (or overwrite, e.g. during recreate propagation) this node's
    /// operation.
    pub fn set(&mut self, operation: Operation) {
        self.0 = Some(operation);
    }
}
