//! The result of running a compiled action DAG (spec §4.10).

use rgraph_cloud::CloudError;

/// What happened to every action in a run.
///
/// Per spec §4.10: "Non-empty `pending` with non-empty `errors` means
/// partial failure; empty errors and empty pending means full success."
/// Non-empty `pending` with *empty* `errors` means the run was cancelled or
/// deadlocked before every action's preconditions could be satisfied.
#[derive(Debug, Default)]
pub struct ExecutionReport {
    /// Names of actions that ran to completion and did real cloud work — a
    /// plain `Event` action (no-op nodes, spec §4.9) is excluded even when it
    /// runs successfully, since it has none.
    pub completed: Vec<String>,
    /// Names of actions that never became `Ready` (their preconditions never
    /// held, because an upstream action errored, was cancelled ahead of it,
    /// or the dependency graph never satisfies them).
    pub pending: Vec<String>,
    /// Actions that ran and failed, with the error the cloud client
    /// returned.
    pub errors: Vec<(String, CloudError)>,
}

impl ExecutionReport {
    /// Every action completed and none failed.
    #[must_use]
    pub fn is_full_success(&self) -> bool {
        self.errors.is_empty() && self.pending.is_empty()
    }

    /// At least one action failed and at least one other never ran because
    /// of it.
    #[must_use]
    pub fn is_partial_failure(&self) -> bool {
        !self.errors.is_empty() && !self.pending.is_empty()
    }

    /// `pending` is non-empty but no action errored: cancellation or
    /// deadlock, not a cloud-side failure (spec §8 "Deadlock detection").
    #[must_use]
    pub fn is_stalled(&self) -> bool {
        !self.pending.is_empty() && self.errors.is_empty()
    }
}
