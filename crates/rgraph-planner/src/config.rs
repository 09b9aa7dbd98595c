//! Planner-wide configuration (ambient, not part of spec.md's distilled
//! scope): knobs the caller sets once and threads through every planning
//! pass, as a plain `Default`-able struct rather than a growing parameter
//! list.

/// Configuration for [`crate::plan`]/[`crate::plan_locally`].
#[derive(Debug, Clone, Copy)]
pub struct PlannerConfig {
    /// Whether a `Managed` want node against an `External` got node is a
    /// hard [`crate::Error::OwnershipConflict`] (the default, matching
    /// spec §3's ownership invariant), or is instead downgraded to a
    /// `Nothing` plan for that node — useful for callers importing existing
    /// infrastructure incrementally, where an ownership mismatch should be
    /// surfaced later (e.g. via [`rgraph_graph::PlanSummary`]) rather than
    /// abort planning outright.
    pub strict_ownership: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self { strict_ownership: true }
    }
}

impl PlannerConfig {
    /// The default, strict configuration.
    #[must_use]
    pub fn strict() -> Self {
        Self::default()
    }

    /// A configuration that downgrades ownership conflicts to a `Nothing`
    /// plan instead of erroring.
    #[must_use]
    pub fn lenient() -> Self {
        Self { strict_ownership: false }
    }
}
