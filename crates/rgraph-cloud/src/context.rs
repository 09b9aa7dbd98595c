//! The ambient per-invocation context threaded through planning and
//! execution (spec §6). Credential acquisition, rate limiting, and deadlines
//! are explicitly out of scope (spec §1) — this only carries the
//! correlation id an [`crate::Observer`] and a `CloudClient` implementation
//! might want to log against.

/// Ambient context passed to every cloud call and observer hook.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// An implementation-defined correlation id for this reconcile run.
    pub trace_id: Option<String>,
}

impl Context {
    /// A context carrying no correlation id.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A context carrying `trace_id`.
    #[must_use]
    pub fn with_trace_id(trace_id: impl Into<String>) -> Self {
        Self { trace_id: Some(trace_id.into()) }
    }
}
