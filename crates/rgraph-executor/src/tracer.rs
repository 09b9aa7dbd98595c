//! The executor's per-action tracer hook (spec §4.10: "Optional tracer:
//! receive each action start/end for visualization").

use rgraph_compiler::Action;

/// Receives a start/end callback around every action the executor runs,
/// independent of the [`rgraph_cloud::Observer`] hook around the cloud call
/// itself (an action may run zero cloud calls, e.g. `ActionBody::Event`).
pub trait Tracer: Send + Sync {
    /// `action` has just transitioned `Ready -> Running`.
    fn action_started(&self, action: &Action);

    /// `action` finished, successfully (`error = None`) or not.
    fn action_finished(&self, action: &Action, error: Option<&str>);
}

/// A [`Tracer`] that does nothing, for callers with no visualization needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTracer;

impl Tracer for NullTracer {
    fn action_started(&self, _action: &Action) {}
    fn action_finished(&self, _action: &Action, _error: Option<&str>) {}
}

/// A [`Tracer`] that logs start/end via `tracing`, in the same register the
/// rest of the engine uses for call-site instrumentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTracer;

impl Tracer for TracingTracer {
    fn action_started(&self, action: &Action) {
        tracing::debug!(action = action.name(), "action started");
    }

    fn action_finished(&self, action: &Action, error: Option<&str>) {
        match error {
            Some(error) => tracing::warn!(action = action.name(), error, "action failed"),
            None => tracing::debug!(action = action.name(), "action finished"),
        }
    }
}
