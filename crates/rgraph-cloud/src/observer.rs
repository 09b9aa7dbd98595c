//! Per-cloud-call tracing hooks (spec §6 Observer contract).

use rgraph_resource::{ResourceID, Variant};

use crate::error::CloudError;

/// The identifying context for one cloud call, passed to both
/// [`Observer::start`] and [`Observer::end`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContextKey {
    /// The project the call is scoped to.
    pub project: String,
    /// The CRUD operation (`"get"`, `"insert"`, `"update"`, `"delete"`,
    /// `"list"`).
    pub operation: &'static str,
    /// The API variant the call targeted.
    pub version: Variant,
    /// The API group/service (e.g. `"compute"`).
    pub service: String,
    /// The resource identity the call concerned.
    pub resource_key: ResourceID,
}

/// Receives a start/end event around every cloud call the executor and
/// transitive-closure pass make.
pub trait Observer: Send + Sync {
    /// A cloud call is about to begin.
    fn start(&self, ctx: &crate::Context, key: &CallContextKey);

    /// A cloud call finished, successfully or not.
    fn end(&self, ctx: &crate::Context, key: &CallContextKey, error: Option<&CloudError>);
}

/// An [`Observer`] that does nothing, for callers with no tracing needs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl Observer for NullObserver {
    fn start(&self, _ctx: &crate::Context, _key: &CallContextKey) {}
    fn end(&self, _ctx: &crate::Context, _key: &CallContextKey, _error: Option<&CloudError>) {}
}

/// An [`Observer`] that logs start/end via `tracing`, in the same register
/// the rest of the engine uses for call-site instrumentation.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn start(&self, _ctx: &crate::Context, key: &CallContextKey) {
        tracing::debug!(
            project = %key.project,
            operation = key.operation,
            version = ?key.version,
            service = %key.service,
            resource = ?key.resource_key,
            "cloud call started"
        );
    }

    fn end(&self, _ctx: &crate::Context, key: &CallContextKey, error: Option<&CloudError>) {
        match error {
            Some(err) => tracing::warn!(
                project = %key.project,
                operation = key.operation,
                resource = ?key.resource_key,
                error = %err,
                "cloud call failed"
            ),
            None => tracing::debug!(
                project = %key.project,
                operation = key.operation,
                resource = ?key.resource_key,
                "cloud call finished"
            ),
        }
    }
}
