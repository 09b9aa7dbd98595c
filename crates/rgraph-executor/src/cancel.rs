//! The executor's cancellation handle (spec §5 "Cancellation"): no new
//! actions are started once cancelled, in-flight actions run to completion
//! (cloud calls cannot be safely interrupted mid-flight), and the final
//! report carries whatever remains pending.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A cheaply cloneable handle a caller can use to request cancellation of
/// an in-progress [`crate::Executor::run`].
#[derive(Debug, Clone, Default)]
pub struct CancellationHandle(Arc<AtomicBool>);

impl CancellationHandle {
    /// A fresh, not-yet-cancelled handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
