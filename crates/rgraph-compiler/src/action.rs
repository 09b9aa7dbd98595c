//! The compiled action/event shapes (spec §4.9): what the executor actually
//! runs, and the facts it waits on and emits.

use rgraph_resource::ResourceID;
use serde_json::Value;

/// A fact the executor can gate on (a precondition) or emit (a
/// postcondition).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Event {
    /// `id` exists in the cloud.
    Exists(ResourceID),
    /// `id` no longer exists in the cloud.
    Deleted(ResourceID),
}

/// What a compiled action actually does when run.
#[derive(Debug, Clone)]
pub enum ActionBody {
    /// Call `insert` for `id`.
    Create {
        /// The resource to create.
        id: ResourceID,
        /// The GA payload read from `want` at compile time (spec §9: closed
        /// over here, not re-read at execute time).
        payload: Value,
    },
    /// Call `update` for `id`, closing over the fingerprint read at got-time.
    Update {
        /// The resource to update.
        id: ResourceID,
        /// The GA payload read from `want` at compile time.
        payload: Value,
        /// The optimistic-concurrency token read when the plan was
        /// compiled, if this resource kind uses one.
        fingerprint: Option<String>,
    },
    /// Call `delete` for `id`.
    Delete {
        /// The resource to delete.
        id: ResourceID,
    },
    /// No cloud call; simply confirms `event` once its preconditions hold
    /// (spec §4.9: the `Nothing` plan's `Event(Exists(id))` action).
    Event {
        /// The event this action confirms.
        event: Event,
    },
}

impl ActionBody {
    /// The deterministic, human-readable name spec §4.9 mandates for this
    /// action's metadata (`"GenericTypeAction(id)"` / `"EventAction(event)"`).
    #[must_use]
    pub fn name(&self) -> String {
        match self {
            Self::Create { id, .. } => format!("CreateAction({id:?})"),
            Self::Update { id, .. } => format!("UpdateAction({id:?})"),
            Self::Delete { id } => format!("DeleteAction({id:?})"),
            Self::Event { event } => format!("EventAction({event:?})"),
        }
    }
}

/// One compiled action: what to do, what must be true before it can run,
/// and what becomes true once it succeeds.
#[derive(Debug, Clone)]
pub struct Action {
    name: String,
    body: ActionBody,
    preconditions: Vec<Event>,
    postcondition: Event,
}

impl Action {
    pub(crate) fn new(body: ActionBody, preconditions: Vec<Event>, postcondition: Event) -> Self {
        Self { name: body.name(), body, preconditions, postcondition }
    }

    /// This action's deterministic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// What this action does.
    #[must_use]
    pub fn body(&self) -> &ActionBody {
        &self.body
    }

    /// The events that must hold before this action may run.
    #[must_use]
    pub fn preconditions(&self) -> &[Event] {
        &self.preconditions
    }

    /// The event this action emits once it completes successfully.
    #[must_use]
    pub fn postcondition(&self) -> &Event {
        &self.postcondition
    }
}
