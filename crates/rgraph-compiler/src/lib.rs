//! Compiles a fully planned [`rgraph_graph::Graph`] into the flat action/event
//! list (spec §4.9) the executor schedules and runs.

mod action;
mod compile;
mod error;

pub use action::{Action, ActionBody, Event};
pub use compile::compile;
pub use error::{Error, Result};
