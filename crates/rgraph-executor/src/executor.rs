//! The `Pending -> Ready -> Running -> {Completed, Errored}` action state
//! machine (spec §4.10), run serially or with bounded parallelism.
//!
//! Rather than the Go source's channel-per-event pattern, the whole engine
//! is one explicit `events` set the scheduler loop owns outright (spec §9
//! "Event loop in the executor"): an action is `Ready` exactly when every
//! event in its `preconditions()` is already in that set. This keeps the
//! serial and bounded-parallel variants a single loop, parameterized only
//! by how many `Running` futures are allowed in flight at once.

use std::collections::HashSet;

use futures::stream::FuturesUnordered;
use futures::StreamExt;
use rgraph_cloud::{CallContextKey, CloudClient, CloudError, CloudResult, Context, Observer};
use rgraph_compiler::{Action, ActionBody, Event};
use rgraph_resource::{ResourceID, Variant};

use crate::cancel::CancellationHandle;
use crate::report::ExecutionReport;
use crate::tracer::Tracer;

/// How the executor should run a compiled action list.
#[derive(Debug, Clone, Copy)]
pub struct ExecutorConfig {
    /// How many actions may be `Running` at once. `1` is the serial
    /// executor; any larger bound is the parallel executor (spec §4.10).
    pub max_parallel: usize,
    /// Skip every cloud call and emit each action's postcondition
    /// immediately (spec §4.10 "Optional DryRun flag").
    pub dry_run: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self::serial()
    }
}

impl ExecutorConfig {
    /// Run one action at a time.
    #[must_use]
    pub fn serial() -> Self {
        Self { max_parallel: 1, dry_run: false }
    }

    /// Run up to `max_parallel` actions concurrently. `0` is treated as `1`.
    #[must_use]
    pub fn parallel(max_parallel: usize) -> Self {
        Self { max_parallel: max_parallel.max(1), dry_run: false }
    }

    /// Same config, but never calling out to the cloud.
    #[must_use]
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }
}

/// Runs a compiled action list against a [`CloudClient`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Executor {
    config: ExecutorConfig,
}

impl Executor {
    /// A new executor configured as `config`.
    #[must_use]
    pub fn new(config: ExecutorConfig) -> Self {
        Self { config }
    }

    /// Run `actions` to completion: repeatedly promote every action whose
    /// preconditions are already satisfied to `Running`, up to
    /// `config.max_parallel` concurrently, until no action is `Ready` and
    /// none is `Running` (spec §4.10 "Termination").
    pub async fn run(
        &self,
        actions: Vec<Action>,
        client: &dyn CloudClient,
        observer: &dyn Observer,
        ctx: &Context,
        tracer: Option<&dyn Tracer>,
        cancel: &CancellationHandle,
    ) -> ExecutionReport {
        let mut events: HashSet<Event> = HashSet::new();
        let mut remaining = actions;
        let mut completed = Vec::new();
        let mut errors = Vec::new();
        let mut running = FuturesUnordered::new();

        loop {
            if !cancel.is_cancelled() {
                while running.len() < self.config.max_parallel {
                    let Some(pos) = next_ready(&remaining, &events) else { break };
                    let action = remaining.remove(pos);
                    if let Some(tracer) = tracer {
                        tracer.action_started(&action);
                    }
                    running.push(run_one(action, client, observer, ctx, self.config.dry_run));
                }
            }

            let Some((name, outcome)) = running.next().await else {
                // Nothing running and (because of the check above) nothing
                // newly promotable either: either done, cancelled with
                // nothing in flight, or genuinely deadlocked.
                break;
            };

            match outcome {
                Ok((action, postcondition)) => {
                    if let Some(tracer) = tracer {
                        tracer.action_finished(&action, None);
                    }
                    events.insert(postcondition);
                    // A plain `Event` action carries no cloud call of its own
                    // (spec §4.9: it exists only to give a Nothing-planned
                    // node's dependents something to wait on) — it isn't
                    // "completed work", so a reconcile that is a pure no-op
                    // reports an empty `completed` list.
                    if !matches!(action.body(), ActionBody::Event { .. }) {
                        completed.push(name);
                    }
                }
                Err((action, error)) => {
                    if let Some(tracer) = tracer {
                        tracer.action_finished(&action, Some(&error.to_string()));
                    }
                    errors.push((name, error));
                    // Dependents never see this action's postcondition, so
                    // they simply never become Ready; they surface in
                    // `pending` at termination.
                }
            }
        }

        let pending = remaining.into_iter().map(|a| a.name().to_string()).collect();
        ExecutionReport { completed, pending, errors }
    }
}

/// The position in `remaining` of the lexicographically first action (by
/// name) whose preconditions are already satisfied — a stable tie-break
/// across otherwise-independent actions (spec §4.10: "deterministic up to a
/// stable tie-break on action name").
fn next_ready(remaining: &[Action], events: &HashSet<Event>) -> Option<usize> {
    remaining
        .iter()
        .enumerate()
        .filter(|(_, action)| action.preconditions().iter().all(|event| events.contains(event)))
        .min_by_key(|(_, action)| action.name().to_string())
        .map(|(pos, _)| pos)
}

type ActionOutcome = (String, Result<(Action, Event), (Action, CloudError)>);

async fn run_one(action: Action, client: &dyn CloudClient, observer: &dyn Observer, ctx: &Context, dry_run: bool) -> ActionOutcome {
    let name = action.name().to_string();

    if dry_run {
        let postcondition = action.postcondition().clone();
        return (name, Ok((action, postcondition)));
    }

    let result: CloudResult<()> = match action.body() {
        ActionBody::Create { id, payload } => {
            call(observer, ctx, id, "insert", client.insert(ctx, id, Variant::Ga, payload.clone())).await
        }
        ActionBody::Update { id, payload, fingerprint } => {
            call(observer, ctx, id, "update", client.update(ctx, id, Variant::Ga, payload.clone(), fingerprint.as_deref())).await
        }
        ActionBody::Delete { id } => call(observer, ctx, id, "delete", client.delete(ctx, id, Variant::Ga)).await,
        ActionBody::Event { .. } => Ok(()),
    };

    match result {
        Ok(()) => {
            let postcondition = action.postcondition().clone();
            (name, Ok((action, postcondition)))
        }
        Err(error) => (name, Err((action, error))),
    }
}

/// Wrap one cloud call with the observer start/end hooks (spec §6).
async fn call<F>(observer: &dyn Observer, ctx: &Context, id: &ResourceID, operation: &'static str, fut: F) -> CloudResult<()>
where
    F: std::future::Future<Output = CloudResult<()>>,
{
    let key = CallContextKey { project: id.project.clone(), operation, version: Variant::Ga, service: id.api_group.clone(), resource_key: id.clone() };
    observer.start(ctx, &key);
    let result = fut.await;
    observer.end(ctx, &key, result.as_ref().err());
    result
}
