//! Runs a compiled [`rgraph_compiler::Action`] list against a
//! [`rgraph_cloud::CloudClient`] (spec §4.10, §5): a `Pending -> Ready ->
//! Running -> {Completed, Errored}` state machine driven entirely by an
//! explicit precondition/postcondition `Event` set, serially or with
//! bounded parallelism, with optional dry-run and tracing hooks and a
//! cooperative cancellation handle.

mod cancel;
mod executor;
mod report;
mod tracer;

pub use cancel::CancellationHandle;
pub use executor::{Executor, ExecutorConfig};
pub use report::ExecutionReport;
pub use tracer::{NullTracer, Tracer, TracingTracer};
