//! The end-to-end control flow (spec §2): want graph in, transitive
//! closure against the cloud, full planning pipeline, action compilation,
//! then execution.

use rgraph_cloud::{CloudClient, Context, Observer};
use rgraph_closure::{compute_transitive_closure, OnGetHook, Registry};
use rgraph_compiler::{compile, Action};
use rgraph_executor::{CancellationHandle, ExecutionReport, Executor, ExecutorConfig};
use rgraph_graph::{Graph, PlanSummary};
use rgraph_planner::PlannerConfig;

use crate::error::{Error, Result};

/// The outcome of a full [`reconcile`] run: the plan that was decided, the
/// action list it compiled to, and what happened when the executor ran it.
#[derive(Debug)]
pub struct ReconcileReport {
    /// Counts and per-node rationale for the plan `want` ended up with.
    pub plan_summary: PlanSummary,
    /// The compiled action DAG, in the order the compiler emitted it (not
    /// necessarily execution order, which the executor's readiness
    /// scheduling determines).
    pub action_graph: Vec<Action>,
    /// What the executor did with [`Self::action_graph`].
    pub execution_result: ExecutionReport,
}

/// Reconcile `want` against the cloud's current state and return the full
/// outcome: the decided plan, the compiled actions, and the execution
/// result.
///
/// This drives every stage spec §2 lists in order: build an empty `got`
/// builder from `want`'s identities, fill it in via [`compute_transitive_closure`],
/// run the full planning pipeline over `want`, compile the planned graph to
/// an action list, and execute it.
///
/// A non-empty closure failure list aborts before planning (spec §4.5's
/// per-node tolerance stops at the closure stage; reconciling against a
/// `got` graph known to be incomplete would make every downstream diff
/// unreliable).
#[allow(clippy::too_many_arguments)]
pub async fn reconcile(
    mut want: Graph,
    client: &dyn CloudClient,
    registry: &Registry,
    ctx: &Context,
    observer: &dyn Observer,
    on_get: &dyn OnGetHook,
    planner_config: &PlannerConfig,
    executor_config: ExecutorConfig,
    cancel: &CancellationHandle,
) -> Result<ReconcileReport> {
    let got_builder = want.new_builder_with_empty_nodes();
    let (got, failures) = compute_transitive_closure(got_builder, client, registry, ctx, observer, on_get).await?;
    if !failures.is_empty() {
        return Err(Error::ClosureFailures(failures));
    }

    rgraph_planner::plan_with_config(&mut want, &got, planner_config)?;
    let plan_summary = want.plan_summary();

    let action_graph = compile(&want, &got)?;

    let executor = Executor::new(executor_config);
    let execution_result = executor.run(action_graph.clone(), client, observer, ctx, None, cancel).await;

    Ok(ReconcileReport { plan_summary, action_graph, execution_result })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use rgraph_closure::{DefaultOnGet, TypedAdapter};
    use rgraph_cloud::{CloudError, CloudResult, ListScope, NullObserver};
    use rgraph_graph::{GraphBuilder, NodeBuilder, NodeState};
    use rgraph_path::{FieldTraits, TypeShape};
    use rgraph_resource::{Payload, Resource, ResourceID, ResourceKey, Variant};
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    use super::*;

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Bucket {
        name: String,
        storage_class: String,
        #[serde(default)]
        null_fields: Vec<String>,
        #[serde(default)]
        force_send_fields: Vec<String>,
    }

    impl Payload for Bucket {
        fn shape() -> TypeShape {
            TypeShape::Struct(vec![("name".into(), TypeShape::Str), ("storage_class".into(), TypeShape::Str)])
        }
        fn field_traits() -> FieldTraits {
            FieldTraits::new()
        }
        fn null_fields(&self) -> &[String] {
            &self.null_fields
        }
        fn null_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.null_fields
        }
        fn force_send_fields(&self) -> &[String] {
            &self.force_send_fields
        }
        fn force_send_fields_mut(&mut self) -> &mut Vec<String> {
            &mut self.force_send_fields
        }
    }

    fn id(name: &str) -> ResourceID {
        ResourceID::new("proj", "storage", "bucket", ResourceKey::Global(name.into()))
    }

    #[derive(Default)]
    struct FakeCloud {
        state: Mutex<HashMap<ResourceID, Value>>,
    }

    #[async_trait]
    impl CloudClient for FakeCloud {
        async fn get(&self, _ctx: &Context, id: &ResourceID, _variant: Variant) -> CloudResult<Value> {
            self.state.lock().unwrap().get(id).cloned().ok_or(CloudError::NotFound)
        }

        async fn insert(&self, _ctx: &Context, id: &ResourceID, _variant: Variant, payload: Value) -> CloudResult<()> {
            self.state.lock().unwrap().insert(id.clone(), payload);
            Ok(())
        }

        async fn update(&self, _ctx: &Context, id: &ResourceID, _variant: Variant, payload: Value, _fingerprint: Option<&str>) -> CloudResult<()> {
            self.state.lock().unwrap().insert(id.clone(), payload);
            Ok(())
        }

        async fn delete(&self, _ctx: &Context, id: &ResourceID, _variant: Variant) -> CloudResult<()> {
            self.state.lock().unwrap().remove(id);
            Ok(())
        }

        async fn list(&self, _ctx: &Context, _scope: ListScope, _filter: Option<&str>) -> CloudResult<Vec<Value>> {
            Ok(self.state.lock().unwrap().values().cloned().collect())
        }
    }

    fn want_graph(storage_class: &str) -> Graph {
        let mut builder = GraphBuilder::new();
        let mut bucket = NodeBuilder::new(id("b"));
        bucket.set_state(NodeState::Exists);
        bucket.set_resource(
            Resource::<Bucket, Bucket, Bucket>::new(id("b"), Bucket { name: "b".into(), storage_class: storage_class.into(), ..Default::default() })
                .unwrap()
                .freeze()
                .unwrap(),
        );
        builder.add(bucket).unwrap();
        builder.build().unwrap()
    }

    #[tokio::test]
    async fn reconcile_creates_a_bucket_that_does_not_exist_yet() {
        let cloud = FakeCloud::default();
        let registry = Registry::new().with("bucket", Arc::new(TypedAdapter::<Bucket, Bucket, Bucket>::new()));
        let ctx = Context::new();
        let cancel = CancellationHandle::new();

        let report = reconcile(
            want_graph("STANDARD"),
            &cloud,
            &registry,
            &ctx,
            &NullObserver,
            &DefaultOnGet,
            &PlannerConfig::default(),
            ExecutorConfig::serial(),
            &cancel,
        )
        .await
        .unwrap();

        assert!(report.execution_result.is_full_success());
        assert_eq!(report.plan_summary.counts.get("Create"), Some(&1));
        assert_eq!(report.action_graph.len(), report.execution_result.completed.len());
        assert!(cloud.state.lock().unwrap().contains_key(&id("b")));
    }

    #[tokio::test]
    async fn reconcile_is_a_no_op_when_want_already_matches_got() {
        let cloud = FakeCloud::default();
        cloud.state.lock().unwrap().insert(id("b"), serde_json::json!({"name": "b", "storage_class": "STANDARD"}));
        let registry = Registry::new().with("bucket", Arc::new(TypedAdapter::<Bucket, Bucket, Bucket>::new()));
        let ctx = Context::new();
        let cancel = CancellationHandle::new();

        let report = reconcile(
            want_graph("STANDARD"),
            &cloud,
            &registry,
            &ctx,
            &NullObserver,
            &DefaultOnGet,
            &PlannerConfig::default(),
            ExecutorConfig::serial(),
            &cancel,
        )
        .await
        .unwrap();

        assert!(report.execution_result.is_full_success());
        assert!(report.execution_result.completed.is_empty());
        assert_eq!(report.plan_summary.counts.get("Nothing"), Some(&1));
    }

    #[tokio::test]
    async fn reconcile_fails_fast_when_no_adapter_is_registered() {
        let cloud = FakeCloud::default();
        let registry = Registry::new();
        let ctx = Context::new();
        let cancel = CancellationHandle::new();

        let err = reconcile(
            want_graph("STANDARD"),
            &cloud,
            &registry,
            &ctx,
            &NullObserver,
            &DefaultOnGet,
            &PlannerConfig::default(),
            ExecutorConfig::serial(),
            &cancel,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, Error::ClosureFailures(_)));
    }
}
