//! S5 (short-circuit on failure) and S6 (crashing action) driven through
//! the real `inn-engine` Pipeline Executor against the real built-in
//! actions and a registered crashing test action.

use inn_actions::test_support::FakeAction;
use inn_actions::{register_builtins, BUILTIN_INTEGRATION};
use inn_core::{ExecutionStatus, Integration, Pipeline, SequentialIdGen, Step, StepKind, Value};
use inn_engine::PipelineExecutor;
use inn_registry::IntegrationRegistry;

/// S5 — `[ map_fields -> http.request(url="ftp://bad") -> log ]`: exactly
/// two step results, the first a success, the second a failure whose
/// error contains `"Invalid URL"`; the third step never runs.
#[tokio::test]
async fn pipeline_short_circuits_on_step_failure() {
    let registry = IntegrationRegistry::new();
    register_builtins(&registry);
    let id_gen = SequentialIdGen::new("step");
    let steps = vec![
        Step::with_id_gen(
            &id_gen,
            "map",
            StepKind::Action,
            BUILTIN_INTEGRATION,
            "transform.map_fields",
            Value::from_pairs([("mapping", Value::from_pairs([("url", Value::from("target"))]))]),
            0,
        ),
        Step::with_id_gen(
            &id_gen,
            "request",
            StepKind::Action,
            BUILTIN_INTEGRATION,
            "http.request",
            Value::map(),
            1,
        ),
        Step::with_id_gen(&id_gen, "log", StepKind::Action, BUILTIN_INTEGRATION, "log.write", Value::map(), 2),
    ];
    let pipeline = Pipeline::new("short-circuit", Value::map(), steps, chrono::DateTime::UNIX_EPOCH);

    let executor = PipelineExecutor::new(registry, inn_core::FakeClock::default(), SequentialIdGen::new("exec"));
    let context = Value::from_pairs([("target", Value::from("ftp://bad"))]);
    let record = executor.execute(&pipeline, context).await;

    assert_eq!(record.status, ExecutionStatus::Failed);
    assert_eq!(record.results.len(), 2);
    assert!(record.results[0].is_success());
    let error = record.results[1].error().expect("second step should fail");
    assert!(error.contains("Invalid URL"), "unexpected error: {error}");
}

/// S6 — a single-step pipeline whose action panics still produces a
/// terminal `failed` record with a `"crashed"` error, and driving it does
/// not panic this test (the worker would remain ready for further work).
#[tokio::test]
async fn crashing_action_terminates_pipeline_without_propagating_panic() {
    let registry = IntegrationRegistry::new();
    let integration = Integration::new("test.integration", "test").with_action(inn_core::ActionDefinition {
        name: "divide".to_string(),
        description: "test".to_string(),
        executor: std::sync::Arc::new(FakeAction::crashing("divide by zero")),
        input_schema: Value::map(),
        output_schema: Value::map(),
    });
    registry.register(integration);

    let id_gen = SequentialIdGen::new("step");
    let steps = vec![Step::with_id_gen(
        &id_gen,
        "divide",
        StepKind::Action,
        "test.integration",
        "divide",
        Value::map(),
        0,
    )];
    let pipeline = Pipeline::new("crashing", Value::map(), steps, chrono::DateTime::UNIX_EPOCH);

    let executor = PipelineExecutor::new(registry, inn_core::FakeClock::default(), SequentialIdGen::new("exec"));
    let record = executor.execute(&pipeline, Value::map()).await;

    assert_eq!(record.status, ExecutionStatus::Failed);
    assert_eq!(record.results.len(), 1);
    let error = record.results[0].error().expect("should carry an error");
    assert!(error.contains("crashed"), "unexpected error: {error}");
}
