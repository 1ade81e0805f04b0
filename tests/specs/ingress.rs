//! S1 (sync call, no match), S2 (async webhook publish) and S4 (field
//! mapping execution) driven over real HTTP against the compiled gateway.

use crate::prelude::TestServer;
use inn_core::{Pipeline, SequentialIdGen, Step, StepKind, Value};

const BUILTIN: &str = "pocsync.builtin";

/// S1 — `POST /api/call/unknown/anything` with an empty directory (no
/// pattern references the request) returns `404 {"message": "No matching
/// pipeline found"}`.
#[tokio::test]
async fn sync_call_with_no_match_returns_404() {
    let server = TestServer::start().await;
    server.directory.push(Pipeline {
        pattern: Value::from_pairs([("source", Value::from("webhook")), ("path", Value::from("/api/webhook/known"))]),
        ..Pipeline::new("known", Value::map(), vec![], chrono::DateTime::UNIX_EPOCH)
    });

    let client = reqwest::Client::new();
    let response = client
        .post(server.url("/api/call/unknown/anything"))
        .json(&serde_json::json!({}))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 404);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["message"], "No matching pipeline found");
}

/// S2 — `POST /api/webhook/shopee/order/created` replies `200` immediately
/// and publishes exactly one message to `inn_event_queue` whose decoded
/// `params.order_id == "12345"`.
#[tokio::test]
async fn async_webhook_publishes_and_acks_immediately() {
    let server = TestServer::start().await;

    let client = reqwest::Client::new();
    let response = client
        .post(server.url("/api/webhook/shopee/order/created"))
        .json(&serde_json::json!({"order_id": "12345"}))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["message"], "Event received and processed");

    let published = server.publisher.published_to("inn_event_queue");
    assert_eq!(published.len(), 1);
    let decoded: serde_json::Value = serde_json::from_slice(&published[0]).expect("decode published event");
    assert_eq!(decoded["params"]["order_id"], "12345");
}

/// S4 — a `[ webhook_trigger -> map_fields ]` pipeline executed
/// synchronously returns `200 {"data": {"id": ..., "name": ...}}`.
#[tokio::test]
async fn sync_call_executes_field_mapping_pipeline() {
    let server = TestServer::start().await;
    let id_gen = SequentialIdGen::new("step");
    let steps = vec![
        Step::with_id_gen(&id_gen, "webhook_trigger", StepKind::Trigger, BUILTIN, "trigger.passthrough", Value::map(), 0),
        Step::with_id_gen(
            &id_gen,
            "map",
            StepKind::Action,
            BUILTIN,
            "transform.map_fields",
            Value::from_pairs([(
                "mapping",
                Value::from_pairs([("id", Value::from("user_id")), ("name", Value::from("user_name"))]),
            )]),
            1,
        ),
    ];
    server.directory.push(Pipeline {
        pattern: Value::map(),
        ..Pipeline::new("field-mapping", Value::map(), steps, chrono::DateTime::UNIX_EPOCH)
    });

    let client = reqwest::Client::new();
    let response = client
        .post(server.url("/api/call/shopee/anything"))
        .json(&serde_json::json!({"user_id": 123, "user_name": "John Doe"}))
        .send()
        .await
        .expect("request");

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.expect("json body");
    assert_eq!(body["data"]["id"], 123);
    assert_eq!(body["data"]["name"], "John Doe");
}
