//! S3 — an event matching only the Lazada pipeline's pattern fans out
//! exactly one envelope to `lazada_pipeline_queue` and nothing to any
//! Shopee-routed queue, driven through the real Event Consumer
//! (`inn_daemon::consumers::event_consumer::process_delivery`).

use inn_broker::test_support::{InMemoryDirectory, RecordingPublisher};
use inn_core::{Event, Pipeline, PipelineId, PipelineStatus, Value};
use inn_daemon::consumers::event_consumer::process_delivery;
use inn_router::{EventRouter, Rule};

fn pipeline_matching(name: &str, pattern: Value) -> Pipeline {
    Pipeline {
        id: PipelineId::new(name),
        name: name.to_string(),
        description: None,
        pattern,
        steps: vec![],
        status: PipelineStatus::Active,
        created_at: chrono::DateTime::UNIX_EPOCH,
        updated_at: chrono::DateTime::UNIX_EPOCH,
    }
}

#[tokio::test]
async fn event_fans_out_only_to_the_matching_pipelines_queue() {
    let directory = InMemoryDirectory::new(vec![
        pipeline_matching("lazada-order-sync", Value::from_pairs([("source", Value::from("lazada"))])),
        pipeline_matching("shopee-order-sync", Value::from_pairs([("source", Value::from("shopee"))])),
    ]);
    let publisher = RecordingPublisher::new();
    let router = EventRouter::new(vec![
        Rule::new("lazada_pipeline_queue", Value::from_pairs([("source", Value::from("lazada"))])),
        Rule::default_route("default_pipeline_queue"),
    ]);

    let event = Event::new("lazada", "/api/webhook/lazada");
    let payload = serde_json::to_vec(&event).expect("encode event");

    process_delivery(&payload, &directory, &publisher, &router).await;

    let lazada_messages = publisher.published_to("lazada_pipeline_queue");
    assert_eq!(lazada_messages.len(), 1);
    assert!(publisher.published_to("default_pipeline_queue").is_empty());

    let decoded: serde_json::Value = serde_json::from_slice(&lazada_messages[0]).expect("decode envelope");
    assert_eq!(decoded["pipeline"]["name"], "lazada-order-sync");
    assert_eq!(decoded["context"]["source"], "lazada");
}
