// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event Consumer (spec §4.6): decode → match every known pipeline against
//! the event → route the event to a target queue → fan out one envelope
//! per matching pipeline → ack regardless of outcome.

use std::sync::Arc;

use inn_broker::{ack, AmqpConsumer, PipelineDirectory, Publisher};
use inn_core::{matches, Event, Pipeline, Value};
use inn_router::EventRouter;
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
struct WorkItem<'a> {
    pipeline: &'a Pipeline,
    context: Value,
}

/// Spawns `concurrency` independent, stateless workers pulling from
/// `queue` (spec §5: target concurrency 10, prefetch 50). Returns once
/// every worker has exited — normally only on a fatal connect failure or
/// process shutdown.
#[allow(clippy::too_many_arguments)]
pub async fn run_pool<D, P>(
    url: &str,
    queue: &str,
    prefetch: u16,
    concurrency: usize,
    heartbeat: u16,
    directory: Arc<D>,
    publisher: Arc<P>,
    router: Arc<EventRouter>,
) where
    D: PipelineDirectory + 'static,
    P: Publisher + 'static,
{
    let mut handles = Vec::with_capacity(concurrency);
    for worker in 0..concurrency {
        let url = url.to_string();
        let queue = queue.to_string();
        let directory = Arc::clone(&directory);
        let publisher = Arc::clone(&publisher);
        let router = Arc::clone(&router);
        handles.push(tokio::spawn(async move {
            run_worker(&url, &queue, prefetch, heartbeat, worker, &directory, &publisher, &router).await;
        }));
    }
    for handle in handles {
        let _ = handle.await;
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_worker<D, P>(
    url: &str,
    queue: &str,
    prefetch: u16,
    heartbeat: u16,
    worker: usize,
    directory: &D,
    publisher: &P,
    router: &EventRouter,
) where
    D: PipelineDirectory,
    P: Publisher,
{
    let consumer_tag = format!("inn-event-consumer-{worker}");
    let mut consumer =
        match AmqpConsumer::connect_with_heartbeat(url, queue, &consumer_tag, prefetch, heartbeat).await {
            Ok(consumer) => consumer,
            Err(error) => {
                error!(%error, queue, "event consumer failed to connect");
                return;
            }
        };

    loop {
        let delivery = match consumer.next().await {
            Ok(Some(delivery)) => delivery,
            Ok(None) => {
                warn!(queue, "event consumer stream closed");
                return;
            }
            Err(error) => {
                error!(%error, queue, "event consumer read failed");
                continue;
            }
        };

        process_delivery(&delivery.data, directory, publisher, router).await;

        if let Err(error) = ack(&delivery).await {
            error!(%error, queue, "failed to ack inbound event");
        }
    }
}

/// The body of one message's handling, split out of [`run_worker`] so it's
/// directly unit-testable without a live broker connection (spec §4.6
/// steps 1-4; step 5's ack happens in the caller regardless of this
/// function's outcome).
pub async fn process_delivery<D, P>(payload: &[u8], directory: &D, publisher: &P, router: &EventRouter)
where
    D: PipelineDirectory,
    P: Publisher,
{
    let event: Event = match serde_json::from_slice(payload) {
        Ok(event) => event,
        Err(error) => {
            warn!(%error, "failed to decode inbound event, dropping");
            return;
        }
    };
    let event_value = event.as_value();

    let target_queue = match router.route(&event_value) {
        Ok(queue) => queue.to_string(),
        Err(error) => {
            warn!(%error, "no route for event, dropping");
            return;
        }
    };

    let pipelines = directory.list_pipelines().await;
    for pipeline in pipelines.iter().filter(|p| matches(&event_value, &p.pattern)) {
        let envelope = WorkItem {
            pipeline,
            context: event_value.clone(),
        };
        let payload = match serde_json::to_vec(&envelope) {
            Ok(bytes) => bytes,
            Err(error) => {
                error!(%error, pipeline = %pipeline.name, "failed to encode pipeline envelope");
                continue;
            }
        };
        if let Err(error) = publisher.publish(&target_queue, &payload).await {
            warn!(%error, queue = %target_queue, pipeline = %pipeline.name, "failed to publish pipeline envelope");
        }
    }
}

#[cfg(test)]
#[path = "event_consumer_tests.rs"]
mod tests;
