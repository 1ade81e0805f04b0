// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pipeline Consumer (spec §4.7): decode `{pipeline, context}` → invoke the
//! Pipeline Executor → ack regardless of execution outcome (`on_failure =
//! ack`). Execution failures are observable only via logs and whatever
//! side effects the pipeline's steps already performed.

use std::sync::Arc;

use inn_broker::{ack, AmqpConsumer};
use inn_core::{Clock, IdGen, Pipeline, Value};
use inn_engine::PipelineExecutor;
use serde::Deserialize;
use tracing::{error, warn};

#[derive(Deserialize)]
struct WorkItem {
    pipeline: Pipeline,
    context: Value,
}

/// Spawns `concurrency` workers, each executing pipelines to completion on
/// the thread that pulled them (spec §5).
#[allow(clippy::too_many_arguments)]
pub async fn run_pool<C, G>(
    url: &str,
    queue: &str,
    prefetch: u16,
    concurrency: usize,
    heartbeat: u16,
    executor: Arc<PipelineExecutor<C, G>>,
) where
    C: Clock + 'static,
    G: IdGen + 'static,
{
    let mut handles = Vec::with_capacity(concurrency);
    for worker in 0..concurrency {
        let url = url.to_string();
        let queue = queue.to_string();
        let executor = Arc::clone(&executor);
        handles.push(tokio::spawn(async move {
            run_worker(&url, &queue, prefetch, heartbeat, worker, &executor).await;
        }));
    }
    for handle in handles {
        let _ = handle.await;
    }
}

#[allow(clippy::too_many_arguments)]
async fn run_worker<C, G>(
    url: &str,
    queue: &str,
    prefetch: u16,
    heartbeat: u16,
    worker: usize,
    executor: &PipelineExecutor<C, G>,
) where
    C: Clock,
    G: IdGen,
{
    let consumer_tag = format!("inn-pipeline-consumer-{worker}");
    let mut consumer =
        match AmqpConsumer::connect_with_heartbeat(url, queue, &consumer_tag, prefetch, heartbeat).await {
            Ok(consumer) => consumer,
            Err(error) => {
                error!(%error, queue, "pipeline consumer failed to connect");
                return;
            }
        };

    loop {
        let delivery = match consumer.next().await {
            Ok(Some(delivery)) => delivery,
            Ok(None) => {
                warn!(queue, "pipeline consumer stream closed");
                return;
            }
            Err(error) => {
                error!(%error, queue, "pipeline consumer read failed");
                continue;
            }
        };

        process_delivery(&delivery.data, executor).await;

        if let Err(error) = ack(&delivery).await {
            error!(%error, queue, "failed to ack inbound pipeline message");
        }
    }
}

/// The body of one message's handling, split out of [`run_worker`] so it's
/// directly unit-testable without a live broker connection.
pub async fn process_delivery<C, G>(payload: &[u8], executor: &PipelineExecutor<C, G>)
where
    C: Clock,
    G: IdGen,
{
    let item: WorkItem = match serde_json::from_slice(payload) {
        Ok(item) => item,
        Err(error) => {
            warn!(%error, "failed to decode pipeline envelope, dropping");
            return;
        }
    };

    let record = executor.execute(&item.pipeline, item.context).await;
    if !record.is_success() {
        warn!(
            pipeline = %item.pipeline.name,
            status = ?record.status,
            error = ?record.error,
            "pipeline execution did not succeed"
        );
    }
}

#[cfg(test)]
#[path = "pipeline_consumer_tests.rs"]
mod tests;
