// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory fakes for `inn-gateway`/`inn-daemon` tests: a recording
//! publisher and a directory backed by an in-process list, neither of
//! which talks to a real broker.

use crate::amqp::{BrokerError, Publisher};
use crate::directory::PipelineDirectory;
use async_trait::async_trait;
use inn_core::Pipeline;
use parking_lot::Mutex;
use std::sync::Arc;

/// Records every `publish` call instead of talking to a broker. Used by
/// S2/S3 style tests that assert on what would have been published.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    published: Arc<Mutex<Vec<(String, Vec<u8>)>>>,
    fail_queues: Arc<Mutex<Vec<String>>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next (and all subsequent) publishes to `queue` fail,
    /// exercising the "publish failure logs but doesn't block other
    /// pipelines" path (spec §4.6 step 4).
    pub fn fail_publishes_to(&self, queue: impl Into<String>) {
        self.fail_queues.lock().push(queue.into());
    }

    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().clone()
    }

    pub fn published_to(&self, queue: &str) -> Vec<Vec<u8>> {
        self.published
            .lock()
            .iter()
            .filter(|(q, _)| q == queue)
            .map(|(_, payload)| payload.clone())
            .collect()
    }
}

#[async_trait]
impl Publisher for RecordingPublisher {
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), BrokerError> {
        if self.fail_queues.lock().iter().any(|q| q == queue) {
            return Err(BrokerError::Publish(lapin::Error::InvalidChannelState(
                lapin::ChannelState::Closed,
            )));
        }
        self.published.lock().push((queue.to_string(), payload.to_vec()));
        Ok(())
    }
}

/// A [`PipelineDirectory`] over an in-process, mutable list — tests add
/// pipelines directly rather than going through a real directory service.
#[derive(Clone, Default)]
pub struct InMemoryDirectory {
    pipelines: Arc<Mutex<Vec<Pipeline>>>,
}

impl InMemoryDirectory {
    pub fn new(pipelines: Vec<Pipeline>) -> Self {
        Self {
            pipelines: Arc::new(Mutex::new(pipelines)),
        }
    }

    pub fn push(&self, pipeline: Pipeline) {
        self.pipelines.lock().push(pipeline);
    }
}

#[async_trait]
impl PipelineDirectory for InMemoryDirectory {
    async fn list_pipelines(&self) -> Vec<Pipeline> {
        self.pipelines.lock().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use inn_core::Value;

    #[tokio::test]
    async fn recording_publisher_captures_queue_and_payload() {
        let publisher = RecordingPublisher::new();
        publisher.publish("inn_event_queue", b"{}").await.unwrap();
        assert_eq!(publisher.published_to("inn_event_queue"), vec![b"{}".to_vec()]);
    }

    #[tokio::test]
    async fn recording_publisher_fails_configured_queues() {
        let publisher = RecordingPublisher::new();
        publisher.fail_publishes_to("lazada_pipeline_queue");
        let result = publisher.publish("lazada_pipeline_queue", b"{}").await;
        assert!(result.is_err());
        assert!(publisher.published_to("lazada_pipeline_queue").is_empty());
    }

    #[tokio::test]
    async fn in_memory_directory_lists_pushed_pipelines() {
        let directory = InMemoryDirectory::default();
        directory.push(Pipeline::new("p", Value::map(), vec![], chrono::DateTime::UNIX_EPOCH));
        assert_eq!(directory.list_pipelines().await.len(), 1);
    }
}
