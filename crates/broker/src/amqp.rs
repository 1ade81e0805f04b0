// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! AMQP 0-9-1 publisher/consumer wrapper built on `lapin` (spec §6).
//!
//! The publisher is a single long-lived connection + channel guarded as
//! one sink (spec §5): publish calls serialize through the guard. On an
//! observed connection/channel death the next publish reopens before
//! retrying once; in the window between death and recovery, publishes
//! fail and the caller sees [`BrokerError`].

use async_trait::async_trait;
use futures_util::StreamExt;
use lapin::message::Delivery;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicPublishOptions, BasicQosOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::uri::AMQPUri;
use lapin::{BasicProperties, Channel, Connection, ConnectionProperties};
use thiserror::Error;
use tokio::sync::Mutex;

/// Default heartbeat negotiated with the broker when none is configured
/// (spec §6: "heartbeat 30 s").
pub const DEFAULT_HEARTBEAT_SECS: u16 = 30;

#[derive(Debug, Error)]
pub enum BrokerError {
    #[error("invalid broker URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("failed to connect to broker: {0}")]
    Connect(#[source] lapin::Error),
    #[error("failed to open or configure channel: {0}")]
    Channel(#[source] lapin::Error),
    #[error("publish failed: {0}")]
    Publish(#[source] lapin::Error),
    #[error("consume failed: {0}")]
    Consume(#[source] lapin::Error),
    #[error("ack failed: {0}")]
    Ack(#[source] lapin::Error),
}

/// Connects to `url`, requesting `heartbeat` seconds (spec §6) as the AMQP
/// heartbeat interval. The interval is carried on the URI itself (`lapin`
/// has no separate `ConnectionProperties` knob for it), so the URL is
/// parsed, the query's `heartbeat` field is overridden, and the result is
/// handed to `Connection::connect_uri`.
async fn connect_with_heartbeat(url: &str, heartbeat: u16) -> Result<Connection, BrokerError> {
    let mut uri: AMQPUri = url.parse().map_err(|reason| BrokerError::InvalidUrl {
        url: url.to_string(),
        reason,
    })?;
    uri.query.heartbeat = Some(heartbeat);
    Connection::connect_uri(uri, ConnectionProperties::default())
        .await
        .map_err(BrokerError::Connect)
}

/// A sink messages are published to, one queue at a time (spec §6/§9).
#[async_trait]
pub trait Publisher: Send + Sync {
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), BrokerError>;
}

/// Single-connection AMQP publisher. `queue_declare` is idempotent and
/// cheap enough to call on every publish, so no separate setup step is
/// required before the first message to a given queue.
pub struct AmqpPublisher {
    url: String,
    heartbeat: u16,
    sink: Mutex<Option<Channel>>,
}

impl AmqpPublisher {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_heartbeat(url, DEFAULT_HEARTBEAT_SECS)
    }

    pub fn with_heartbeat(url: impl Into<String>, heartbeat: u16) -> Self {
        Self {
            url: url.into(),
            heartbeat,
            sink: Mutex::new(None),
        }
    }

    async fn open_channel(&self) -> Result<Channel, BrokerError> {
        let connection = connect_with_heartbeat(&self.url, self.heartbeat).await?;
        connection.create_channel().await.map_err(BrokerError::Channel)
    }

    /// Returns the current channel if it's still connected, otherwise
    /// reopens it. Guarded by `sink`'s mutex so publish calls serialize
    /// through this one sink (spec §5).
    async fn healthy_channel(&self) -> Result<Channel, BrokerError> {
        let mut guard = self.sink.lock().await;
        if let Some(channel) = guard.as_ref() {
            if channel.status().connected() {
                return Ok(channel.clone());
            }
            tracing::warn!("amqp channel observed dead, reopening");
        }
        let channel = self.open_channel().await?;
        *guard = Some(channel.clone());
        Ok(channel)
    }
}

#[async_trait]
impl Publisher for AmqpPublisher {
    async fn publish(&self, queue: &str, payload: &[u8]) -> Result<(), BrokerError> {
        let channel = self.healthy_channel().await?;
        channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(BrokerError::Channel)?;
        channel
            .basic_publish(
                "",
                queue,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default(),
            )
            .await
            .map_err(BrokerError::Publish)?
            .await
            .map_err(BrokerError::Publish)?;
        Ok(())
    }
}

/// One bounded worker's connection to a single queue (spec §5: target
/// concurrency 10, `prefetch_count = 50` per consumer).
pub struct AmqpConsumer {
    inner: lapin::Consumer,
}

impl AmqpConsumer {
    pub async fn connect(
        url: &str,
        queue: &str,
        consumer_tag: &str,
        prefetch: u16,
    ) -> Result<Self, BrokerError> {
        Self::connect_with_heartbeat(url, queue, consumer_tag, prefetch, DEFAULT_HEARTBEAT_SECS).await
    }

    pub async fn connect_with_heartbeat(
        url: &str,
        queue: &str,
        consumer_tag: &str,
        prefetch: u16,
        heartbeat: u16,
    ) -> Result<Self, BrokerError> {
        let connection = connect_with_heartbeat(url, heartbeat).await?;
        let channel = connection.create_channel().await.map_err(BrokerError::Channel)?;
        channel
            .basic_qos(prefetch, BasicQosOptions::default())
            .await
            .map_err(BrokerError::Channel)?;
        channel
            .queue_declare(
                queue,
                QueueDeclareOptions {
                    durable: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(BrokerError::Channel)?;
        let inner = channel
            .basic_consume(queue, consumer_tag, BasicConsumeOptions::default(), FieldTable::default())
            .await
            .map_err(BrokerError::Channel)?;
        Ok(Self { inner })
    }

    /// Pulls the next delivery, or `None` once the underlying stream ends
    /// (channel/connection closed).
    pub async fn next(&mut self) -> Result<Option<Delivery>, BrokerError> {
        match self.inner.next().await {
            Some(Ok(delivery)) => Ok(Some(delivery)),
            Some(Err(error)) => Err(BrokerError::Consume(error)),
            None => Ok(None),
        }
    }
}

/// Acknowledges `delivery` regardless of processing outcome
/// (`on_failure = ack`, spec §6/§7: decode errors and execution failures
/// alike do not loop-redeliver).
pub async fn ack(delivery: &Delivery) -> Result<(), BrokerError> {
    delivery
        .ack(BasicAckOptions::default())
        .await
        .map_err(BrokerError::Ack)
}
