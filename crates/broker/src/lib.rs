// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! inn-broker: the AMQP 0-9-1 publisher/consumer wrapper (spec §6) and the
//! read-only Pipeline Directory abstraction (spec §6 "Pipeline directory").

pub mod amqp;
pub mod directory;
pub mod queues;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use amqp::{ack, AmqpConsumer, AmqpPublisher, BrokerError, Publisher};
pub use directory::{PipelineDirectory, StaticPipelineDirectory};
pub use queues::{
    default_ingress_queue, DEFAULT_INGRESS_QUEUE, DEFAULT_PIPELINE_QUEUE, POOL_CONCURRENCY,
    PREFETCH_COUNT,
};
