// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared state handed to every gateway handler: what to publish to, what
//! to match against, and how to execute a pipeline synchronously.

use inn_broker::{PipelineDirectory, Publisher};
use inn_core::{Clock, IdGen};
use inn_engine::PipelineExecutor;
use inn_registry::IntegrationRegistry;
use std::sync::Arc;

/// Everything the gateway needs, generic over the publisher/directory/
/// clock/id-generator implementations so production code wires real
/// AMQP/clock types while tests wire in-memory fakes.
///
/// Routing (spec §4.5) only applies to the Event Consumer's fan-out (spec
/// §4.6); neither handler here consults a router — the async path
/// publishes straight to `ingress_queue` and the sync path matches
/// directly against `directory` — so no `EventRouter` is held.
pub struct GatewayState<P, D, C, G>
where
    P: Publisher + 'static,
    D: PipelineDirectory + 'static,
    C: Clock,
    G: IdGen,
{
    pub publisher: Arc<P>,
    pub directory: Arc<D>,
    pub executor: Arc<PipelineExecutor<C, G>>,
    pub ingress_queue: String,
}

impl<P, D, C, G> Clone for GatewayState<P, D, C, G>
where
    P: Publisher + 'static,
    D: PipelineDirectory + 'static,
    C: Clock,
    G: IdGen,
{
    fn clone(&self) -> Self {
        Self {
            publisher: Arc::clone(&self.publisher),
            directory: Arc::clone(&self.directory),
            executor: Arc::clone(&self.executor),
            ingress_queue: self.ingress_queue.clone(),
        }
    }
}

impl<P, D, C, G> GatewayState<P, D, C, G>
where
    P: Publisher + 'static,
    D: PipelineDirectory + 'static,
    C: Clock,
    G: IdGen,
{
    pub fn new(
        registry: IntegrationRegistry,
        publisher: P,
        directory: D,
        clock: C,
        id_gen: G,
        ingress_queue: impl Into<String>,
    ) -> Self {
        Self {
            publisher: Arc::new(publisher),
            directory: Arc::new(directory),
            executor: Arc::new(PipelineExecutor::new(registry, clock, id_gen)),
            ingress_queue: ingress_queue.into(),
        }
    }
}
