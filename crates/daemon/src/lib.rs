// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! inn-daemon: wires the HTTP gateway (spec §4.8) and the two broker
//! worker pools (spec §4.6/§4.7, §5) into one process, `innd`.

pub mod config;
pub mod consumers;

use std::sync::Arc;

use inn_broker::{AmqpPublisher, StaticPipelineDirectory, DEFAULT_PIPELINE_QUEUE, POOL_CONCURRENCY, PREFETCH_COUNT};
use inn_core::{Pipeline, SystemClock, UuidIdGen};
use inn_engine::PipelineExecutor;
use inn_gateway::GatewayState;
use inn_registry::IntegrationRegistry;
use inn_router::EventRouter;
use tokio::net::TcpListener;
use tracing::info;

use crate::config::Config;

/// Everything needed to start the daemon's three concurrent populations
/// (spec §5): the HTTP ingress, the Event Consumer pool and the Pipeline
/// Consumer pool. Held by [`run`] so tests can assemble a narrower
/// version of the same wiring against fakes.
pub struct Daemon {
    pub config: Config,
    pub registry: IntegrationRegistry,
    pub router: EventRouter,
    pub pipelines: Vec<Pipeline>,
}

impl Daemon {
    /// Builds a daemon with the built-in actions registered (spec §9) and
    /// the default event router (single catch-all rule onto
    /// [`DEFAULT_PIPELINE_QUEUE`]). Callers that need per-tenant routing
    /// rules construct [`Daemon`] fields directly instead.
    pub fn new(config: Config, pipelines: Vec<Pipeline>) -> Self {
        let registry = IntegrationRegistry::new();
        inn_actions::register_builtins(&registry);
        Self {
            config,
            registry,
            router: EventRouter::new(vec![inn_router::Rule::default_route(DEFAULT_PIPELINE_QUEUE)]),
            pipelines,
        }
    }

    /// Runs the gateway and both worker pools until the process is asked
    /// to shut down (via `shutdown`, resolved by `main`'s signal
    /// handling). Returns once the HTTP listener and every worker task
    /// have exited.
    pub async fn run(self, shutdown: impl std::future::Future<Output = ()>) -> Result<(), Box<dyn std::error::Error>> {
        let Daemon { config, registry, router, pipelines } = self;

        let publisher = Arc::new(AmqpPublisher::with_heartbeat(
            config.rabbit_url.clone(),
            config.rabbit_heartbeat_secs,
        ));
        let directory = Arc::new(StaticPipelineDirectory::new(pipelines));
        let executor = Arc::new(PipelineExecutor::new(registry, SystemClock, UuidIdGen));
        let router = Arc::new(router);

        let gateway_state = GatewayState {
            publisher: Arc::clone(&publisher),
            directory: Arc::clone(&directory),
            executor: Arc::clone(&executor),
            ingress_queue: config.rabbit_event_queue.clone(),
        };
        let app = inn_gateway::router(gateway_state);

        let listener = TcpListener::bind(config.gateway_bind_addr.as_str()).await?;
        info!(addr = %config.gateway_bind_addr, "gateway listening");

        let event_pool = consumers::event_consumer::run_pool(
            &config.rabbit_url,
            &config.rabbit_event_queue,
            PREFETCH_COUNT,
            POOL_CONCURRENCY,
            config.rabbit_heartbeat_secs,
            Arc::clone(&directory),
            Arc::clone(&publisher),
            Arc::clone(&router),
        );
        let pipeline_pool = consumers::pipeline_consumer::run_pool(
            &config.rabbit_url,
            DEFAULT_PIPELINE_QUEUE,
            PREFETCH_COUNT,
            POOL_CONCURRENCY,
            config.rabbit_heartbeat_secs,
            Arc::clone(&executor),
        );

        let serve = axum::serve(listener, app).with_graceful_shutdown(shutdown);

        tokio::select! {
            result = serve => result.map_err(Into::into),
            _ = event_pool => Ok(()),
            _ = pipeline_pool => Ok(()),
        }
    }
}
