// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Queue naming (spec §6): `inn_event_queue` (ingress), `inn_pipeline_queue`
//! (default pipeline route), plus per-tenant pipeline queues named by the
//! Event Router's rules.

/// Default ingress queue name, overridable via `RABBIT_EVENT_QUEUE`.
pub const DEFAULT_INGRESS_QUEUE: &str = "inn_event_queue";

/// Default (catch-all) pipeline queue, the last rule in a router's list.
pub const DEFAULT_PIPELINE_QUEUE: &str = "inn_pipeline_queue";

/// Consumer QoS shared by both worker pools (spec §5): bounded prefetch
/// gives back-pressure against a finite worker count.
pub const PREFETCH_COUNT: u16 = 50;

/// Target worker pool concurrency for both the Event Consumer and
/// Pipeline Consumer pools (spec §5).
pub const POOL_CONCURRENCY: usize = 10;

/// Reads `RABBIT_EVENT_QUEUE`, falling back to [`DEFAULT_INGRESS_QUEUE`].
pub fn default_ingress_queue() -> String {
    std::env::var("RABBIT_EVENT_QUEUE").unwrap_or_else(|_| DEFAULT_INGRESS_QUEUE.to_string())
}
