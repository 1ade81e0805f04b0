// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! inn-gateway: the Axum HTTP ingress (spec §4.8, §6) — async
//! `/api/webhook/:app_id/*path` (publish-and-200) and sync
//! `/api/call/:app_id/*path` (match + execute in-process).

mod handlers;
mod state;

pub use state::GatewayState;

use axum::routing::{get, Router};
use inn_broker::PipelineDirectory;
use inn_broker::Publisher;
use inn_core::{Clock, IdGen};

/// Builds the `/api` router mounted with `state`. `GET` and `POST` are
/// both accepted on each route (spec §6 table).
pub fn router<P, D, C, G>(state: GatewayState<P, D, C, G>) -> Router
where
    P: Publisher + 'static,
    D: PipelineDirectory + 'static,
    C: Clock + 'static,
    G: IdGen + 'static,
{
    Router::new()
        .route(
            "/api/webhook/:app_id/*path",
            get(handlers::webhook::<P, D, C, G>).post(handlers::webhook::<P, D, C, G>),
        )
        .route(
            "/api/call/:app_id/*path",
            get(handlers::call::<P, D, C, G>).post(handlers::call::<P, D, C, G>),
        )
        .with_state(state)
}
