// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `innd` — the webhook automation daemon (spec §2, §5).
//!
//! Runs three concurrent populations in one process: the Axum HTTP
//! ingress (spec §4.8), the Event Consumer pool (spec §4.6) and the
//! Pipeline Consumer pool (spec §4.7). The pipeline directory is a static,
//! in-memory snapshot (spec §9's open question) — operators wire a real
//! store by constructing [`inn_daemon::Daemon`] directly instead of using
//! this binary's demo directory.

use inn_daemon::config::Config;
use inn_daemon::Daemon;
use tokio::signal::unix::{signal, SignalKind};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load();
    info!(
        rabbit_url = %config.rabbit_url,
        rabbit_event_queue = %config.rabbit_event_queue,
        gateway_bind_addr = %config.gateway_bind_addr,
        "starting innd"
    );

    let daemon = Daemon::new(config, Vec::new());

    let sigterm = signal(SignalKind::terminate())?;
    let sigint = signal(SignalKind::interrupt())?;
    daemon.run(shutdown_signal(sigterm, sigint)).await
}

/// Resolves once either SIGTERM or SIGINT (Ctrl-C) is observed, letting
/// the gateway drain in-flight requests before the process exits.
async fn shutdown_signal(mut sigterm: tokio::signal::unix::Signal, mut sigint: tokio::signal::unix::Signal) {
    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }
}
