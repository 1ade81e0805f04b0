// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Handler implementations for the two ingress modes (spec §4.8, §6).

use crate::state::GatewayState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Json};
use inn_broker::PipelineDirectory;
use inn_broker::Publisher;
use inn_core::{matches, Clock, Event, IdGen, Value};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Serialize)]
struct AckResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct DataResponse {
    data: serde_json::Value,
}

#[derive(Serialize)]
struct NotFoundResponse {
    message: &'static str,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

/// Builds the inbound [`Event`] the spec's data model describes (spec
/// §3), flattening the URL path and an optional JSON body into `params`.
fn build_event(app_id: &str, path: &str, method: &Method, headers: &HeaderMap, body: &Bytes) -> Event {
    let params = if body.is_empty() {
        Value::map()
    } else {
        serde_json::from_slice::<serde_json::Value>(body)
            .map(Value::from)
            .unwrap_or_else(|_| Value::map())
    };

    let header_pairs = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), Value::from(v))));

    Event::new("webhook", format!("/api/webhook/{app_id}/{path}"))
        .with_method(method.as_str())
        .with_params(params)
        .with_headers(Value::from_pairs(header_pairs))
}

/// Async ingress (spec §4.8/§6): publish the event to the configured
/// ingress queue and reply `200` immediately regardless of publish
/// outcome — errors on this path are invisible to the caller by design
/// (spec §7).
pub async fn webhook<P, D, C, G>(
    State(state): State<GatewayState<P, D, C, G>>,
    Path((app_id, path)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse
where
    P: Publisher + 'static,
    D: PipelineDirectory + 'static,
    C: Clock,
    G: IdGen,
{
    let event = build_event(&app_id, &path, &method, &headers, &body);
    let payload = match serde_json::to_vec(&event) {
        Ok(bytes) => bytes,
        Err(error) => {
            error!(%error, "failed to encode event for ingress queue");
            return (
                StatusCode::OK,
                Json(AckResponse {
                    message: "Event received and processed",
                }),
            );
        }
    };

    if let Err(error) = state.publisher.publish(&state.ingress_queue, &payload).await {
        warn!(%error, queue = %state.ingress_queue, "failed to publish ingress event");
    }

    (
        StatusCode::OK,
        Json(AckResponse {
            message: "Event received and processed",
        }),
    )
}

/// Sync ingress (spec §4.8/§6): match against the pipeline directory and
/// execute the first hit in-process, replying with its final output.
pub async fn call<P, D, C, G>(
    State(state): State<GatewayState<P, D, C, G>>,
    Path((app_id, path)): Path<(String, String)>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response
where
    P: Publisher + 'static,
    D: PipelineDirectory + 'static,
    C: Clock,
    G: IdGen,
{
    let event = build_event(&app_id, &path, &method, &headers, &body);
    let event_value = event.as_value();

    let pipelines = state.directory.list_pipelines().await;
    let Some(pipeline) = pipelines.iter().find(|p| matches(&event_value, &p.pattern)) else {
        return (
            StatusCode::NOT_FOUND,
            Json(NotFoundResponse {
                message: "No matching pipeline found",
            }),
        )
            .into_response();
    };

    let record = state.executor.execute(pipeline, event_value).await;

    if record.is_success() {
        let data = record
            .final_output()
            .cloned()
            .map(serde_json::Value::from)
            .unwrap_or(serde_json::Value::Null);
        (StatusCode::OK, Json(DataResponse { data })).into_response()
    } else {
        let error = record.error.unwrap_or_else(|| "Pipeline execution failed".to_string());
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error })).into_response()
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod tests;
