// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `http.request` built-in action.

use async_trait::async_trait;
use inn_core::{Action, ActionResult, Value};

/// Issues an outbound HTTP request. Only `http`/`https` URLs are accepted;
/// anything else (e.g. `ftp://...`) fails fast with `"Invalid URL: ..."`
/// before a connection is attempted (spec §8 scenario S5).
#[derive(Default)]
pub struct HttpRequest {
    client: reqwest::Client,
}

#[async_trait]
impl Action for HttpRequest {
    async fn call(&self, input: Value) -> ActionResult {
        let url = input
            .get("url")
            .and_then(Value::as_str)
            .ok_or_else(|| "Missing required field: url".to_string())?;

        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!("Invalid URL: {url}"));
        }

        let method = input
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or("GET")
            .to_uppercase();

        let request = self
            .client
            .request(
                method
                    .parse()
                    .map_err(|e| format!("Invalid URL: unsupported method {method} ({e})"))?,
                url,
            )
            .build()
            .map_err(|e| format!("Invalid URL: {e}"))?;

        let response = self
            .client
            .execute(request)
            .await
            .map_err(|e| format!("Request failed: {e}"))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();

        Ok(Value::from_pairs([
            ("status", Value::from(status as i64)),
            ("body", Value::from(body)),
        ]))
    }
}
