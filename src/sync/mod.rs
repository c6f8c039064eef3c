//! Sync client
//!
//! Pushes order payloads to the configured spreadsheet sink (a webhook
//! receiving JSON). Strictly best-effort: success is any 2xx response, the
//! body is parsed opportunistically and otherwise ignored, and a failure
//! never rolls back the local mutation that already happened. There is no
//! retry and no acknowledgement tracking; local state is the source of truth
//! and the sink may lag indefinitely.
//!
//! # Wire format
//!
//! ```json
//! { "type": "order",  "order": { ... } }
//! { "type": "orders", "orders": [ { ... } ] }
//! ```

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::Order;

/// Sync errors, rendered directly as the user-visible notice
#[derive(Debug, Error)]
pub enum SyncError {
    /// Non-success response from the sink
    #[error("Sync failed: {status} {status_text}")]
    Status { status: u16, status_text: String },

    /// Transport-level failure (DNS, connect, timeout)
    #[error("{0}")]
    Transport(String),
}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Transport(e.to_string())
    }
}

/// Tagged sink payload
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SyncPayload<'a> {
    Order { order: &'a Order },
    Orders { orders: &'a [&'a Order] },
}

/// HTTP client for the spreadsheet sink
#[derive(Clone)]
pub struct SyncClient {
    http: reqwest::Client,
    webhook: String,
}

impl SyncClient {
    pub fn new(webhook: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            webhook: webhook.into(),
        }
    }

    pub fn webhook(&self) -> &str {
        &self.webhook
    }

    /// Push a single newly submitted order
    pub async fn push_order(&self, order: &Order) -> Result<Value, SyncError> {
        self.post(&SyncPayload::Order { order }).await
    }

    /// Push a bulk (filtered) order set
    pub async fn push_orders(&self, orders: &[&Order]) -> Result<Value, SyncError> {
        self.post(&SyncPayload::Orders { orders }).await
    }

    async fn post(&self, payload: &SyncPayload<'_>) -> Result<Value, SyncError> {
        let response = self.http.post(&self.webhook).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Sink rejected push");
            return Err(SyncError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("").to_string(),
            });
        }

        // Body is informational only; unparseable bodies are ignored
        Ok(response.json().await.unwrap_or(Value::Null))
    }
}
