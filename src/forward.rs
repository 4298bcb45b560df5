//! Best-effort delivery of result sets to the downstream collector.
//!
//! One POST per result set; the response status and body are discarded.
//! Success means "the request left without a transport-level error" — there
//! is no acknowledgement check and no retry.

use async_trait::async_trait;

use crate::error::ForwardError;
use crate::lookup::{CLIENT_USER_AGENT, REQUEST_TIMEOUT};
use crate::pipeline::types::BreachResults;

/// Delivery seam — the pipeline depends on this, not on the HTTP client,
/// so tests can substitute a recording sink.
#[async_trait]
pub trait ResultSink: Send + Sync {
    /// Deliver one result set downstream.
    async fn deliver(&self, results: &BreachResults) -> Result<(), ForwardError>;
}

/// HTTP forwarder posting result sets to the collector's event endpoint.
pub struct ResultForwarder {
    http: reqwest::Client,
    host: String,
}

impl ResultForwarder {
    /// Create a forwarder for the given collector host (scheme + authority,
    /// no trailing slash).
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            host: host.into(),
        }
    }

    fn event_url(&self) -> String {
        format!("{}/event", self.host)
    }
}

#[async_trait]
impl ResultSink for ResultForwarder {
    async fn deliver(&self, results: &BreachResults) -> Result<(), ForwardError> {
        // `.json()` serializes the canonical {"Entries": [...]} form and
        // sets Content-Type: application/json.
        self.http
            .post(self.event_url())
            .header(reqwest::header::USER_AGENT, CLIENT_USER_AGENT)
            .json(results)
            .send()
            .await
            .map_err(|e| ForwardError::Transport(e.to_string()))?;

        Ok(())
    }
}
