//! Breach-disclosure lookup client.
//!
//! Queries the breach service's account endpoint for one email address and
//! decodes the JSON array response. Single attempt per call — no retry, no
//! backoff, no rate limiting; the pipeline treats every failure here as
//! non-fatal and proceeds with an empty result set.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::LookupError;
use crate::pipeline::types::{BreachRecord, BreachResults};

/// Production breach service host.
pub const DEFAULT_BREACH_API_URL: &str = "https://haveibeenpwned.com";

/// Client-identifying header value on every outbound request.
pub const CLIENT_USER_AGENT: &str = "breach-enricher";

/// Bounded request timeout for both outbound APIs.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Lookup seam — the pipeline depends on this, not on the HTTP client, so
/// tests can substitute a stub.
#[async_trait]
pub trait BreachLookup: Send + Sync {
    /// Look up the breach history for one email address.
    async fn lookup(&self, email: &str) -> Result<BreachResults, LookupError>;
}

/// HTTP client for the breach-disclosure service.
pub struct BreachClient {
    http: reqwest::Client,
    base_url: String,
}

impl BreachClient {
    /// Create a client against the production service host.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BREACH_API_URL)
    }

    /// Create a client against an alternate host (tests, staging).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            base_url: base_url.into(),
        }
    }

    /// Build the account-lookup URL with the email percent-encoded as a
    /// path segment, requesting unverified breaches as well.
    fn account_url(&self, email: &str) -> Result<Url, LookupError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| LookupError::Request(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::Request("base URL cannot be a base".into()))?
            .pop_if_empty()
            .extend(["api", "v2", "breachedaccount", email]);
        url.query_pairs_mut()
            .append_pair("includeUnverified", "true");
        Ok(url)
    }
}

impl Default for BreachClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BreachLookup for BreachClient {
    async fn lookup(&self, email: &str) -> Result<BreachResults, LookupError> {
        let url = self.account_url(email)?;

        let response = self
            .http
            .get(url)
            .header(reqwest::header::USER_AGENT, CLIENT_USER_AGENT)
            .header("api-version", "2")
            .header("cache-control", "no-cache")
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        // Full body into memory before decoding; the response is small.
        let body = response
            .bytes()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let entries: Vec<BreachRecord> =
            serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))?;

        Ok(BreachResults { entries })
    }
}
