//! Event processor — drives one inbound message through the pipeline.
//!
//! Flow per message: decode → email presence check → strict extraction →
//! breach lookup → result forwarding. Terminal states are `Forwarded` and
//! `Dropped`; nothing is retried and nothing is persisted.
//!
//! **Enrichment is best-effort by policy.** A failed lookup does not drop
//! the message — an empty result set is forwarded in its place. A failed
//! forward is logged and the message still counts as forwarded. Only the
//! stages before the lookup can drop a message.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::RunMode;
use crate::error::PipelineError;
use crate::extract::EmailExtractor;
use crate::forward::ResultSink;
use crate::lookup::BreachLookup;
use crate::pipeline::types::{BreachResults, InboundEvent, Outcome, ProcessedEvent};

/// Event processor — the pipeline core.
///
/// Owns the extractor; the lookup and delivery collaborators are injected
/// so tests can substitute stubs. Stateless across invocations.
pub struct EventProcessor {
    extractor: EmailExtractor,
    lookup: Arc<dyn BreachLookup>,
    sink: Arc<dyn ResultSink>,
    mode: RunMode,
}

impl EventProcessor {
    pub fn new(lookup: Arc<dyn BreachLookup>, sink: Arc<dyn ResultSink>, mode: RunMode) -> Self {
        Self {
            extractor: EmailExtractor::new(),
            lookup,
            sink,
            mode,
        }
    }

    /// Process a single queue message payload through the full pipeline.
    ///
    /// Infallible at this boundary: every failure is logged with its stage
    /// context and resolved into an `Outcome`, so one bad message can never
    /// abort the worker loop.
    pub async fn process(&self, payload: &[u8]) -> ProcessedEvent {
        // Stage 1: decode the payload.
        let event: InboundEvent = match serde_json::from_slice(payload) {
            Ok(event) => event,
            Err(e) => {
                let err = PipelineError::Decode(e.to_string());
                warn!(error = %err, "Failed to decode inbound event; dropping");
                return self.done(Outcome::Dropped, None);
            }
        };

        // Stage 2: fast presence check.
        if !self.extractor.contains_email(&event.message) {
            info!("no email found");
            return self.done(Outcome::Dropped, None);
        }

        // Stage 3: strict extraction.
        let email = match self.extractor.extract_email(&event.message) {
            Ok(email) => email,
            Err(e) => {
                warn!(
                    text = %event.message,
                    error = %PipelineError::from(e),
                    "Failed to extract email; dropping"
                );
                return self.done(Outcome::Dropped, None);
            }
        };

        debug!(email = %email, "Extracted email, querying breach service");

        // Stage 4: enrichment lookup. Non-fatal — an empty result set
        // stands in on failure.
        let results = match self.lookup.lookup(&email).await {
            Ok(results) => results,
            Err(e) => {
                warn!(
                    email = %email,
                    error = %PipelineError::from(e),
                    "Breach lookup failed; continuing with empty result set"
                );
                BreachResults::default()
            }
        };

        // Stage 5: hand off the result set.
        match self.mode {
            RunMode::Forward => {
                info!(email = %email, entries = results.len(), "Forwarding results");
                if let Err(e) = self.sink.deliver(&results).await {
                    warn!(error = %PipelineError::from(e), "Failed to forward results");
                }
            }
            RunMode::LogOnly => {
                info!(
                    email = %email,
                    entries = results.len(),
                    "Enrichment complete (log-only mode)"
                );
            }
        }

        self.done(Outcome::Forwarded, Some(email))
    }

    fn done(&self, outcome: Outcome, email: Option<String>) -> ProcessedEvent {
        ProcessedEvent {
            outcome,
            email,
            processed_at: Utc::now(),
        }
    }
}
