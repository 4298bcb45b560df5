//! Sequential worker loop.
//!
//! One dedicated task drains the inbound stream: each message is fully
//! processed (through forwarding or drop) before the next is taken, so
//! forwarded results follow inbound order. Runs until the stream ends;
//! the main task handles process shutdown.

use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::info;
use uuid::Uuid;

use crate::bus::EventStream;
use crate::pipeline::EventProcessor;

/// Spawn the worker task draining `events` through `processor`.
pub fn spawn_worker(mut events: EventStream, processor: EventProcessor) -> JoinHandle<()> {
    tokio::spawn(async move {
        info!("Worker started; waiting for events");

        while let Some(payload) = events.next().await {
            let delivery_id = Uuid::new_v4();
            let processed = processor.process(&payload).await;
            info!(
                delivery = %delivery_id,
                outcome = processed.outcome.label(),
                email = processed.email.as_deref().unwrap_or("-"),
                "Event processed"
            );
        }

        info!("Inbound stream closed; worker exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use crate::config::RunMode;
    use crate::error::{ForwardError, LookupError};
    use crate::forward::ResultSink;
    use crate::lookup::BreachLookup;
    use crate::pipeline::types::{BreachRecord, BreachResults};

    /// Lookup stub that echoes the queried email into a single record, so
    /// ordering is observable at the sink.
    struct EchoLookup;

    #[async_trait]
    impl BreachLookup for EchoLookup {
        async fn lookup(&self, email: &str) -> Result<BreachResults, LookupError> {
            Ok(BreachResults {
                entries: vec![BreachRecord {
                    name: email.to_string(),
                    title: String::new(),
                    domain: String::new(),
                    breach_date: String::new(),
                    added_date: String::new(),
                    modified_date: String::new(),
                    pwn_count: 0,
                    description: String::new(),
                    logo_path: String::new(),
                    data_classes: vec![],
                    is_verified: false,
                    is_fabricated: false,
                    is_sensitive: false,
                    is_retired: false,
                    is_spam_list: false,
                }],
            })
        }
    }

    #[derive(Clone)]
    struct OrderSink {
        delivered: Arc<Mutex<Vec<BreachResults>>>,
    }

    #[async_trait]
    impl ResultSink for OrderSink {
        async fn deliver(&self, results: &BreachResults) -> Result<(), ForwardError> {
            self.delivered.lock().await.push(results.clone());
            Ok(())
        }
    }

    fn fake_stream(payloads: Vec<Vec<u8>>) -> EventStream {
        Box::pin(futures::stream::iter(payloads))
    }

    #[tokio::test]
    async fn worker_drains_in_inbound_order() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = OrderSink {
            delivered: Arc::clone(&delivered),
        };
        let processor =
            EventProcessor::new(Arc::new(EchoLookup), Arc::new(sink), RunMode::Forward);

        let stream = fake_stream(vec![
            br#"{"Message": "mailto:first@a.com"}"#.to_vec(),
            br#"{"Message": "mailto:second@b.org"}"#.to_vec(),
        ]);

        spawn_worker(stream, processor).await.unwrap();

        let delivered = delivered.lock().await;
        assert_eq!(delivered.len(), 2);
        assert_eq!(delivered[0].entries[0].name, "first@a.com");
        assert_eq!(delivered[1].entries[0].name, "second@b.org");
    }

    #[tokio::test]
    async fn worker_survives_bad_payloads() {
        let delivered = Arc::new(Mutex::new(Vec::new()));
        let sink = OrderSink {
            delivered: Arc::clone(&delivered),
        };
        let processor =
            EventProcessor::new(Arc::new(EchoLookup), Arc::new(sink), RunMode::Forward);

        let stream = fake_stream(vec![
            b"garbage".to_vec(),
            br#"{"Message": "no email here"}"#.to_vec(),
            br#"{"Message": "mailto:ok@fine.net"}"#.to_vec(),
        ]);

        spawn_worker(stream, processor).await.unwrap();

        let delivered = delivered.lock().await;
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].entries[0].name, "ok@fine.net");
    }

    #[tokio::test]
    async fn worker_exits_when_stream_closes() {
        let sink = OrderSink {
            delivered: Arc::new(Mutex::new(Vec::new())),
        };
        let processor =
            EventProcessor::new(Arc::new(EchoLookup), Arc::new(sink), RunMode::Forward);

        let handle = spawn_worker(fake_stream(vec![]), processor);
        tokio::time::timeout(std::time::Duration::from_secs(1), handle)
            .await
            .expect("worker should exit on stream end")
            .unwrap();
    }
}
