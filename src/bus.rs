//! RabbitMQ intake adapter.
//!
//! Owns the AMQP connection/channel lifecycle: connect, declare a
//! server-named exclusive queue, bind it to the events exchange, and consume
//! with auto-ack. Deliveries are exposed as a plain byte stream so the
//! worker loop and the pipeline never touch `lapin` types — tests substitute
//! `futures::stream::iter`.

use std::pin::Pin;

use futures::{Stream, StreamExt};
use lapin::options::{
    BasicConsumeOptions, ExchangeDeclareOptions, QueueBindOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{Connection, ConnectionProperties, ExchangeKind};
use tokio_stream::wrappers::UnboundedReceiverStream;
use tracing::{info, warn};

use crate::error::BusError;

/// Exchange the inbound queue is bound to.
pub const EVENTS_EXCHANGE: &str = "events";

/// Stream of raw message payloads from the bus.
pub type EventStream = Pin<Box<dyn Stream<Item = Vec<u8>> + Send>>;

/// Connected message-bus handle.
#[derive(Debug)]
pub struct EventBus {
    connection: Connection,
    channel: lapin::Channel,
}

impl EventBus {
    /// Connect to the bus and open a channel.
    pub async fn connect(url: &str) -> Result<Self, BusError> {
        let connection = Connection::connect(url, ConnectionProperties::default())
            .await
            .map_err(|e| BusError::Connect(e.to_string()))?;

        let channel = connection
            .create_channel()
            .await
            .map_err(|e| BusError::Channel(e.to_string()))?;

        Ok(Self {
            connection,
            channel,
        })
    }

    /// Bind a fresh server-named exclusive queue to the events exchange and
    /// start consuming with auto-ack.
    ///
    /// Consumes `self`; the connection lives inside the pump task for as
    /// long as the returned stream has a receiver.
    pub async fn into_event_stream(self) -> Result<EventStream, BusError> {
        self.channel
            .exchange_declare(
                EVENTS_EXCHANGE,
                ExchangeKind::Fanout,
                ExchangeDeclareOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| BusError::Queue(e.to_string()))?;

        let queue = self
            .channel
            .queue_declare(
                "",
                QueueDeclareOptions {
                    exclusive: true,
                    auto_delete: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| BusError::Queue(e.to_string()))?;
        let queue_name = queue.name().as_str().to_string();

        self.channel
            .queue_bind(
                &queue_name,
                EVENTS_EXCHANGE,
                "",
                QueueBindOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| BusError::Queue(e.to_string()))?;

        let mut consumer = self
            .channel
            .basic_consume(
                &queue_name,
                "",
                BasicConsumeOptions {
                    no_ack: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| BusError::Consume {
                queue: queue_name.clone(),
                reason: e.to_string(),
            })?;

        info!(
            queue = %queue_name,
            exchange = EVENTS_EXCHANGE,
            "Consuming events"
        );

        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        let connection = self.connection;

        tokio::spawn(async move {
            // The connection must outlive the consumer; park it here.
            let _connection = connection;

            while let Some(delivery) = consumer.next().await {
                match delivery {
                    Ok(delivery) => {
                        if tx.send(delivery.data).is_err() {
                            info!("Event stream receiver closed; stopping consumer");
                            return;
                        }
                    }
                    Err(e) => {
                        warn!("Consumer delivery error: {e}");
                    }
                }
            }
            info!("Consumer stream ended");
        });

        Ok(UnboundedReceiverStream::new(rx).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_refused_is_connect_error() {
        let err = EventBus::connect("amqp://127.0.0.1:1").await.unwrap_err();
        assert!(matches!(err, BusError::Connect(_)));
    }
}
