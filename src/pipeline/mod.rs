//! The event enrichment pipeline.

pub mod processor;
pub mod types;

pub use processor::EventProcessor;
pub use types::{BreachRecord, BreachResults, InboundEvent, Outcome, ProcessedEvent};
