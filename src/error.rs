//! Error types for the enrichment worker.

/// Configuration-related errors. Fatal at startup — the pipeline never
/// starts with an incomplete configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Message-bus adapter errors. Fatal at startup; the worker cannot run
/// without a consumer.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("failed to connect to message bus: {0}")]
    Connect(String),

    #[error("failed to open channel: {0}")]
    Channel(String),

    #[error("failed to declare or bind queue: {0}")]
    Queue(String),

    #[error("failed to register consumer on {queue}: {reason}")]
    Consume { queue: String, reason: String },
}

/// Email extraction errors.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("no email found in text")]
    NotFound,
}

/// Breach lookup errors. Each failure mode is a distinct kind; all of them
/// are non-fatal to the pipeline, which proceeds with an empty result set.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("failed to build request: {0}")]
    Request(String),

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("failed to decode response body: {0}")]
    Decode(String),
}

/// Result forwarding errors.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Pipeline-level errors — the ways a single message can fail. Logged with
/// stage context by the processor; none of these terminate the worker.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("malformed inbound payload: {0}")]
    Decode(String),

    #[error("email extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("breach lookup failed: {0}")]
    Lookup(#[from] LookupError),

    #[error("result forwarding failed: {0}")]
    Forward(#[from] ForwardError),
}
