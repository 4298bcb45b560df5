//! Configuration types.

use crate::error::ConfigError;

/// Environment variable holding the AMQP connection string.
pub const ENV_AMQP_URL: &str = "ENRICHER_AMQP_URL";

/// Environment variable holding the downstream collector host URL.
pub const ENV_COLLECTOR_HOST: &str = "ENRICHER_COLLECTOR_HOST";

/// Environment variable selecting the run mode (`forward` | `log-only`).
pub const ENV_MODE: &str = "ENRICHER_MODE";

/// Environment variable overriding the breach service base URL.
pub const ENV_BREACH_API_URL: &str = "ENRICHER_BREACH_API_URL";

/// What the pipeline does with a finished result set.
///
/// `Forward` POSTs it to the collector; `LogOnly` logs the entry count and
/// performs no outbound request. One pipeline, two configurations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Forward,
    LogOnly,
}

impl RunMode {
    /// Short label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::LogOnly => "log-only",
        }
    }
}

/// Worker configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// AMQP connection string for the inbound bus.
    pub amqp_url: String,
    /// Base URL of the downstream collector (no trailing slash).
    pub collector_host: String,
    /// Forward results or log them.
    pub mode: RunMode,
    /// Base URL of the breach lookup service.
    pub breach_api_url: Option<String>,
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// The AMQP connection string and collector host are required; a missing
    /// value is a fatal `ConfigError`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let amqp_url = require_env(ENV_AMQP_URL)?;
        let collector_host = require_env(ENV_COLLECTOR_HOST)?;

        let mode = match std::env::var(ENV_MODE) {
            Ok(raw) => parse_mode(&raw)?,
            Err(_) => RunMode::Forward,
        };

        let breach_api_url = std::env::var(ENV_BREACH_API_URL).ok();

        Ok(Self {
            amqp_url,
            collector_host,
            mode,
            breach_api_url,
        })
    }
}

fn require_env(key: &str) -> Result<String, ConfigError> {
    match std::env::var(key) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(ConfigError::MissingEnvVar(key.to_string())),
    }
}

fn parse_mode(raw: &str) -> Result<RunMode, ConfigError> {
    match raw.trim().to_lowercase().as_str() {
        "" | "forward" => Ok(RunMode::Forward),
        "log-only" | "log_only" | "logonly" => Ok(RunMode::LogOnly),
        other => Err(ConfigError::InvalidValue {
            key: ENV_MODE.to_string(),
            message: format!("expected 'forward' or 'log-only', got '{other}'"),
        }),
    }
}
