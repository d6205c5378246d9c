use std::env;
use std::time::Duration;

use reqwest::Url;

/// Endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:12345/predict";

/// Environment variable overriding the endpoint
pub const ENDPOINT_ENV: &str = "BIKESTATUS_ENDPOINT";

/// Environment variable setting a request timeout, in whole seconds
pub const TIMEOUT_ENV: &str = "BIKESTATUS_TIMEOUT_SECS";

/// Errors raised while building a client configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid endpoint URL '{value}': {reason}")]
    InvalidEndpoint {
        value: String,
        reason: String,
    },
    #[error("Invalid timeout '{0}': expected a whole number of seconds greater than zero")]
    InvalidTimeout(String),
}

/// Settings for talking to the prediction service.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub endpoint: Url,
    /// `None` waits for the service indefinitely
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid URL"),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Builds a configuration from the environment, falling back to defaults.
    ///
    /// 1. `BIKESTATUS_ENDPOINT`, if set, replaces the endpoint
    /// 2. `BIKESTATUS_TIMEOUT_SECS`, if set, adds a timeout
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Ok(endpoint) = env::var(ENDPOINT_ENV) {
            config = config.with_endpoint(&endpoint)?;
        }
        if let Ok(secs) = env::var(TIMEOUT_ENV) {
            config = config.with_timeout(parse_timeout_secs(&secs)?);
        }
        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Result<Self, ConfigError> {
        self.endpoint = Url::parse(endpoint).map_err(|e| ConfigError::InvalidEndpoint {
            value: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        Ok(self)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Parses a timeout given in whole seconds; zero is rejected.
pub fn parse_timeout_secs(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout(value.to_string())),
    }
}
