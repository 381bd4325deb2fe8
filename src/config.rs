//! Environment-driven configuration.

use thiserror::Error;

/// Configuration error raised while reading the environment.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid {name}: {message}")]
    InvalidValue { name: &'static str, message: String },
}

/// Runtime settings for the lifecycle core.
#[derive(Debug, Clone)]
pub struct VesselConfig {
    /// Deployment environment name, used for log-level selection.
    pub environment: String,
    /// Capacity of the lifecycle event broadcast channel.
    pub event_channel_capacity: usize,
}

impl Default for VesselConfig {
    fn default() -> Self {
        Self {
            environment: "development".to_string(),
            event_channel_capacity: 256,
        }
    }
}

impl VesselConfig {
    /// Build a configuration from `VESSEL_*` environment variables, falling
    /// back to defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(environment) = std::env::var("VESSEL_ENV") {
            config.environment = environment;
        }

        if let Ok(capacity) = std::env::var("VESSEL_EVENT_CAPACITY") {
            config.event_channel_capacity =
                capacity.parse().map_err(|e| ConfigError::InvalidValue {
                    name: "VESSEL_EVENT_CAPACITY",
                    message: format!("{e}"),
                })?;
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
