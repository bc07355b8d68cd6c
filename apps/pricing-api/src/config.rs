//! Pricing API configuration module.
//!
//! Configuration is layered with the `config` crate, highest priority first:
//!
//! 1. Environment variables: `PRICING_API_PORT=9000`,
//!    `PRICING_API_FEES__EXTRA_PLACEMENT=3.5` (nested keys use `__`)
//! 2. TOML file at `$PRICING_API_CONFIG` (default `pricing-api.toml`, optional)
//! 3. Built-in defaults
//!
//! ```toml
//! # pricing-api.toml
//! host = "0.0.0.0"
//! port = 8080
//! log_format = "json"
//!
//! [fees]
//! extra_placement = 3.00
//! embroidery_digitization = 6.00
//! ```

use config::{Config, Environment, File, FileFormat};
use printshop_core::{FeeSchedule, PricingError};
use serde::{Deserialize, Serialize};
use std::env;

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "PRICING_API_CONFIG";

pub const DEFAULT_CONFIG_PATH: &str = "pricing-api.toml";

const ENV_PREFIX: &str = "PRICING_API";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, multi-line (development).
    #[default]
    Pretty,
    /// One JSON object per event (production log shipping).
    Json,
}

/// Pricing API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingApiConfig {
    /// Interface to bind
    pub host: String,

    /// HTTP port
    pub port: u16,

    pub log_format: LogFormat,

    /// Max accepted request body in bytes
    pub body_limit_bytes: usize,

    /// Fee table override; unset fees keep their standard values
    pub fees: FeeSchedule,
}

impl Default for PricingApiConfig {
    fn default() -> Self {
        PricingApiConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_format: LogFormat::Pretty,
            body_limit_bytes: 64 * 1024,
            fees: FeeSchedule::STANDARD,
        }
    }
}

impl PricingApiConfig {
    /// Load configuration from the default file location and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load configuration from a specific file (which may be absent) and the environment.
    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::new(path, FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: PricingApiConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values the type system cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.port == 0 {
            return Err(ConfigError::InvalidValue("port".to_string()));
        }

        if self.body_limit_bytes == 0 {
            return Err(ConfigError::InvalidValue("body_limit_bytes".to_string()));
        }

        self.fees.validate()?;
        Ok(())
    }

    /// `host:port` for the listener.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Invalid fee configuration: {0}")]
    Fees(#[from] PricingError),
}
