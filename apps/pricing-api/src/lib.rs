//! # Printshop Pricing API
//!
//! HTTP authority for storefront prices. The storefront shows its own
//! in-browser estimate instantly and replaces it with this service's answer.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing API Service                             │
//! │                                                                         │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────────┐│
//! │  │  routes        │  │  error         │  │  config                    ││
//! │  │                │  │                │  │                            ││
//! │  │ • POST quote   │  │ • ApiError     │  │ • defaults < TOML < env    ││
//! │  │ • GET health   │  │   → 400 JSON   │  │ • fee schedule override    ││
//! │  └───────┬────────┘  └────────────────┘  └────────────────────────────┘│
//! │          │                                                              │
//! │          ▼                                                              │
//! │  ┌────────────────────────────┐   ┌──────────────────────────────────┐ │
//! │  │  printshop-core            │   │  client                          │ │
//! │  │  calculate_price_with      │◄──│  QuoteClient: server, else local │ │
//! │  └────────────────────────────┘   └──────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! See [`config`]. Common environment variables:
//! - `PRICING_API_PORT` - HTTP port (default: 8080)
//! - `PRICING_API_LOG_FORMAT` - `pretty` or `json`
//! - `RUST_LOG` - log filter (default: `info`)

pub mod client;
pub mod config;
pub mod error;
pub mod routes;

use printshop_core::FeeSchedule;
use tracing_subscriber::EnvFilter;

// Re-exports
pub use client::{ClientError, QuoteClient};
pub use config::{ConfigError, LogFormat, PricingApiConfig};
pub use error::ApiError;
pub use routes::router;

/// Shared application state.
pub struct AppState {
    pub config: PricingApiConfig,
    pub fees: FeeSchedule,
}

impl AppState {
    pub fn new(config: PricingApiConfig) -> Self {
        let fees = config.fees;
        AppState { config, fees }
    }
}

/// Installs the global subscriber. Later calls are no-ops.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    let _ = match format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
