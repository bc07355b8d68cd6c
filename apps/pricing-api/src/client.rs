//! # Quote Client
//!
//! Storefront-side caller of `POST /api/pricing/quote`.
//!
//! ```text
//! quote_or_estimate(input)
//!   ├── local  = calculate_price(input)        (always, in-process)
//!   ├── server = POST /api/pricing/quote       (may fail)
//!   └── reconcile(local, server.ok())          (server wins when present)
//! ```
//!
//! A failed server call never surfaces to the shopper; the local
//! breakdown is shown instead and the failure is logged.

use std::time::Duration;

use printshop_core::estimate::{reconcile, Quote};
use printshop_core::{calculate_price_with, FeeSchedule, PriceBreakdown, PriceCalculationInput};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::routes::QUOTE_PATH;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Quote client errors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Quote service returned {status}: {message}")]
    Status { status: StatusCode, message: String },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// HTTP client for the quote service.
#[derive(Debug, Clone)]
pub struct QuoteClient {
    http: reqwest::Client,
    endpoint: String,
    fees: FeeSchedule,
}

impl QuoteClient {
    /// `base_url` is the service root, e.g. `http://127.0.0.1:8080`.
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(QuoteClient {
            http,
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), QUOTE_PATH),
            fees: FeeSchedule::STANDARD,
        })
    }

    /// Fee table for the local fallback. Should match the server's.
    pub fn with_fees(mut self, fees: FeeSchedule) -> Self {
        self.fees = fees;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetches the authoritative breakdown.
    pub async fn quote(&self, input: &PriceCalculationInput) -> Result<PriceBreakdown, ClientError> {
        let response = self.http.post(&self.endpoint).json(input).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body.message,
                Err(_) => status.canonical_reason().unwrap_or("unknown").to_string(),
            };
            return Err(ClientError::Status { status, message });
        }

        Ok(response.json::<PriceBreakdown>().await?)
    }

    /// Server quote when reachable, local calculation otherwise.
    pub async fn quote_or_estimate(&self, input: &PriceCalculationInput) -> Quote {
        let local = calculate_price_with(input, &self.fees);

        let authoritative = match self.quote(input).await {
            Ok(breakdown) => Some(breakdown),
            Err(e) => {
                tracing::warn!(endpoint = %self.endpoint, error = %e, "quote service unavailable, using local estimate");
                None
            }
        };

        let quote = reconcile(local, authoritative);
        if quote.corrected {
            tracing::info!(total = quote.breakdown.total, "local estimate corrected by quote service");
        }
        quote
    }
}
