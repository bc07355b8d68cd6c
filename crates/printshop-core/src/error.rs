//! # Error Types
//!
//! Domain-specific error types for printshop-core.
//!
//! ## Where Errors Can Occur
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Boundaries                                │
//! │                                                                         │
//! │  calculate_price()          never fails, coerces every field           │
//! │                                                                         │
//! │  PriceCalculationInput::from_json_value()                              │
//! │  └── PricingError::NotAnObject   body is not a JSON object             │
//! │                                                                         │
//! │  FeeSchedule::validate()                                               │
//! │  └── PricingError::InvalidFee    negative / non-finite fee             │
//! │                                                                         │
//! │  Flow: PricingError → ApiError (pricing-api) → 400 JSON body           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, value)
//! 3. Errors are enum variants, never String

use thiserror::Error;

/// Boundary errors for the pricing core.
#[derive(Debug, Error)]
pub enum PricingError {
    /// The request could not be interpreted as an input object.
    ///
    /// ## When This Occurs
    /// - Body is a JSON array, string, number, bool or null
    /// - WASM caller passed a non-object value
    #[error("Price calculation input must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// A configured fee is unusable.
    #[error("Fee {fee} must be a whole-cent amount from 0 to 1000000 (got {amount})")]
    InvalidFee { fee: String, amount: f64 },
}

/// Convenience type alias for Results with PricingError.
pub type PricingResult<T> = Result<T, PricingError>;
