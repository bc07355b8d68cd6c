//! # printshop-core: Pure Pricing Logic for the Printshop Storefront
//!
//! This crate is the **heart** of storefront pricing. It turns a design's
//! configuration into a price breakdown as a pure function with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Printshop Pricing Architecture                      │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │   Storefront (browser)       │   │   pricing-api (server)       │   │
//! │  │   design editor, cart        │   │   POST /api/pricing/quote    │   │
//! │  │   instant estimate (WASM)    │   │   authoritative quote        │   │
//! │  └──────────────┬───────────────┘   └──────────────┬───────────────┘   │
//! │                 │                                  │                    │
//! │  ┌──────────────▼──────────────────────────────────▼───────────────┐   │
//! │  │               ★ printshop-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ normalize │  │  pricing  │  │   fees    │  │  estimate │  │   │
//! │  │   │ coercion  │─►│ calculate │◄─│ FeeSched. │  │ reconcile │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RANDOMNESS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire types (input, breakdown, lines)
//! - [`money`] - Cent rounding and the `Money` type
//! - [`fees`] - The customization fee table
//! - [`normalize`] - Lenient coercion of caller input
//! - [`pricing`] - The calculator
//! - [`estimate`] - Storefront-side estimation and reconciliation
//! - [`error`] - Boundary error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, bit-identical output, on every runtime
//! 2. **No I/O**: network, file system and clocks are FORBIDDEN here
//! 3. **Round Every Step**: each intermediate amount is rounded to cents
//! 4. **Never Block Checkout**: bad fields are coerced, not rejected
//!
//! ## Example Usage
//!
//! ```rust
//! use printshop_core::{calculate_price, ChargeInput, PriceCalculationInput};
//!
//! let breakdown = calculate_price(&PriceCalculationInput {
//!     base_price: 50.0,
//!     shipping: ChargeInput::estimated(5.0),
//!     tax: ChargeInput::confirmed(4.0),
//!     ..PriceCalculationInput::default()
//! });
//!
//! assert_eq!(breakdown.total, 59.0);
//! assert!(breakdown.is_estimate);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod estimate;
pub mod fees;
pub mod money;
pub mod normalize;
pub mod pricing;
pub mod types;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{PricingError, PricingResult};
pub use fees::FeeSchedule;
pub use money::{round2, Money};
pub use pricing::{calculate_price, calculate_price_with};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Currency used when the caller supplies none.
pub const DEFAULT_CURRENCY: &str = "USD";
