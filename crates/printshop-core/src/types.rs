//! # Domain Types
//!
//! Wire types shared by the quote service and the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Pricing Types                                   │
//! │                                                                         │
//! │  ┌──────────────────────────┐        ┌──────────────────────────┐      │
//! │  │  PriceCalculationInput   │        │     PriceBreakdown       │      │
//! │  │  ──────────────────────  │        │  ──────────────────────  │      │
//! │  │  currency                │        │  currency                │      │
//! │  │  basePrice, quantity     │ ─────► │  lines: [PriceLine]      │      │
//! │  │  extraPlacements         │ calc   │  subtotal, discounts     │      │
//! │  │  label/image/embroidery  │        │  shipping, tax, total    │      │
//! │  │  membershipDiscountRate  │        │  isEstimate              │      │
//! │  │  shipping, tax: Charge   │        └──────────────────────────┘      │
//! │  └──────────────────────────┘                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All JSON field names are camelCase to match the storefront.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::DEFAULT_CURRENCY;

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 825 bps = 8.25%
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Charge Input
// =============================================================================

/// A caller-supplied shipping or tax amount.
///
/// `is_estimated = true` marks a provisional figure (storefront heuristic);
/// `false` means a provider-confirmed amount.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct ChargeInput {
    pub amount: f64,
    pub is_estimated: bool,
}

impl ChargeInput {
    /// A confirmed amount.
    pub fn confirmed(amount: f64) -> Self {
        ChargeInput {
            amount,
            is_estimated: false,
        }
    }

    /// A provisional amount.
    pub fn estimated(amount: f64) -> Self {
        ChargeInput {
            amount,
            is_estimated: true,
        }
    }
}

// =============================================================================
// Price Calculation Input
// =============================================================================

/// Everything the calculator needs to price one design.
///
/// Assembled by the caller from cart, variant and placement state. Every
/// field is optional on the wire; missing fields take the [`Default`]
/// values. Out-of-range values are not rejected here, the calculator
/// normalizes them (see [`crate::normalize`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct PriceCalculationInput {
    /// ISO 4217 code, echoed back on the breakdown.
    pub currency: String,

    /// Blank product price, including exactly one placement.
    pub base_price: f64,

    #[ts(type = "number")]
    pub quantity: i64,

    /// Placements beyond the first.
    #[ts(type = "number")]
    pub extra_placements: i64,

    pub has_inside_label: bool,
    pub has_outside_label: bool,
    pub is_premium_image: bool,
    pub is_embroidery: bool,

    /// Whether the one-time digitization fee applies to this design.
    /// Ignored unless `is_embroidery` is set.
    pub embroidery_digitization_fee_applicable: bool,

    /// Fraction of the subtotal discounted, 0.0 to 1.0.
    pub membership_discount_rate: f64,

    pub shipping: ChargeInput,
    pub tax: ChargeInput,
}

impl Default for PriceCalculationInput {
    fn default() -> Self {
        PriceCalculationInput {
            currency: DEFAULT_CURRENCY.to_string(),
            base_price: 0.0,
            quantity: 1,
            extra_placements: 0,
            has_inside_label: false,
            has_outside_label: false,
            is_premium_image: false,
            is_embroidery: false,
            embroidery_digitization_fee_applicable: false,
            membership_discount_rate: 0.0,
            shipping: ChargeInput::default(),
            tax: ChargeInput::default(),
        }
    }
}

// =============================================================================
// Price Line
// =============================================================================

/// One displayed row of a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceLine {
    pub label: String,

    /// Signed: the discount line is negative.
    pub amount: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub note: Option<String>,
}

impl PriceLine {
    pub fn new(label: impl Into<String>, amount: f64) -> Self {
        PriceLine {
            label: label.into(),
            amount,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Returns the amount as Money.
    #[inline]
    pub fn money(&self) -> Money {
        Money::from_amount(self.amount)
    }
}

// =============================================================================
// Price Breakdown
// =============================================================================

/// The computed price of a design, ready for display.
///
/// ## Invariants
/// - Every amount is rounded to cents
/// - `total == round2(subtotal + shipping + tax)`
/// - `lines` is in display order and never holds a zero conditional fee
/// - `discounts` is a positive magnitude; the discount line is negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PriceBreakdown {
    pub currency: String,
    pub lines: Vec<PriceLine>,

    /// After discount, before shipping and tax.
    pub subtotal: f64,

    pub discounts: f64,
    pub shipping: f64,
    pub tax: f64,
    pub total: f64,

    /// True when shipping or tax is provisional.
    pub is_estimate: bool,
}

impl PriceBreakdown {
    /// Finds a line by its label.
    pub fn line(&self, label: &str) -> Option<&PriceLine> {
        self.lines.iter().find(|l| l.label == label)
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total_money(&self) -> Money {
        Money::from_amount(self.total)
    }

    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal_money(&self) -> Money {
        Money::from_amount(self.subtotal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
