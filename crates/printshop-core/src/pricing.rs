//! # Pricing Calculator
//!
//! Turns a [`PriceCalculationInput`] into a [`PriceBreakdown`].
//!
//! ## Computation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every arrow is followed by round2(), not just the last one.           │
//! │                                                                         │
//! │  base            = basePrice × qty                                      │
//! │  customization   = (extra×3.00 + inside 2.00 + outside 2.00            │
//! │                     + premium 1.00) × qty                               │
//! │  digitization    = 6.00 once (embroidery + applicable)                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  before discount = base + customization + digitization                  │
//! │  discount        = before discount × membership rate                    │
//! │  subtotal        = before discount − discount                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  total           = subtotal + shipping + tax                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storefront runs this same code compiled to WASM, and the quote
//! service runs it natively. Rounding after each step keeps both on the
//! same cent regardless of runtime.

use crate::fees::FeeSchedule;
use crate::money::{round2, Money};
use crate::normalize::{normalize, NormalizedInput};
use crate::types::{PriceBreakdown, PriceCalculationInput, PriceLine};

pub const LABEL_BASE: &str = "Base (incl. 1 placement)";
pub const LABEL_EXTRA_PLACEMENTS: &str = "Extra placements";
pub const LABEL_INSIDE_LABEL: &str = "Inside label";
pub const LABEL_OUTSIDE_LABEL: &str = "Outside label";
pub const LABEL_PREMIUM_IMAGE: &str = "Premium image";
pub const LABEL_DIGITIZATION: &str = "Embroidery digitization";
pub const LABEL_DISCOUNT: &str = "Membership discount";
pub const LABEL_SHIPPING: &str = "Shipping";
pub const LABEL_SHIPPING_ESTIMATED: &str = "Shipping (estimated)";
pub const LABEL_TAX: &str = "Tax";
pub const LABEL_TAX_ESTIMATED: &str = "Tax (estimated)";

/// Prices a design with the standard fee table.
///
/// Never fails: malformed fields were already coerced to defaults, and
/// out-of-range values are normalized here.
///
/// ## Example
/// ```rust
/// use printshop_core::{calculate_price, PriceCalculationInput};
///
/// let breakdown = calculate_price(&PriceCalculationInput {
///     base_price: 40.0,
///     quantity: 2,
///     extra_placements: 1,
///     has_inside_label: true,
///     ..PriceCalculationInput::default()
/// });
///
/// assert_eq!(breakdown.subtotal, 90.0);
/// assert_eq!(breakdown.total, 90.0);
/// ```
pub fn calculate_price(input: &PriceCalculationInput) -> PriceBreakdown {
    calculate_price_with(input, &FeeSchedule::STANDARD)
}

/// Prices a design with a caller-provided fee table.
pub fn calculate_price_with(input: &PriceCalculationInput, fees: &FeeSchedule) -> PriceBreakdown {
    let n = normalize(input);
    let qty = n.quantity as f64;

    let base = round2(n.base_price * qty);

    // Per-item fees, summed in table order
    let extra_placement_per_item = if n.extra_placements > 0 {
        fees.extra_placement * n.extra_placements as f64
    } else {
        0.0
    };
    let inside_per_item = if n.has_inside_label { fees.inside_label } else { 0.0 };
    let outside_per_item = if n.has_outside_label { fees.outside_label } else { 0.0 };
    let premium_per_item = if n.is_premium_image { fees.premium_image } else { 0.0 };

    let customization_per_item =
        extra_placement_per_item + inside_per_item + outside_per_item + premium_per_item;
    let customization_fees = round2(customization_per_item * qty);

    // One-time: never scaled by quantity
    let digitization = if n.charges_digitization {
        round2(fees.embroidery_digitization)
    } else {
        0.0
    };

    let subtotal_before_discount = round2(base + customization_fees + digitization);
    let discount = round2(subtotal_before_discount * n.membership_discount_rate);
    let subtotal = round2(subtotal_before_discount - discount);

    let shipping = round2(n.shipping.amount);
    let tax = round2(n.tax.amount);
    let total = round2(subtotal + shipping + tax);

    let lines = build_lines(
        &n,
        fees,
        LineAmounts {
            base,
            extra_placements: round2(extra_placement_per_item * qty),
            inside_label: round2(inside_per_item * qty),
            outside_label: round2(outside_per_item * qty),
            premium_image: round2(premium_per_item * qty),
            digitization,
            discount,
            shipping,
            tax,
        },
    );

    PriceBreakdown {
        currency: n.currency,
        lines,
        subtotal,
        discounts: discount,
        shipping,
        tax,
        total,
        is_estimate: n.shipping.is_estimated || n.tax.is_estimated,
    }
}

/// Rounded amount of each potential line.
struct LineAmounts {
    base: f64,
    extra_placements: f64,
    inside_label: f64,
    outside_label: f64,
    premium_image: f64,
    digitization: f64,
    discount: f64,
    shipping: f64,
    tax: f64,
}

/// Lays the lines out in display order, skipping every zero conditional line.
fn build_lines(n: &NormalizedInput, fees: &FeeSchedule, amounts: LineAmounts) -> Vec<PriceLine> {
    let mut lines = vec![PriceLine::new(LABEL_BASE, amounts.base)];

    if amounts.extra_placements > 0.0 {
        lines.push(
            PriceLine::new(LABEL_EXTRA_PLACEMENTS, amounts.extra_placements).with_note(format!(
                "{} × {} {} per item",
                n.extra_placements,
                Money::from_amount(fees.extra_placement).amount_string(),
                n.currency
            )),
        );
    }

    let per_item_fees = [
        (LABEL_INSIDE_LABEL, amounts.inside_label, fees.inside_label),
        (LABEL_OUTSIDE_LABEL, amounts.outside_label, fees.outside_label),
        (LABEL_PREMIUM_IMAGE, amounts.premium_image, fees.premium_image),
    ];
    for (label, amount, fee) in per_item_fees {
        if amount > 0.0 {
            lines.push(PriceLine::new(label, amount).with_note(per_item_note(fee, &n.currency)));
        }
    }

    if amounts.digitization > 0.0 {
        lines.push(PriceLine::new(LABEL_DIGITIZATION, amounts.digitization).with_note("One-time fee"));
    }

    if amounts.discount > 0.0 {
        lines.push(
            PriceLine::new(LABEL_DISCOUNT, -amounts.discount)
                .with_note(format!("{} off", format_rate(n.membership_discount_rate))),
        );
    }

    if amounts.shipping > 0.0 {
        let label = if n.shipping.is_estimated {
            LABEL_SHIPPING_ESTIMATED
        } else {
            LABEL_SHIPPING
        };
        lines.push(PriceLine::new(label, amounts.shipping));
    }

    if amounts.tax > 0.0 {
        let label = if n.tax.is_estimated {
            LABEL_TAX_ESTIMATED
        } else {
            LABEL_TAX
        };
        lines.push(PriceLine::new(label, amounts.tax));
    }

    lines
}

fn per_item_note(fee: f64, currency: &str) -> String {
    format!("{} {} per item", Money::from_amount(fee).amount_string(), currency)
}

/// `0.1` → `"10%"`, `0.125` → `"12.5%"`.
fn format_rate(rate: f64) -> String {
    let pct = round2(rate * 100.0);
    if pct.fract() == 0.0 {
        format!("{:.0}%", pct)
    } else {
        format!("{}%", pct)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
