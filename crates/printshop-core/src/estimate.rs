//! # Storefront Estimator
//!
//! Helpers for the client side of pricing: assembling an input from the
//! design editor's state, filling in provisional shipping/tax, and
//! reconciling the local result with the quote service.
//!
//! ## Client Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  variant + placements + options                                        │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  build_input()            extraPlacements = non-empty placements − 1   │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  estimate_with_charges()  ShippingTaxEstimator (provisional amounts)   │
//! │          │                                                              │
//! │          ├──────────► render immediately (local)                        │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  POST /api/pricing/quote                                               │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  reconcile(local, server)  server wins; failure keeps local            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::pricing::calculate_price;
use crate::types::{ChargeInput, PriceBreakdown, PriceCalculationInput, TaxRate};

// =============================================================================
// Input Assembly
// =============================================================================

/// Price and currency of the selected product variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantPrice {
    pub retail_price: f64,
    pub currency: String,
}

/// One print location on the product and how many layers the design put there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignPlacement {
    /// e.g. "front", "back", "sleeve_left"
    pub placement: String,
    pub layer_count: usize,
}

impl DesignPlacement {
    pub fn is_empty(&self) -> bool {
        self.layer_count == 0
    }
}

/// Per-design options chosen in the editor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CustomizationOptions {
    pub has_inside_label: bool,
    pub has_outside_label: bool,
    pub is_premium_image: bool,
    pub is_embroidery: bool,
    pub embroidery_digitization_fee_applicable: bool,
    pub membership_discount_rate: f64,
}

/// Number of placements billed beyond the first.
///
/// The first non-empty placement is included in the base price; empty
/// placements are free.
pub fn count_extra_placements(placements: &[DesignPlacement]) -> i64 {
    let used = placements.iter().filter(|p| !p.is_empty()).count() as i64;
    (used - 1).max(0)
}

/// Assembles a calculation input from editor state. Shipping and tax start
/// at zero; see [`estimate_with_charges`].
pub fn build_input(
    variant: &VariantPrice,
    placements: &[DesignPlacement],
    options: &CustomizationOptions,
    quantity: i64,
) -> PriceCalculationInput {
    PriceCalculationInput {
        currency: variant.currency.clone(),
        base_price: variant.retail_price,
        quantity,
        extra_placements: count_extra_placements(placements),
        has_inside_label: options.has_inside_label,
        has_outside_label: options.has_outside_label,
        is_premium_image: options.is_premium_image,
        is_embroidery: options.is_embroidery,
        embroidery_digitization_fee_applicable: options.embroidery_digitization_fee_applicable,
        membership_discount_rate: options.membership_discount_rate,
        shipping: ChargeInput::default(),
        tax: ChargeInput::default(),
    }
}

// =============================================================================
// Shipping & Tax Estimation
// =============================================================================

/// Where the order ships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    /// ISO 3166-1 alpha-2
    pub country: String,
    #[serde(default)]
    pub region: Option<String>,
}

/// Amounts returned by a shipping/tax estimation service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingTaxEstimate {
    pub shipping_amount: f64,
    pub tax_amount: f64,
}

impl ShippingTaxEstimate {
    /// Writes the amounts into an input, flagged as estimated.
    pub fn apply_to(&self, input: &mut PriceCalculationInput) {
        input.shipping = ChargeInput::estimated(self.shipping_amount);
        input.tax = ChargeInput::estimated(self.tax_amount);
    }
}

/// A source of provisional shipping and tax amounts.
pub trait ShippingTaxEstimator {
    /// `merchandise_subtotal` is the discounted subtotal before shipping and tax.
    fn estimate(
        &self,
        destination: &Destination,
        merchandise_subtotal: Money,
        quantity: i64,
    ) -> ShippingTaxEstimate;
}

/// Placeholder heuristic: flat shipping per order plus a per-additional-item
/// charge, and a single sales tax rate for one home country.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRateEstimator {
    pub first_item: Money,
    pub additional_item: Money,
    pub international_surcharge: Money,
    pub home_country: String,
    pub tax_rate: TaxRate,
}

impl Default for FlatRateEstimator {
    fn default() -> Self {
        FlatRateEstimator {
            first_item: Money::from_cents(499),
            additional_item: Money::from_cents(200),
            international_surcharge: Money::from_cents(1000),
            home_country: "US".to_string(),
            tax_rate: TaxRate::from_bps(800),
        }
    }
}

impl ShippingTaxEstimator for FlatRateEstimator {
    fn estimate(
        &self,
        destination: &Destination,
        merchandise_subtotal: Money,
        quantity: i64,
    ) -> ShippingTaxEstimate {
        let domestic = destination.country.eq_ignore_ascii_case(&self.home_country);

        let mut shipping = self.first_item + self.additional_item * (quantity.max(1) - 1);
        if !domestic {
            shipping += self.international_surcharge;
        }

        // Only home-country orders collect sales tax
        let tax = if domestic {
            merchandise_subtotal.calculate_tax(self.tax_rate)
        } else {
            Money::zero()
        };

        ShippingTaxEstimate {
            shipping_amount: shipping.to_amount(),
            tax_amount: tax.to_amount(),
        }
    }
}

/// Prices the input locally with estimated shipping and tax filled in.
///
/// Runs the calculator twice: once without charges to get the merchandise
/// subtotal the estimator taxes, then with the estimate applied.
pub fn estimate_with_charges<E: ShippingTaxEstimator + ?Sized>(
    input: &PriceCalculationInput,
    estimator: &E,
    destination: &Destination,
) -> PriceBreakdown {
    let merchandise = calculate_price(&PriceCalculationInput {
        shipping: ChargeInput::default(),
        tax: ChargeInput::default(),
        ..input.clone()
    });

    let estimate = estimator.estimate(destination, merchandise.subtotal_money(), input.quantity);

    let mut priced = input.clone();
    estimate.apply_to(&mut priced);
    calculate_price(&priced)
}

// =============================================================================
// Reconciliation
// =============================================================================

/// Which side produced a displayed breakdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    /// The quote service; authoritative.
    Server,
    /// Computed in-process; shown while the server is slow or unreachable.
    Local,
}

/// A breakdown ready to display, with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub breakdown: PriceBreakdown,
    pub source: QuoteSource,
    /// The server answer replaced a different local estimate.
    pub corrected: bool,
}

/// Chooses what to display. The server result always wins when present.
pub fn reconcile(local: PriceBreakdown, authoritative: Option<PriceBreakdown>) -> Quote {
    match authoritative {
        Some(server) => {
            let corrected = server != local;
            Quote {
                breakdown: server,
                source: QuoteSource::Server,
                corrected,
            }
        }
        None => Quote {
            breakdown: local,
            source: QuoteSource::Local,
            corrected: false,
        },
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
