//! # Input Normalization
//!
//! All coercion lives here, so the arithmetic in [`crate::pricing`] can
//! assume clean values.
//!
//! ## Two Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  JSON body / JS object                                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  PriceCalculationInput::from_json_value()                              │
//! │  ├── not an object?  → PricingError::NotAnObject (only failure)        │
//! │  ├── wrong type?     → field default ("abc" → 0, "yes" → false)        │
//! │  └── numeric string? → parsed ("40" → 40)                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  normalize()                                                            │
//! │  ├── currency ""            → "USD"                                     │
//! │  ├── quantity < 1           → 1                                         │
//! │  ├── negative / NaN amounts → 0                                         │
//! │  ├── huge values            → ceiling (MAX_* below)                     │
//! │  └── discount rate          → clamped to [0, 1]                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  NormalizedInput (what the calculator reads)                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde_json::{Map, Value};

use crate::error::{PricingError, PricingResult};
use crate::types::{ChargeInput, PriceCalculationInput};
use crate::DEFAULT_CURRENCY;

/// Ceiling for a single amount: base price, shipping, tax, or a fee.
///
/// With the other ceilings every intermediate stays finite and well under
/// 2^53 cents, so rounding is exact and more items never cost less.
pub const MAX_UNIT_AMOUNT: f64 = 1_000_000.0;

/// Ceiling for the item count.
pub const MAX_QUANTITY: i64 = 100_000;

/// Ceiling for billed placements beyond the first.
pub const MAX_EXTRA_PLACEMENTS: i64 = 100;

/// A calculation input with every field in its valid domain.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedInput {
    pub currency: String,
    /// In [0, MAX_UNIT_AMOUNT].
    pub base_price: f64,
    /// In [1, MAX_QUANTITY].
    pub quantity: i64,
    /// In [0, MAX_EXTRA_PLACEMENTS].
    pub extra_placements: i64,
    pub has_inside_label: bool,
    pub has_outside_label: bool,
    pub is_premium_image: bool,
    /// `is_embroidery && embroidery_digitization_fee_applicable`.
    pub charges_digitization: bool,
    /// In [0, 1].
    pub membership_discount_rate: f64,
    /// Amount in [0, MAX_UNIT_AMOUNT].
    pub shipping: ChargeInput,
    /// Amount in [0, MAX_UNIT_AMOUNT].
    pub tax: ChargeInput,
}

/// Brings every field of a typed input into its valid domain.
pub fn normalize(input: &PriceCalculationInput) -> NormalizedInput {
    let currency = if input.currency.is_empty() {
        DEFAULT_CURRENCY.to_string()
    } else {
        input.currency.clone()
    };

    NormalizedInput {
        currency,
        base_price: capped_amount(input.base_price),
        quantity: input.quantity.clamp(1, MAX_QUANTITY),
        extra_placements: input.extra_placements.clamp(0, MAX_EXTRA_PLACEMENTS),
        has_inside_label: input.has_inside_label,
        has_outside_label: input.has_outside_label,
        is_premium_image: input.is_premium_image,
        charges_digitization: input.is_embroidery && input.embroidery_digitization_fee_applicable,
        membership_discount_rate: unit_interval(input.membership_discount_rate),
        shipping: normalize_charge(input.shipping),
        tax: normalize_charge(input.tax),
    }
}

fn normalize_charge(charge: ChargeInput) -> ChargeInput {
    ChargeInput {
        amount: capped_amount(charge.amount),
        is_estimated: charge.is_estimated,
    }
}

#[inline]
fn capped_amount(x: f64) -> f64 {
    non_negative(x).min(MAX_UNIT_AMOUNT)
}

/// Finite and >= 0, else 0.
#[inline]
fn non_negative(x: f64) -> f64 {
    if x.is_finite() && x > 0.0 {
        x
    } else {
        0.0
    }
}

/// Finite and within [0, 1], else the nearest bound (NaN → 0).
#[inline]
fn unit_interval(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

// =============================================================================
// Lenient JSON Decoding
// =============================================================================

impl PriceCalculationInput {
    /// Reads an input from arbitrary JSON, coercing each field.
    ///
    /// The only failure is a value that is not an object at all. Fields of
    /// the wrong type fall back to their defaults instead of rejecting the
    /// request, so a price can always be shown.
    ///
    /// ## Example
    /// ```rust
    /// use printshop_core::PriceCalculationInput;
    /// use serde_json::json;
    ///
    /// let input = PriceCalculationInput::from_json_value(&json!({
    ///     "basePrice": "40",
    ///     "quantity": -3,
    ///     "hasInsideLabel": "yes",
    /// })).unwrap();
    ///
    /// assert_eq!(input.base_price, 40.0);
    /// assert_eq!(input.quantity, 1);
    /// assert!(!input.has_inside_label);
    ///
    /// assert!(PriceCalculationInput::from_json_value(&json!([1, 2])).is_err());
    /// ```
    pub fn from_json_value(value: &Value) -> PricingResult<Self> {
        let obj = value.as_object().ok_or(PricingError::NotAnObject {
            found: json_type_name(value),
        })?;

        let currency = match obj.get("currency") {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            _ => DEFAULT_CURRENCY.to_string(),
        };

        Ok(PriceCalculationInput {
            currency,
            base_price: number(obj, "basePrice").map(non_negative).unwrap_or(0.0),
            quantity: number(obj, "quantity").map(to_count).unwrap_or(1).max(1),
            extra_placements: number(obj, "extraPlacements").map(to_count).unwrap_or(0).max(0),
            has_inside_label: flag(obj, "hasInsideLabel"),
            has_outside_label: flag(obj, "hasOutsideLabel"),
            is_premium_image: flag(obj, "isPremiumImage"),
            is_embroidery: flag(obj, "isEmbroidery"),
            embroidery_digitization_fee_applicable: flag(obj, "embroideryDigitizationFeeApplicable"),
            membership_discount_rate: number(obj, "membershipDiscountRate")
                .map(unit_interval)
                .unwrap_or(0.0),
            shipping: charge(obj, "shipping"),
            tax: charge(obj, "tax"),
        })
    }
}

/// Reads a numeric field. Accepts JSON numbers and numeric strings.
fn number(obj: &Map<String, Value>, key: &str) -> Option<f64> {
    let x = match obj.get(key)? {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    x.is_finite().then_some(x)
}

/// Truncates toward zero; `as` saturates beyond i64.
#[inline]
fn to_count(x: f64) -> i64 {
    x.trunc() as i64
}

/// Only a literal JSON `true` counts.
fn flag(obj: &Map<String, Value>, key: &str) -> bool {
    matches!(obj.get(key), Some(Value::Bool(true)))
}

fn charge(obj: &Map<String, Value>, key: &str) -> ChargeInput {
    match obj.get(key) {
        Some(Value::Object(inner)) => ChargeInput {
            amount: number(inner, "amount").map(non_negative).unwrap_or(0.0),
            is_estimated: flag(inner, "isEstimated"),
        },
        _ => ChargeInput::default(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn decode(value: Value) -> PriceCalculationInput {
        PriceCalculationInput::from_json_value(&value).unwrap()
    }

    #[test]
    fn test_empty_object_is_all_defaults() {
        assert_eq!(decode(json!({})), PriceCalculationInput::default());
    }

    #[test]
    fn test_non_objects_are_rejected() {
        for (value, found) in [
            (json!(null), "null"),
            (json!([1, 2]), "array"),
            (json!("hello"), "string"),
            (json!(42), "number"),
            (json!(true), "boolean"),
        ] {
            let err = PriceCalculationInput::from_json_value(&value).unwrap_err();
            assert!(matches!(err, PricingError::NotAnObject { found: f } if f == found));
        }
    }

    #[test]
    fn test_quantity_coercion() {
        assert_eq!(decode(json!({ "quantity": 0 })).quantity, 1);
        assert_eq!(decode(json!({ "quantity": -4 })).quantity, 1);
        assert_eq!(decode(json!({ "quantity": "abc" })).quantity, 1);
        assert_eq!(decode(json!({ "quantity": null })).quantity, 1);
        assert_eq!(decode(json!({ "quantity": 2.9 })).quantity, 2);
        assert_eq!(decode(json!({ "quantity": "3" })).quantity, 3);
        assert_eq!(decode(json!({ "quantity": 1e300 })).quantity, i64::MAX);
    }

    #[test]
    fn test_numbers_coerced_to_non_negative() {
        let input = decode(json!({
            "basePrice": -10,
            "extraPlacements": -2,
            "shipping": { "amount": -5, "isEstimated": true },
            "tax": { "amount": "4.5" }
        }));
        assert_eq!(input.base_price, 0.0);
        assert_eq!(input.extra_placements, 0);
        assert_eq!(input.shipping, ChargeInput::estimated(0.0));
        assert_eq!(input.tax, ChargeInput::confirmed(4.5));
    }

    #[test]
    fn test_flags_require_literal_true() {
        let input = decode(json!({
            "hasInsideLabel": true,
            "hasOutsideLabel": "true",
            "isPremiumImage": 1,
            "isEmbroidery": null,
        }));
        assert!(input.has_inside_label);
        assert!(!input.has_outside_label);
        assert!(!input.is_premium_image);
        assert!(!input.is_embroidery);
    }

    #[test]
    fn test_discount_rate_clamped() {
        assert_eq!(decode(json!({ "membershipDiscountRate": 1.5 })).membership_discount_rate, 1.0);
        assert_eq!(decode(json!({ "membershipDiscountRate": -0.2 })).membership_discount_rate, 0.0);
        assert_eq!(decode(json!({ "membershipDiscountRate": 0.15 })).membership_discount_rate, 0.15);
        assert_eq!(decode(json!({ "membershipDiscountRate": [] })).membership_discount_rate, 0.0);
    }

    #[test]
    fn test_currency_defaults() {
        assert_eq!(decode(json!({ "currency": "" })).currency, "USD");
        assert_eq!(decode(json!({ "currency": 978 })).currency, "USD");
        assert_eq!(decode(json!({ "currency": "EUR" })).currency, "EUR");
    }

    #[test]
    fn test_charge_that_is_not_an_object() {
        let input = decode(json!({ "shipping": 12, "tax": "3" }));
        assert_eq!(input.shipping, ChargeInput::default());
        assert_eq!(input.tax, ChargeInput::default());
    }

    #[test]
    fn test_normalize_typed_input() {
        let input = PriceCalculationInput {
            currency: String::new(),
            base_price: f64::NAN,
            quantity: 0,
            extra_placements: -1,
            is_embroidery: false,
            embroidery_digitization_fee_applicable: true,
            membership_discount_rate: f64::INFINITY,
            shipping: ChargeInput::estimated(f64::NEG_INFINITY),
            ..PriceCalculationInput::default()
        };

        let n = normalize(&input);
        assert_eq!(n.currency, "USD");
        assert_eq!(n.base_price, 0.0);
        assert_eq!(n.quantity, 1);
        assert_eq!(n.extra_placements, 0);
        assert!(!n.charges_digitization);
        assert_eq!(n.membership_discount_rate, 1.0);
        assert_eq!(n.shipping, ChargeInput::estimated(0.0));
    }

    #[test]
    fn test_out_of_range_number_is_dropped() {
        let value: Value = serde_json::from_str(r#"{"basePrice": 1e400, "quantity": 2}"#).unwrap();
        let input = decode(value);
        assert_eq!(input.base_price, 0.0);
        assert_eq!(input.quantity, 2);
    }

    #[test]
    fn test_normalize_applies_ceilings() {
        let input = PriceCalculationInput {
            base_price: 1e307,
            quantity: i64::MAX,
            extra_placements: i64::MAX,
            shipping: ChargeInput::confirmed(f64::MAX),
            tax: ChargeInput::estimated(2e6),
            ..PriceCalculationInput::default()
        };

        let n = normalize(&input);
        assert_eq!(n.base_price, MAX_UNIT_AMOUNT);
        assert_eq!(n.quantity, MAX_QUANTITY);
        assert_eq!(n.extra_placements, MAX_EXTRA_PLACEMENTS);
        assert_eq!(n.shipping, ChargeInput::confirmed(MAX_UNIT_AMOUNT));
        assert_eq!(n.tax, ChargeInput::estimated(MAX_UNIT_AMOUNT));
    }

    #[test]
    fn test_digitization_needs_both_flags() {
        let input = PriceCalculationInput {
            is_embroidery: true,
            embroidery_digitization_fee_applicable: true,
            ..PriceCalculationInput::default()
        };
        assert!(normalize(&input).charges_digitization);

        let input = PriceCalculationInput {
            is_embroidery: true,
            ..PriceCalculationInput::default()
        };
        assert!(!normalize(&input).charges_digitization);
    }
}
