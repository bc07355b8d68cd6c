//! # Fee Schedule
//!
//! The customization fee table. Defaults are business constants: existing
//! quotes were issued with them, so they must not change silently.
//!
//! | fee                      | default | charged         |
//! |--------------------------|---------|-----------------|
//! | extra placement          | 3.00    | per item, each  |
//! | inside label             | 2.00    | per item        |
//! | outside label            | 2.00    | per item        |
//! | premium image            | 1.00    | per item        |
//! | embroidery digitization  | 6.00    | once per design |
//!
//! A custom schedule can be injected with
//! [`calculate_price_with`](crate::pricing::calculate_price_with), e.g. to
//! check the algorithm with round numbers or to apply an operator override.

use serde::{Deserialize, Serialize};

use crate::error::PricingError;
use crate::money::round2;
use crate::normalize::MAX_UNIT_AMOUNT;

pub const EXTRA_PLACEMENT_FEE: f64 = 3.00;
pub const INSIDE_LABEL_FEE: f64 = 2.00;
pub const OUTSIDE_LABEL_FEE: f64 = 2.00;
pub const PREMIUM_IMAGE_FEE: f64 = 1.00;
pub const EMBROIDERY_DIGITIZATION_FEE: f64 = 6.00;

/// Fee amounts used by the calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// Per item, per placement beyond the first.
    pub extra_placement: f64,
    pub inside_label: f64,
    pub outside_label: f64,
    pub premium_image: f64,
    /// One-time, never multiplied by quantity.
    pub embroidery_digitization: f64,
}

impl FeeSchedule {
    /// The production fee table.
    pub const STANDARD: FeeSchedule = FeeSchedule {
        extra_placement: EXTRA_PLACEMENT_FEE,
        inside_label: INSIDE_LABEL_FEE,
        outside_label: OUTSIDE_LABEL_FEE,
        premium_image: PREMIUM_IMAGE_FEE,
        embroidery_digitization: EMBROIDERY_DIGITIZATION_FEE,
    };

    /// Rejects fees that are negative, non-finite, above
    /// [`MAX_UNIT_AMOUNT`], or not a whole number of cents.
    ///
    /// Whole cents keep the per-item lines summing exactly to the subtotal.
    /// The calculator itself never validates; this runs where a schedule
    /// enters the system (configuration load).
    pub fn validate(&self) -> Result<(), PricingError> {
        let fees = [
            ("extra_placement", self.extra_placement),
            ("inside_label", self.inside_label),
            ("outside_label", self.outside_label),
            ("premium_image", self.premium_image),
            ("embroidery_digitization", self.embroidery_digitization),
        ];

        for (name, amount) in fees {
            let in_range = amount.is_finite() && (0.0..=MAX_UNIT_AMOUNT).contains(&amount);
            if !in_range || round2(amount) != amount {
                return Err(PricingError::InvalidFee {
                    fee: name.to_string(),
                    amount,
                });
            }
        }

        Ok(())
    }
}

impl Default for FeeSchedule {
    fn default() -> Self {
        FeeSchedule::STANDARD
    }
}
