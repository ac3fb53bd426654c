//! Pricing calculator for Kiloan (per-kg) and Satuan (per-item) services
//!
//! [`compute_price`] is pure: it validates a quantity against the bounds of
//! the billing type and multiplies it by the unit price. Rules are evaluated
//! in order and the first failure wins:
//!
//! 1. the quantity must be a finite number above zero (`InvalidQuantity`)
//! 2. per-weight: at most [`MAX_WEIGHT_KG`] kilograms (`QuantityOutOfRange`)
//! 3. per-unit: a whole number of at most [`MAX_UNITS`] items (`QuantityOutOfRange`)
//!
//! Totals are computed in decimal and rounded half away from zero to whole
//! Rupiah.

pub mod attempt;
pub mod currency;

pub use attempt::{PricingAttempt, PricingState, step_units, step_weight};
pub use currency::format_rupiah;

use crate::core::catalog::{BillingType, Service};
use crate::core::error::{PricingError, QuantityLimit};
use crate::core::wire::round_whole;
use rust_decimal::prelude::*;

/// Upper bound for per-weight orders, in kilograms
pub const MAX_WEIGHT_KG: u32 = 100;

/// Upper bound for per-unit orders, in items
pub const MAX_UNITS: u32 = 999;

/// A quantity as the operator supplied it
#[derive(Debug, Clone, PartialEq)]
pub enum QuantityInput {
    /// Typed text; a decimal comma (`"2,5"`) is accepted
    Text(String),
    /// A float from a numeric widget
    Number(f64),
    Exact(Decimal),
}

impl QuantityInput {
    /// The value as a float, `None` when the input is not numeric
    pub fn to_f64(&self) -> Option<f64> {
        match self {
            QuantityInput::Text(raw) => normalize_text(raw)?.parse().ok(),
            QuantityInput::Number(f) => Some(*f),
            QuantityInput::Exact(d) => d.to_f64(),
        }
    }

    /// The exact value, `None` when not a finite number or outside the
    /// range `Decimal` can hold
    pub fn to_decimal(&self) -> Option<Decimal> {
        match self {
            QuantityInput::Text(raw) => {
                let normalized = normalize_text(raw)?;
                Decimal::from_str(&normalized)
                    .or_else(|_| Decimal::from_scientific(&normalized))
                    .ok()
            }
            // Shortest round-trip text keeps 0.1 as 0.1
            QuantityInput::Number(f) if f.is_finite() => Decimal::from_str(&f.to_string()).ok(),
            QuantityInput::Number(_) => None,
            QuantityInput::Exact(d) => Some(*d),
        }
        .map(|d| d.normalize())
    }

    fn describe(&self) -> String {
        match self {
            QuantityInput::Text(raw) => raw.clone(),
            QuantityInput::Number(f) => f.to_string(),
            QuantityInput::Exact(d) => d.to_string(),
        }
    }
}

/// Trimmed text with a decimal comma turned into a point
fn normalize_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if trimmed.contains('.') {
        Some(trimmed.to_string())
    } else {
        Some(trimmed.replace(',', "."))
    }
}

impl From<&str> for QuantityInput {
    fn from(raw: &str) -> Self {
        QuantityInput::Text(raw.to_string())
    }
}

impl From<String> for QuantityInput {
    fn from(raw: String) -> Self {
        QuantityInput::Text(raw)
    }
}

impl From<f64> for QuantityInput {
    fn from(f: f64) -> Self {
        QuantityInput::Number(f)
    }
}

impl From<i64> for QuantityInput {
    fn from(n: i64) -> Self {
        QuantityInput::Exact(Decimal::from(n))
    }
}

impl From<u32> for QuantityInput {
    fn from(n: u32) -> Self {
        QuantityInput::Exact(Decimal::from(n))
    }
}

impl From<Decimal> for QuantityInput {
    fn from(d: Decimal) -> Self {
        QuantityInput::Exact(d)
    }
}

/// A validated quantity and its total
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingResult {
    pub billing: BillingType,
    pub unit_price: i64,
    pub quantity: Decimal,
    /// `round(quantity * unit_price)` in Rupiah
    pub total_price: i64,
}

impl PricingResult {
    /// Quantity as kilograms, for per-weight results
    pub fn weight_kg(&self) -> Option<f64> {
        match self.billing {
            BillingType::Weight => self.quantity.to_f64(),
            BillingType::Unit => None,
        }
    }

    /// Quantity as an item count, for per-unit results
    pub fn unit_count(&self) -> Option<i64> {
        match self.billing {
            BillingType::Weight => None,
            BillingType::Unit => self.quantity.to_i64(),
        }
    }
}

/// Check a quantity against the bounds of `billing`
pub fn validate_quantity(
    billing: BillingType,
    quantity: impl Into<QuantityInput>,
) -> Result<Decimal, PricingError> {
    let input = quantity.into();
    let number = input
        .to_f64()
        .filter(|f| f.is_finite() && *f > 0.0)
        .ok_or_else(|| PricingError::InvalidQuantity {
            input: input.describe(),
        })?;

    // Positive values beyond the decimal range or below its scale still
    // get their bounds checked
    let value = match input.to_decimal().or_else(|| Decimal::from_f64(number)) {
        Some(d) if d.is_sign_positive() && !d.is_zero() => d,
        _ if number > 1.0 => Decimal::MAX,
        _ => Decimal::new(1, 28),
    };

    let limit = match billing {
        BillingType::Weight if value > Decimal::from(MAX_WEIGHT_KG) => {
            Some(QuantityLimit::MaxWeight)
        }
        BillingType::Unit if value > Decimal::from(MAX_UNITS) => Some(QuantityLimit::MaxUnits),
        BillingType::Unit if !value.fract().is_zero() => Some(QuantityLimit::WholeUnits),
        _ => None,
    };

    match limit {
        Some(limit) => Err(PricingError::QuantityOutOfRange { billing, limit }),
        None => Ok(value),
    }
}

/// Validate `quantity` and compute the total price
pub fn compute_price(
    billing: BillingType,
    unit_price: i64,
    quantity: impl Into<QuantityInput>,
) -> Result<PricingResult, PricingError> {
    let quantity = validate_quantity(billing, quantity)?;

    if unit_price <= 0 {
        return Err(PricingError::InvalidUnitPrice { unit_price });
    }

    let total_price = quantity
        .checked_mul(Decimal::from(unit_price))
        .map(round_whole)
        .and_then(|total| total.to_i64())
        .ok_or(PricingError::InvalidUnitPrice { unit_price })?;

    Ok(PricingResult {
        billing,
        unit_price,
        quantity,
        total_price,
    })
}

/// [`compute_price`] with the billing type and price of a catalog service
pub fn price_for_service(
    service: &Service,
    quantity: impl Into<QuantityInput>,
) -> Result<PricingResult, PricingError> {
    compute_price(service.tipe, service.harga_layanan, quantity)
}
