//! One pricing attempt on the order screen
//!
//! The operator types or steps a quantity; each change puts the attempt back
//! into `Entering`, and [`PricingAttempt::validate`] resolves it to `Valid`
//! or `Invalid`. Nothing here is persisted.

use super::{MAX_UNITS, MAX_WEIGHT_KG, PricingResult, QuantityInput, compute_price};
use crate::core::catalog::{BillingType, Service};
use crate::core::error::PricingError;
use rust_decimal::prelude::*;

/// Step a unit count by `delta`, never leaving `[1, MAX_UNITS]`
pub fn step_units(current: i64, delta: i64) -> i64 {
    current
        .saturating_add(delta)
        .clamp(1, i64::from(MAX_UNITS))
}

/// Step a weight by `steps` tenths of a kilogram, never leaving `[0.1, MAX_WEIGHT_KG]`
pub fn step_weight(current: Decimal, steps: i64) -> Decimal {
    let step = Decimal::new(1, 1);
    let min = step;
    let max = Decimal::from(MAX_WEIGHT_KG);
    let next = current
        .checked_add(step * Decimal::from(steps))
        .unwrap_or(max);
    next.clamp(min, max).normalize()
}

/// Where a pricing attempt stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingState {
    Entering,
    Valid(PricingResult),
    Invalid(PricingError),
}

/// A quantity being entered for one service
#[derive(Debug, Clone)]
pub struct PricingAttempt {
    billing: BillingType,
    unit_price: i64,
    input: String,
    state: PricingState,
}

impl PricingAttempt {
    pub fn new(billing: BillingType, unit_price: i64) -> Self {
        Self {
            billing,
            unit_price,
            input: String::new(),
            state: PricingState::Entering,
        }
    }

    pub fn for_service(service: &Service) -> Self {
        Self::new(service.tipe, service.harga_layanan)
    }

    pub fn billing(&self) -> BillingType {
        self.billing
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &PricingState {
        &self.state
    }

    /// Replace the typed quantity
    pub fn set_input(&mut self, raw: impl Into<String>) {
        self.input = raw.into();
        self.state = PricingState::Entering;
    }

    pub fn validate(&mut self) -> &PricingState {
        self.state = match compute_price(
            self.billing,
            self.unit_price,
            QuantityInput::Text(self.input.clone()),
        ) {
            Ok(result) => PricingState::Valid(result),
            Err(err) => PricingState::Invalid(err),
        };
        &self.state
    }

    /// Only a valid attempt may be confirmed
    pub fn is_ready(&self) -> bool {
        matches!(self.state, PricingState::Valid(_))
    }

    pub fn result(&self) -> Option<&PricingResult> {
        match &self.state {
            PricingState::Valid(result) => Some(result),
            _ => None,
        }
    }

    pub fn increment(&mut self) -> &PricingState {
        self.step(1)
    }

    pub fn decrement(&mut self) -> &PricingState {
        self.step(-1)
    }

    /// Step from the current input; unreadable input steps from zero
    fn step(&mut self, direction: i64) -> &PricingState {
        let current = QuantityInput::Text(self.input.clone())
            .to_decimal()
            .unwrap_or(Decimal::ZERO);

        self.input = match self.billing {
            BillingType::Unit => {
                let whole = current.trunc().to_i64().unwrap_or(0);
                step_units(whole, direction).to_string()
            }
            BillingType::Weight => step_weight(current, direction).to_string(),
        };
        self.validate()
    }
}
