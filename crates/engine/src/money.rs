//! Money helpers. Amounts are `f64` in the model; every aggregation runs
//! through `Decimal` so derived totals stay exact at two decimal places.

use rust_decimal::prelude::*;

use crate::error::EngineError;

/// Rounding for monetary values (2 decimal places).
const DECIMAL_PLACES: u32 = 2;

/// Largest amount a single ledger entry may carry.
const MAX_AMOUNT: f64 = 1_000_000.0;

pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub fn to_f64(value: Decimal) -> f64 {
    value.round_dp(DECIMAL_PLACES).to_f64().unwrap_or(0.0)
}

/// Amounts must be finite, positive, and within bounds.
pub(crate) fn validate_amount(value: f64, field: &str) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::InvalidInput(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    if value <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "{field} must be positive, got {value}"
        )));
    }
    if value > MAX_AMOUNT {
        return Err(EngineError::InvalidInput(format!(
            "{field} exceeds the maximum allowed ({MAX_AMOUNT}), got {value}"
        )));
    }
    Ok(())
}
