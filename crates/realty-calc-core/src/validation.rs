//! Field guards shared by every calculator's `validate_*_input`.
//!
//! Each guard returns `CalcResult<()>` carrying the field name and the Korean
//! message the caller shows verbatim. Cross-field rules stay in the
//! calculator that owns them.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::error::CalcError;
use crate::types::{Money, Percent};
use crate::CalcResult;

/// Ceiling on any annual interest or deposit rate, in percent.
pub const MAX_ANNUAL_RATE: Percent = dec!(100);

/// Ceiling on principal-like amounts fed into compounding or amortization
/// (100경 won).
pub const MAX_AMOUNT: Money = dec!(1_000_000_000_000_000_000);

/// `value > 0`
pub fn require_positive(field: &str, value: Decimal, reason: &str) -> CalcResult<()> {
    if value <= Decimal::ZERO {
        return Err(CalcError::invalid(field, reason));
    }
    Ok(())
}

/// `value >= 0`
pub fn require_non_negative(field: &str, value: Decimal, reason: &str) -> CalcResult<()> {
    if value < Decimal::ZERO {
        return Err(CalcError::invalid(field, reason));
    }
    Ok(())
}

/// `min <= value <= max`
pub fn require_range(
    field: &str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
    reason: &str,
) -> CalcResult<()> {
    if value < min || value > max {
        return Err(CalcError::invalid(field, reason));
    }
    Ok(())
}

/// `0 <= value <= MAX_ANNUAL_RATE`
pub fn require_annual_rate(field: &str, value: Percent, reason: &str) -> CalcResult<()> {
    require_range(field, value, Decimal::ZERO, MAX_ANNUAL_RATE, reason)
}

/// `value <= max`
pub fn require_at_most(field: &str, value: Decimal, max: Decimal, reason: &str) -> CalcResult<()> {
    if value > max {
        return Err(CalcError::invalid(field, reason));
    }
    Ok(())
}

/// Whole number (no fractional part).
pub fn require_whole(field: &str, value: Decimal, reason: &str) -> CalcResult<()> {
    if value.fract() != Decimal::ZERO {
        return Err(CalcError::invalid(field, reason));
    }
    Ok(())
}

/// Integer count inside `min..=max`.
pub fn require_count(field: &str, value: u32, min: u32, max: u32, reason: &str) -> CalcResult<()> {
    if value < min || value > max {
        return Err(CalcError::invalid(field, reason));
    }
    Ok(())
}
