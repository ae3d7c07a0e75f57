use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::CalcError;
use crate::types::{Money, Rate};
use crate::CalcResult;

/// `(1 + rate)^periods`, or an overflow error when the power leaves the
/// `Decimal` range.
pub fn compound_factor(rate: Rate, periods: u32) -> CalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| CalcError::overflow("compound factor"))
}

/// Level payment that retires `principal` over `nper` periods at `rate` per
/// period: `P r (1+r)^n / ((1+r)^n - 1)`, or `P / n` when the rate is zero.
pub fn annuity_payment(principal: Money, rate: Rate, nper: u32) -> CalcResult<Money> {
    if nper == 0 {
        return Err(CalcError::InvalidInput {
            field: "nper".into(),
            reason: "상환 회차는 0보다 커야 합니다.".into(),
        });
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = compound_factor(rate, nper)?;
    let denominator = factor - Decimal::ONE;
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "annuity payment factor".into(),
        });
    }

    // r (1+r)^n / ((1+r)^n - 1) tends to r, so scale the principal last.
    rate.checked_mul(factor)
        .and_then(|scaled| scaled.checked_div(denominator))
        .and_then(|per_won| principal.checked_mul(per_won))
        .ok_or_else(|| CalcError::overflow("annuity payment"))
}

/// Largest principal whose level payment over `nper` periods does not exceed
/// `payment`. Inverse of [`annuity_payment`].
pub fn annuity_present_value(payment: Money, rate: Rate, nper: u32) -> CalcResult<Money> {
    if rate.is_zero() {
        return payment
            .checked_mul(Decimal::from(nper))
            .ok_or_else(|| CalcError::overflow("annuity present value"));
    }

    let factor = compound_factor(rate, nper)?;
    let denominator = rate
        .checked_mul(factor)
        .ok_or_else(|| CalcError::overflow("annuity present value"))?;
    if denominator.is_zero() {
        return Err(CalcError::DivisionByZero {
            context: "annuity present value factor".into(),
        });
    }

    ((factor - Decimal::ONE) / denominator)
        .checked_mul(payment)
        .ok_or_else(|| CalcError::overflow("annuity present value"))
}
