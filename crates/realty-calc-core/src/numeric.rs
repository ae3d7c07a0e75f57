use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::CalcError;
use crate::types::{Money, Percent, Rate};
use crate::CalcResult;

/// Ties toward positive infinity: away from zero above it, toward zero below.
fn half_up(x: Decimal) -> RoundingStrategy {
    if x.is_sign_negative() {
        RoundingStrategy::MidpointTowardZero
    } else {
        RoundingStrategy::MidpointAwayFromZero
    }
}

/// Round to the nearest whole won, ties toward positive infinity.
pub fn round_to_won(x: Decimal) -> Money {
    x.round_dp_with_strategy(0, half_up(x)).normalize()
}

/// Round to `dp` decimal places with the same tie rule as [`round_to_won`].
pub fn round_to(x: Decimal, dp: u32) -> Decimal {
    x.round_dp_with_strategy(dp, half_up(x)).normalize()
}

/// `annual_percent / 100 / 12`. Every amortization formula goes through this.
pub fn monthly_rate_from_annual(annual_percent: Percent) -> Rate {
    annual_percent / dec!(100) / dec!(12)
}

/// Percentage input to a decimal rate.
pub fn percent_to_rate(p: Percent) -> Rate {
    p / dec!(100)
}

/// Decimal rate to a percentage, unrounded.
pub fn rate_to_percent(r: Rate) -> Percent {
    (r * dec!(100)).normalize()
}

/// `numerator / denominator`, or an overflow error when the quotient leaves
/// the `Decimal` range. The caller guarantees a non-zero denominator.
pub fn checked_ratio(
    numerator: Decimal,
    denominator: Decimal,
    context: &str,
) -> CalcResult<Decimal> {
    numerator
        .checked_div(denominator)
        .ok_or_else(|| CalcError::overflow(context))
}

/// `numerator / denominator` as a percentage rounded to `dp`, or zero when the
/// denominator is not positive.
pub fn ratio_percent(numerator: Decimal, denominator: Decimal, dp: u32) -> CalcResult<Percent> {
    if denominator <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    checked_ratio(numerator, denominator, "percentage ratio")?
        .checked_mul(dec!(100))
        .map(|percent| round_to(percent, dp))
        .ok_or_else(|| CalcError::overflow("percentage ratio"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_won_half_up() {
        assert_eq!(round_to_won(dec!(1087500.4)), dec!(1087500));
        assert_eq!(round_to_won(dec!(1087500.5)), dec!(1087501));
        assert_eq!(round_to_won(dec!(-2.5)), dec!(-2));
        assert_eq!(round_to_won(dec!(-2.6)), dec!(-3));
    }

    #[test]
    fn test_rounding_at_the_decimal_limit() {
        assert_eq!(round_to_won(Decimal::MAX), Decimal::MAX);
        assert_eq!(round_to(Decimal::MAX, 2), Decimal::MAX);
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(round_to(dec!(0.29640), 2), dec!(0.3));
        assert_eq!(round_to(dec!(33.333333), 2), dec!(33.33));
        assert_eq!(round_to(dec!(12.345), 2), dec!(12.35));
        assert_eq!(round_to(dec!(0.00123456), 4), dec!(0.0012));
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate_from_annual(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate_from_annual(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_ratio_percent_zero_denominator() {
        assert_eq!(ratio_percent(dec!(5), Decimal::ZERO, 2).unwrap(), Decimal::ZERO);
        assert_eq!(ratio_percent(dec!(1), dec!(3), 2).unwrap(), dec!(33.33));
        let err = ratio_percent(Decimal::MAX, dec!(0.0000001), 2).unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }
}
