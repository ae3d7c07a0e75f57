//! Long-term holding deduction on capital gains.
//!
//! Fractional years count only once complete.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::Rate;

const GENERAL_MIN_YEARS: Decimal = dec!(3);
const GENERAL_RATE_PER_YEAR: Rate = dec!(0.02);
const GENERAL_MAX: Rate = dec!(0.30);

const SINGLE_HOME_MIN_HOLDING: Decimal = dec!(3);
const SINGLE_HOME_MIN_RESIDENCE: Decimal = dec!(2);
const SINGLE_HOME_RATE_PER_YEAR: Rate = dec!(0.04);
const SINGLE_HOME_COMPONENT_MAX: Rate = dec!(0.40);

/// 2% per full year held from the third year, capped at 30%.
pub fn general_rate(holding_years: Decimal) -> Rate {
    let years = holding_years.floor();
    if years < GENERAL_MIN_YEARS {
        return Decimal::ZERO;
    }
    (years * GENERAL_RATE_PER_YEAR).min(GENERAL_MAX)
}

/// 4% per full year held plus 4% per full year lived in, each capped at 40%.
/// Falls back to [`general_rate`] below 3 years held or 2 years lived in.
pub fn single_home_rate(holding_years: Decimal, residence_years: Decimal) -> Rate {
    let holding = holding_years.floor();
    let residence = residence_years.floor();
    if holding < SINGLE_HOME_MIN_HOLDING || residence < SINGLE_HOME_MIN_RESIDENCE {
        return general_rate(holding_years);
    }
    let holding_part = (holding * SINGLE_HOME_RATE_PER_YEAR).min(SINGLE_HOME_COMPONENT_MAX);
    let residence_part = (residence * SINGLE_HOME_RATE_PER_YEAR).min(SINGLE_HOME_COMPONENT_MAX);
    holding_part + residence_part
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_rate() {
        assert_eq!(general_rate(dec!(2.9)), Decimal::ZERO);
        assert_eq!(general_rate(dec!(3)), dec!(0.06));
        assert_eq!(general_rate(dec!(20)), dec!(0.30));
    }

    #[test]
    fn test_single_home_rate() {
        assert_eq!(single_home_rate(dec!(5), dec!(5)), dec!(0.40));
        assert_eq!(single_home_rate(dec!(12), dec!(11)), dec!(0.80));
        // lived in under two years: general table
        assert_eq!(single_home_rate(dec!(5), dec!(1)), dec!(0.10));
    }
}
