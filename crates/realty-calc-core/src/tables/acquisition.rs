use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::numeric::round_to;
use crate::types::{Money, Rate};

pub const LOWER_THRESHOLD: Money = dec!(600_000_000);
pub const UPPER_THRESHOLD: Money = dec!(900_000_000);

pub const TWO_HOMES_REGULATED_RATE: Rate = dec!(0.08);
pub const THREE_HOMES_UNREGULATED_RATE: Rate = dec!(0.08);
pub const THREE_HOMES_REGULATED_RATE: Rate = dec!(0.12);

pub const LOCAL_EDUCATION_TAX_RATE: Rate = dec!(0.1);
/// Levied on the price itself once the price passes [`LOWER_THRESHOLD`].
pub const RURAL_SPECIAL_TAX_RATE: Rate = dec!(0.002);
pub const FIRST_TIME_BUYER_DISCOUNT: Money = dec!(2_000_000);

/// Rate for a household's only home: 1% up to 6억, 3% above 9억, and a
/// straight line `price x 2/3억 - 3` percent in between, kept to four
/// decimals of a percent.
pub fn single_home_rate(price: Money) -> Rate {
    if price <= LOWER_THRESHOLD {
        dec!(0.01)
    } else if price <= UPPER_THRESHOLD {
        let percent = price * Decimal::TWO / dec!(300_000_000) - dec!(3);
        round_to(percent, 4) / dec!(100)
    } else {
        dec!(0.03)
    }
}

// ---------------------------------------------------------------------------
// Registration-cost quote
// ---------------------------------------------------------------------------

/// Banded single-home rate the registration quote uses instead of the
/// interpolated statutory rate.
pub fn banded_single_home_rate(price: Money) -> Rate {
    if price <= LOWER_THRESHOLD {
        dec!(0.01)
    } else if price <= UPPER_THRESHOLD {
        dec!(0.02)
    } else {
        dec!(0.03)
    }
}

/// Officetels, other buildings and land.
pub const NON_HOUSING_RATE: Rate = dec!(0.04);
pub const NON_HOUSING_EDUCATION_RATE: Rate = dec!(0.2);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation_is_continuous_at_edges() {
        assert_eq!(single_home_rate(dec!(600_000_000)), dec!(0.01));
        assert_eq!(single_home_rate(dec!(900_000_000)), dec!(0.03));
        assert_eq!(single_home_rate(dec!(750_000_000)), dec!(0.02));
    }

    #[test]
    fn test_interpolated_rate_rounds_percent() {
        // 700,000,000 x 2 / 3억 - 3 = 1.6666..% -> 1.6667%
        assert_eq!(single_home_rate(dec!(700_000_000)), dec!(0.016667));
    }

    #[test]
    fn test_banded_rate_steps() {
        assert_eq!(banded_single_home_rate(dec!(700_000_000)), dec!(0.02));
        assert_eq!(banded_single_home_rate(dec!(900_000_001)), dec!(0.03));
    }
}
