//! Jeonse / monthly-rent conversion, deposit-rent adjustment and renewal
//! increases.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent};
use crate::validation::{require_positive, require_range, MAX_AMOUNT, MAX_ANNUAL_RATE};
use crate::CalcResult;

pub mod adjust;
pub mod convert;
pub mod increase;

pub use adjust::{adjust_deposit_to_rent, adjust_rent_to_deposit, RentAdjustInput, RentAdjustOutput};
pub use convert::{
    convert_jeonse_to_monthly, convert_monthly_to_jeonse, rent_conversion_rate, RentConvertInput,
    RentConvertOutput,
};
pub use increase::{
    calculate_rent_increase, RentIncreaseInput, RentIncreaseMethod, RentIncreaseOutput,
};

/// Lowest conversion rate accepted, in percent. `rent x 12 / rate` stays
/// within range above it.
pub const MIN_CONVERSION_RATE: Percent = dec!(0.01);

pub(crate) fn validate_conversion_rate(rate: Percent) -> CalcResult<()> {
    require_positive("conversion_rate", rate, "전환율은 0보다 커야 합니다.")?;
    require_range(
        "conversion_rate",
        rate,
        MIN_CONVERSION_RATE,
        MAX_ANNUAL_RATE,
        "전환율은 0.01% 이상 100% 이하여야 합니다.",
    )
}

/// Deposit or rent amount in `0..=MAX_AMOUNT`.
pub(crate) fn require_lease_amount(field: &str, value: Money, reason: &str) -> CalcResult<()> {
    require_range(field, value, Decimal::ZERO, MAX_AMOUNT, reason)
}
