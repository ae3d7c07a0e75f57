use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::{percent_to_rate, round_to_won};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::rent::{require_lease_amount, validate_conversion_rate};
use crate::validation::{require_positive, require_range};
use crate::CalcResult;

/// Statutory cap on a renewal increase (주택임대차보호법).
pub const MAX_RENEWAL_INCREASE: Percent = dec!(5);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentIncreaseInput {
    pub current_deposit: Money,
    pub current_rent: Money,
    pub conversion_rate: Percent,
    pub increase_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentIncreaseMethod {
    pub method_name: String,
    pub new_deposit: Money,
    pub new_rent: Money,
    pub deposit_increase: Money,
    pub rent_increase: Money,
    /// Deposit increase plus a year of extra rent.
    pub total_increase: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentIncreaseOutput {
    pub method1: RentIncreaseMethod,
    pub method2: RentIncreaseMethod,
}

/// Renewal increase computed two ways.
///
/// Method 1 converts the whole lease to a jeonse equivalent, applies the
/// increase to it and takes it all as extra deposit. Method 2 raises
/// deposit and rent by the same percentage.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_rent_increase(
    input: &RentIncreaseInput,
) -> CalcResult<ComputationOutput<RentIncreaseOutput>> {
    let warnings: Vec<String> = Vec::new();

    validate_increase_input(input)?;

    let conversion = percent_to_rate(input.conversion_rate);
    let increase = percent_to_rate(input.increase_rate);

    // --- 1. Converted-jeonse method ---
    let converted_deposit =
        round_to_won(input.current_deposit + input.current_rent * dec!(12) / conversion);
    let increase_limit = round_to_won(converted_deposit * increase);
    let m1_deposit = round_to_won(input.current_deposit + increase_limit);
    let m1_deposit_increase = m1_deposit - input.current_deposit;

    let method1 = RentIncreaseMethod {
        method_name: "전월세전환방식".to_string(),
        new_deposit: m1_deposit,
        new_rent: input.current_rent,
        deposit_increase: m1_deposit_increase,
        rent_increase: Decimal::ZERO,
        total_increase: m1_deposit_increase,
    };

    // --- 2. Proportional method ---
    let m2_deposit = round_to_won(input.current_deposit * (Decimal::ONE + increase));
    let m2_rent = round_to_won(input.current_rent * (Decimal::ONE + increase));
    let m2_deposit_increase = m2_deposit - input.current_deposit;
    let m2_rent_increase = m2_rent - input.current_rent;

    let method2 = RentIncreaseMethod {
        method_name: "각각인상방식".to_string(),
        new_deposit: m2_deposit,
        new_rent: m2_rent,
        deposit_increase: m2_deposit_increase,
        rent_increase: m2_rent_increase,
        total_increase: m2_deposit_increase + round_to_won(m2_rent_increase * dec!(12)),
    };

    Ok(with_metadata(
        "Lease renewal increase under the 5% cap, two methods",
        &serde_json::json!({
            "converted_deposit": converted_deposit.to_string(),
            "increase_limit": increase_limit.to_string(),
        }),
        warnings,
        RentIncreaseOutput { method1, method2 },
    ))
}

fn validate_increase_input(input: &RentIncreaseInput) -> CalcResult<()> {
    require_lease_amount(
        "current_deposit",
        input.current_deposit,
        "현재 보증금은 0 이상 100경원 이하여야 합니다.",
    )?;
    require_lease_amount(
        "current_rent",
        input.current_rent,
        "현재 월세는 0 이상 100경원 이하여야 합니다.",
    )?;
    validate_conversion_rate(input.conversion_rate)?;
    require_positive("increase_rate", input.increase_rate, "인상률은 0보다 커야 합니다.")?;
    require_range(
        "increase_rate",
        input.increase_rate,
        Decimal::ZERO,
        MAX_RENEWAL_INCREASE,
        "주택임대차보호법상 최대 5%입니다.",
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rent::MIN_CONVERSION_RATE;
    use crate::validation::MAX_AMOUNT;

    fn input(rate: Percent) -> RentIncreaseInput {
        RentIncreaseInput {
            current_deposit: dec!(100_000_000),
            current_rent: dec!(500_000),
            conversion_rate: dec!(5),
            increase_rate: rate,
        }
    }

    #[test]
    fn test_two_methods() {
        let r = calculate_rent_increase(&input(dec!(5))).unwrap().result;

        assert_eq!(r.method1.method_name, "전월세전환방식");
        assert_eq!(r.method1.new_deposit, dec!(111_000_000));
        assert_eq!(r.method1.new_rent, dec!(500_000));
        assert_eq!(r.method1.total_increase, dec!(11_000_000));

        assert_eq!(r.method2.method_name, "각각인상방식");
        assert_eq!(r.method2.new_deposit, dec!(105_000_000));
        assert_eq!(r.method2.new_rent, dec!(525_000));
        assert_eq!(r.method2.rent_increase, dec!(25_000));
        assert_eq!(r.method2.total_increase, dec!(5_300_000));
    }

    #[test]
    fn test_cap_enforced() {
        let err = calculate_rent_increase(&input(dec!(5.1))).unwrap_err();
        assert_eq!(err.reason(), "주택임대차보호법상 최대 5%입니다.");
        let err = calculate_rent_increase(&input(Decimal::ZERO)).unwrap_err();
        assert_eq!(err.reason(), "인상률은 0보다 커야 합니다.");
    }

    #[test]
    fn test_lowest_conversion_rate_with_largest_lease() {
        let r = calculate_rent_increase(&RentIncreaseInput {
            current_deposit: MAX_AMOUNT,
            current_rent: MAX_AMOUNT,
            conversion_rate: MIN_CONVERSION_RATE,
            increase_rate: MAX_RENEWAL_INCREASE,
        })
        .unwrap()
        .result;
        assert!(r.method1.deposit_increase > r.method2.deposit_increase);
    }

    #[test]
    fn test_conversion_rate_below_floor_rejected() {
        let err = calculate_rent_increase(&RentIncreaseInput {
            conversion_rate: dec!(0.001),
            ..input(dec!(5))
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("conversion_rate"));
    }
}
