use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{percent_to_rate, round_to_won};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::rent::{require_lease_amount, validate_conversion_rate};
use crate::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentAdjustInput {
    pub current_deposit: Money,
    pub current_rent: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_deposit: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_rent: Option<Money>,
    pub conversion_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentAdjustOutput {
    /// Clamped at zero.
    pub new_deposit: Money,
    /// Clamped at zero.
    pub new_rent: Money,
    /// Relative to the current deposit, before clamping.
    pub deposit_diff: Money,
    /// Relative to the current rent, before clamping.
    pub rent_diff: Money,
}

/// Rent that keeps the lease equivalent after the deposit changes.
#[tracing::instrument(level = "debug", skip_all)]
pub fn adjust_deposit_to_rent(
    input: &RentAdjustInput,
) -> CalcResult<ComputationOutput<RentAdjustOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_adjust_input(input)?;
    let new_deposit = input
        .new_deposit
        .ok_or_else(|| CalcError::invalid("new_deposit", "변경 보증금을 입력해주세요."))?;
    require_lease_amount(
        "new_deposit",
        new_deposit,
        "변경 보증금은 0 이상 100경원 이하여야 합니다.",
    )?;

    let deposit_diff = new_deposit - input.current_deposit;
    let rate = percent_to_rate(input.conversion_rate);
    let calculated_rent = round_to_won(input.current_rent - deposit_diff * rate / dec!(12));
    if calculated_rent < Decimal::ZERO {
        warnings.push(
            "보증금 증액분이 월세 전액을 초과합니다. 월세는 0원으로 조정됩니다.".to_string(),
        );
    }

    let output = RentAdjustOutput {
        new_deposit,
        new_rent: calculated_rent.max(Decimal::ZERO),
        deposit_diff,
        rent_diff: calculated_rent - input.current_rent,
    };

    Ok(with_metadata(
        "Deposit change converted to rent at the conversion rate",
        &serde_json::json!({ "rate": rate.to_string() }),
        warnings,
        output,
    ))
}

/// Deposit that keeps the lease equivalent after the rent changes.
#[tracing::instrument(level = "debug", skip_all)]
pub fn adjust_rent_to_deposit(
    input: &RentAdjustInput,
) -> CalcResult<ComputationOutput<RentAdjustOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_adjust_input(input)?;
    let new_rent = input
        .new_rent
        .ok_or_else(|| CalcError::invalid("new_rent", "변경 월세를 입력해주세요."))?;
    require_lease_amount("new_rent", new_rent, "변경 월세는 0 이상 100경원 이하여야 합니다.")?;

    let rent_diff = new_rent - input.current_rent;
    let rate = percent_to_rate(input.conversion_rate);
    let calculated_deposit = round_to_won(input.current_deposit - rent_diff * dec!(12) / rate);
    if calculated_deposit < Decimal::ZERO {
        warnings.push(
            "월세 증액분이 보증금 전액을 초과합니다. 보증금은 0원으로 조정됩니다.".to_string(),
        );
    }

    let output = RentAdjustOutput {
        new_deposit: calculated_deposit.max(Decimal::ZERO),
        new_rent,
        deposit_diff: calculated_deposit - input.current_deposit,
        rent_diff,
    };

    Ok(with_metadata(
        "Rent change converted to deposit at the conversion rate",
        &serde_json::json!({ "rate": rate.to_string() }),
        warnings,
        output,
    ))
}

fn validate_adjust_input(input: &RentAdjustInput) -> CalcResult<()> {
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
    Ok(())
}
