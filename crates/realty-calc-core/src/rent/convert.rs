use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{percent_to_rate, ratio_percent, round_to_won};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::rent::{require_lease_amount, validate_conversion_rate};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Shared input of both conversion directions. Each direction requires the
/// optional field it converts from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentConvertInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jeonse_deposit: Option<Money>,
    /// Deposit kept under the monthly-rent lease.
    pub monthly_deposit: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<Money>,
    /// Annual conversion rate, percent.
    pub conversion_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentConvertOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jeonse_equivalent: Option<Money>,
    pub conversion_rate: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// `(jeonse - deposit) x rate / 12`
#[tracing::instrument(level = "debug", skip_all)]
pub fn convert_jeonse_to_monthly(
    input: &RentConvertInput,
) -> CalcResult<ComputationOutput<RentConvertOutput>> {
    let warnings: Vec<String> = Vec::new();

    validate_convert_input(input)?;
    let jeonse = input
        .jeonse_deposit
        .ok_or_else(|| CalcError::invalid("jeonse_deposit", "전세보증금을 입력해주세요."))?;
    require_lease_amount("jeonse_deposit", jeonse, "전세보증금은 0 이상 100경원 이하여야 합니다.")?;
    if input.monthly_deposit >= jeonse {
        return Err(CalcError::rule(
            "monthly_deposit",
            "월세보증금은 전세보증금보다 작아야 합니다.",
        ));
    }

    let rate = percent_to_rate(input.conversion_rate);
    let monthly = round_to_won((jeonse - input.monthly_deposit) * rate / dec!(12));

    let output = RentConvertOutput {
        monthly_rent: Some(monthly),
        jeonse_equivalent: None,
        conversion_rate: input.conversion_rate,
    };

    Ok(with_metadata(
        "Jeonse to monthly rent at the conversion rate",
        &serde_json::json!({ "rate": rate.to_string() }),
        warnings,
        output,
    ))
}

/// `deposit + rent x 12 / rate`
#[tracing::instrument(level = "debug", skip_all)]
pub fn convert_monthly_to_jeonse(
    input: &RentConvertInput,
) -> CalcResult<ComputationOutput<RentConvertOutput>> {
    let warnings: Vec<String> = Vec::new();

    validate_convert_input(input)?;
    let rent = match input.monthly_rent {
        Some(rent) if rent > Decimal::ZERO => rent,
        _ => return Err(CalcError::invalid("monthly_rent", "월세를 입력해주세요.")),
    };

    let rate = percent_to_rate(input.conversion_rate);
    let jeonse = round_to_won(input.monthly_deposit + rent * dec!(12) / rate);

    let output = RentConvertOutput {
        monthly_rent: None,
        jeonse_equivalent: Some(jeonse),
        conversion_rate: input.conversion_rate,
    };

    Ok(with_metadata(
        "Monthly rent to jeonse equivalent at the conversion rate",
        &serde_json::json!({ "rate": rate.to_string() }),
        warnings,
        output,
    ))
}

/// Conversion rate implied by a lease pair: `rent x 12 / (jeonse - deposit)`
/// as a percent (2dp), or zero when the deposit gap is not positive.
pub fn rent_conversion_rate(
    jeonse_deposit: Money,
    monthly_deposit: Money,
    monthly_rent: Money,
) -> CalcResult<Percent> {
    ratio_percent(monthly_rent * dec!(12), jeonse_deposit - monthly_deposit, 2)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_convert_input(input: &RentConvertInput) -> CalcResult<()> {
    require_lease_amount(
        "monthly_deposit",
        input.monthly_deposit,
        "월세보증금은 0 이상 100경원 이하여야 합니다.",
    )?;
    if let Some(rent) = input.monthly_rent {
        require_lease_amount("monthly_rent", rent, "월세는 0 이상 100경원 이하여야 합니다.")?;
    }
    validate_conversion_rate(input.conversion_rate)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
