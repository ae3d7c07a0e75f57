use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{monthly_rate_from_annual, percent_to_rate, round_to_won};
use crate::time_value::compound_factor;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation::{
    require_annual_rate, require_at_most, require_count, require_positive, MAX_AMOUNT,
};
use crate::CalcResult;

const MAX_MONTHS: u32 = 600;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterestType {
    Simple,
    /// Compounded monthly.
    Compound,
}

/// Withholding regime on deposit interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InterestTaxType {
    General,
    Preferential,
    TaxFree,
}

impl InterestTaxType {
    pub fn rate(self) -> Rate {
        match self {
            InterestTaxType::General => dec!(0.154),
            InterestTaxType::Preferential => dec!(0.095),
            InterestTaxType::TaxFree => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsInterestInput {
    pub principal: Money,
    pub annual_rate: Percent,
    pub months: u32,
    pub interest_type: InterestType,
    pub tax_type: InterestTaxType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsInterestOutput {
    pub interest_before_tax: Money,
    pub interest_tax: Money,
    pub interest_after_tax: Money,
    pub total_after_tax: Money,
}

/// Lump-sum deposit interest. Every field is derived from the unrounded
/// interest and rounded only at the end.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_savings_interest(
    input: &SavingsInterestInput,
) -> CalcResult<ComputationOutput<SavingsInterestOutput>> {
    require_positive("principal", input.principal, "원금은 0보다 커야 합니다.")?;
    require_at_most(
        "principal",
        input.principal,
        MAX_AMOUNT,
        "원금이 계산 가능한 범위를 넘었습니다.",
    )?;
    require_annual_rate(
        "annual_rate",
        input.annual_rate,
        "연이율은 0% 이상 100% 이하여야 합니다.",
    )?;
    require_count(
        "months",
        input.months,
        1,
        MAX_MONTHS,
        "기간은 1개월 이상 600개월 이하여야 합니다.",
    )?;

    let interest = match input.interest_type {
        InterestType::Simple => {
            input.principal * percent_to_rate(input.annual_rate) * Decimal::from(input.months)
                / dec!(12)
        }
        InterestType::Compound => {
            let factor =
                compound_factor(monthly_rate_from_annual(input.annual_rate), input.months)?;
            input
                .principal
                .checked_mul(factor)
                .ok_or_else(|| CalcError::overflow("compound interest"))?
                - input.principal
        }
    };
    let tax = interest * input.tax_type.rate();
    let after_tax = interest - tax;

    let output = SavingsInterestOutput {
        interest_before_tax: round_to_won(interest),
        interest_tax: round_to_won(tax),
        interest_after_tax: round_to_won(after_tax),
        total_after_tax: round_to_won(input.principal + after_tax),
    };

    Ok(with_metadata(
        "Deposit interest less withholding tax",
        &serde_json::json!({
            "interest_type": input.interest_type,
            "tax_rate": input.tax_type.rate().to_string(),
        }),
        Vec::new(),
        output,
    ))
}
