use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::{ratio_percent, round_to_won};
use crate::tables::property::{
    age_credit_rate, holding_credit_rate, COMPREHENSIVE_DEDUCTION_GENERAL,
    COMPREHENSIVE_DEDUCTION_SINGLE_HOME, COMPREHENSIVE_STANDARD, FAIR_MARKET_RATIO,
    MAX_COMBINED_CREDIT, RURAL_SPECIAL_ON_COMPREHENSIVE,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{require_count, require_positive, require_range};
use crate::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveTaxInput {
    /// Sum of assessed values of every home held.
    pub total_assessed_value: Money,
    pub is_single_home_owner: bool,
    pub owner_age: u32,
    pub holding_years: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComprehensiveTaxOutput {
    pub deduction: Money,
    pub tax_base: Money,
    pub calculated_tax: Money,
    pub age_deduction_rate: Percent,
    pub holding_deduction_rate: Percent,
    pub total_deduction_rate: Percent,
    pub tax_deduction: Money,
    pub comprehensive_tax: Money,
    /// Rural special tax on the comprehensive tax.
    pub local_education_tax: Money,
    pub total_tax: Money,
    pub effective_rate: Percent,
}

/// Comprehensive real-estate holding tax for owners of at most two homes.
///
/// Single-home owners get a larger basic deduction and a senior plus
/// long-holding credit, capped at 80% combined.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_comprehensive_tax(
    input: &ComprehensiveTaxInput,
) -> CalcResult<ComputationOutput<ComprehensiveTaxOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_comprehensive_input(input)?;

    // --- 1. Base ---
    let deduction = if input.is_single_home_owner {
        COMPREHENSIVE_DEDUCTION_SINGLE_HOME
    } else {
        COMPREHENSIVE_DEDUCTION_GENERAL
    };
    let taxable_value = (input.total_assessed_value - deduction).max(Decimal::ZERO);
    let tax_base = round_to_won(taxable_value * FAIR_MARKET_RATIO);
    let calculated_tax = round_to_won(COMPREHENSIVE_STANDARD.tax(tax_base));

    // --- 2. Single-home credits ---
    let (age_rate, holding_rate, total_rate) = if input.is_single_home_owner {
        let age = age_credit_rate(input.owner_age);
        let holding = holding_credit_rate(input.holding_years);
        if age + holding > MAX_COMBINED_CREDIT {
            warnings.push("고령자·장기보유 공제 합계가 80%를 넘어 80%로 제한됩니다.".to_string());
        }
        (age, holding, (age + holding).min(MAX_COMBINED_CREDIT))
    } else {
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO)
    };
    let tax_deduction = round_to_won(calculated_tax * total_rate);

    // --- 3. Final ---
    let comprehensive_tax = calculated_tax - tax_deduction;
    let local_education_tax = round_to_won(comprehensive_tax * RURAL_SPECIAL_ON_COMPREHENSIVE);
    let total_tax = comprehensive_tax + local_education_tax;

    let output = ComprehensiveTaxOutput {
        deduction,
        tax_base,
        calculated_tax,
        age_deduction_rate: (age_rate * dec!(100)).round(),
        holding_deduction_rate: (holding_rate * dec!(100)).round(),
        total_deduction_rate: (total_rate * dec!(100)).round(),
        tax_deduction,
        comprehensive_tax,
        local_education_tax,
        total_tax,
        effective_rate: ratio_percent(total_tax, input.total_assessed_value, 3)?,
    };

    Ok(with_metadata(
        "Comprehensive real-estate tax with single-home credits",
        &serde_json::json!({
            "deduction": deduction.to_string(),
            "fair_market_ratio": FAIR_MARKET_RATIO.to_string(),
            "max_combined_credit": MAX_COMBINED_CREDIT.to_string(),
        }),
        warnings,
        output,
    ))
}

fn validate_comprehensive_input(input: &ComprehensiveTaxInput) -> CalcResult<()> {
    require_positive(
        "total_assessed_value",
        input.total_assessed_value,
        "공시가격 합산액은 0보다 커야 합니다.",
    )?;
    require_count("owner_age", input.owner_age, 0, 120, "나이는 0~120 사이여야 합니다.")?;
    require_range(
        "holding_years",
        input.holding_years,
        Decimal::ZERO,
        dec!(100),
        "보유기간은 0~100년 사이여야 합니다.",
    )?;
    Ok(())
}
