use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::round_to_won;
use crate::tables::property::{
    COMPREHENSIVE_DEDUCTION_GENERAL, COMPREHENSIVE_DEDUCTION_SINGLE_HOME, COMPREHENSIVE_MULTI_HOME,
    COMPREHENSIVE_STANDARD, FAIR_MARKET_RATIO, PROPERTY_EDUCATION_RATE, PROPERTY_GENERAL,
    PROPERTY_SINGLE_HOUSEHOLD, RURAL_SPECIAL_ON_COMPREHENSIVE, URBAN_SURCHARGE_ON_PROPERTY_TAX,
};
use crate::tables::units::WON_PER_MANWON;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation::{require_count, require_positive};
use crate::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingTaxInput {
    /// Assessed (공시) price in 만원.
    pub public_price: Money,
    pub is_single_household: bool,
    /// 1 to 3 (3 means three or more).
    pub housing_count: u32,
}

/// Every amount in won.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldingTaxOutput {
    pub property_tax: Money,
    pub urban_tax: Money,
    pub education_tax: Money,
    pub comprehensive_tax: Money,
    pub rural_tax: Money,
    pub total_holding_tax: Money,
    pub tax_base: Money,
    pub comprehensive_tax_base: Money,
}

/// Combined yearly holding tax on one home: property tax with its
/// surcharges plus comprehensive real-estate tax with rural special tax.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_holding_tax(
    input: &HoldingTaxInput,
) -> CalcResult<ComputationOutput<HoldingTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive("public_price", input.public_price, "공시가격은 0보다 커야 합니다.")?;
    require_count("housing_count", input.housing_count, 1, 3, "주택 수는 1~3 사이여야 합니다.")?;

    let public_price_won = input.public_price * WON_PER_MANWON;

    // --- 1. Property tax ---
    let tax_base = round_to_won(public_price_won * FAIR_MARKET_RATIO);
    let property_table = if input.is_single_household {
        PROPERTY_SINGLE_HOUSEHOLD
    } else {
        PROPERTY_GENERAL
    };
    let property_tax = round_to_won(property_table.tax(tax_base));
    let urban_tax = round_to_won(property_tax * URBAN_SURCHARGE_ON_PROPERTY_TAX);
    let education_tax = round_to_won(property_tax * PROPERTY_EDUCATION_RATE);

    // --- 2. Comprehensive tax ---
    let deduction = if input.is_single_household && input.housing_count == 1 {
        COMPREHENSIVE_DEDUCTION_SINGLE_HOME
    } else {
        COMPREHENSIVE_DEDUCTION_GENERAL
    };
    let comprehensive_tax_base =
        round_to_won(((public_price_won - deduction) * FAIR_MARKET_RATIO).max(Decimal::ZERO));
    let comprehensive_table = if input.housing_count <= 2 {
        COMPREHENSIVE_STANDARD
    } else {
        COMPREHENSIVE_MULTI_HOME
    };
    let comprehensive_tax = if comprehensive_tax_base > Decimal::ZERO {
        round_to_won(comprehensive_table.tax(comprehensive_tax_base))
    } else {
        Decimal::ZERO
    };
    let rural_tax = round_to_won(comprehensive_tax * RURAL_SPECIAL_ON_COMPREHENSIVE);

    let total_holding_tax =
        property_tax + urban_tax + education_tax + comprehensive_tax + rural_tax;

    let output = HoldingTaxOutput {
        property_tax,
        urban_tax,
        education_tax,
        comprehensive_tax,
        rural_tax,
        total_holding_tax,
        tax_base,
        comprehensive_tax_base,
    };

    Ok(with_metadata(
        "Property tax plus comprehensive real-estate tax on one home",
        &serde_json::json!({
            "public_price_unit": "만원",
            "comprehensive_deduction": deduction.to_string(),
        }),
        warnings,
        output,
    ))
}
