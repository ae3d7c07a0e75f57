use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{ratio_percent, round_to_won};
use crate::tables::property::{
    CITY_PLANNING_RATE, FAIR_MARKET_RATIO, PROPERTY_EDUCATION_RATE, PROPERTY_GENERAL,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::require_positive;
use crate::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTaxInput {
    /// Officially assessed (공시) value.
    pub assessed_value: Money,
    pub is_urban_area: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyTaxOutput {
    pub tax_base: Money,
    pub property_tax: Money,
    pub city_planning_tax: Money,
    pub local_education_tax: Money,
    pub total_tax: Money,
    pub effective_rate: Percent,
}

/// Annual property tax on a home at the general rates.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_property_tax(
    input: &PropertyTaxInput,
) -> CalcResult<ComputationOutput<PropertyTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive("assessed_value", input.assessed_value, "공시가격은 0보다 커야 합니다.")?;

    let tax_base = round_to_won(input.assessed_value * FAIR_MARKET_RATIO);
    let property_tax = round_to_won(PROPERTY_GENERAL.tax(tax_base));

    let city_planning_tax = if input.is_urban_area {
        round_to_won(tax_base * CITY_PLANNING_RATE)
    } else {
        Decimal::ZERO
    };
    let local_education_tax = round_to_won(property_tax * PROPERTY_EDUCATION_RATE);
    let total_tax = property_tax + city_planning_tax + local_education_tax;

    let output = PropertyTaxOutput {
        tax_base,
        property_tax,
        city_planning_tax,
        local_education_tax,
        total_tax,
        effective_rate: ratio_percent(total_tax, input.assessed_value, 2)?,
    };

    Ok(with_metadata(
        "Property tax on 60% of assessed value",
        &serde_json::json!({
            "fair_market_ratio": FAIR_MARKET_RATIO.to_string(),
            "city_planning_rate": CITY_PLANNING_RATE.to_string(),
        }),
        warnings,
        output,
    ))
}
