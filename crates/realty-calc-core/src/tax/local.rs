use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::round_to_won;
use crate::tables::fees::STAMP_DUTY;
use crate::tables::property::FIRE_SAFETY;
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation::{require_non_negative, require_positive};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingKind {
    #[serde(rename = "주택")]
    Housing,
    #[serde(rename = "그외")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalTaxInput {
    /// Statutory standard value of the building.
    pub building_value: Money,
    pub building_type: BuildingKind,
    pub is_single_household: bool,
    pub is_fire_risk: bool,
    /// Takes precedence over `is_fire_risk`.
    pub is_large_fire_risk: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionalTaxOutput {
    pub taxable_base: Money,
    pub base_tax: Money,
    pub additional_tax: Money,
    pub total_tax: Money,
    pub multiplier: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampTaxInput {
    pub transaction_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampTaxOutput {
    pub stamp_tax: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Fire-safety regional resource facility tax, multiplied for buildings in
/// fire-risk classes.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_regional_tax(
    input: &RegionalTaxInput,
) -> CalcResult<ComputationOutput<RegionalTaxOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive(
        "building_value",
        input.building_value,
        "건물 시가표준액은 0보다 커야 합니다.",
    )?;

    // --- 1. Base ---
    let exempt = input.building_type == BuildingKind::Housing && input.is_single_household;
    let taxable_base = if exempt {
        warnings.push("1세대 1주택 주택분: 과세표준 없음".to_string());
        Decimal::ZERO
    } else {
        input.building_value
    };

    // --- 2. Fire-safety tax ---
    let base_tax = round_to_won(FIRE_SAFETY.amount(taxable_base));

    // --- 3. Risk multiplier ---
    let multiplier: u32 = if input.is_large_fire_risk {
        3
    } else if input.is_fire_risk {
        2
    } else {
        1
    };
    let additional_tax = base_tax * Decimal::from(multiplier - 1);

    let output = RegionalTaxOutput {
        taxable_base,
        base_tax,
        additional_tax,
        total_tax: base_tax + additional_tax,
        multiplier,
    };

    Ok(with_metadata(
        "Regional resource facility tax (fire safety)",
        &serde_json::json!({
            "single_household_housing_exempt": exempt,
            "multiplier": multiplier,
        }),
        warnings,
        output,
    ))
}

/// Flat stamp duty by contract amount; a threshold amount stays in the lower band.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_stamp_tax(input: &StampTaxInput) -> CalcResult<ComputationOutput<StampTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_non_negative(
        "transaction_amount",
        input.transaction_amount,
        "거래금액은 0 이상이어야 합니다.",
    )?;

    let output = StampTaxOutput {
        stamp_tax: *STAMP_DUTY.lookup(input.transaction_amount),
    };

    Ok(with_metadata(
        "Stamp duty on real-estate contracts",
        &serde_json::json!({ "exempt_up_to": dec!(10_000_000).to_string() }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
