//! Area arithmetic: unit conversion, price per area, land share of a unit
//! and building coverage / floor-area ratios.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{checked_ratio, ratio_percent, round_to, round_to_won};
use crate::tables::units::{AreaUnit, PYEONG_PER_SQM, SQM_PER_ACRE, SQM_PER_PYEONG, SQM_PER_SQFT};
use crate::types::{with_metadata, Area, ComputationOutput, Money, Percent};
use crate::validation::{require_count, require_positive};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Unit conversion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaConvertInput {
    pub value: Area,
    pub from_unit: AreaUnit,
}

/// The same area in every supported unit. Acres keep 4dp, the rest 2dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaConvertOutput {
    pub pyeong: Area,
    pub sqm: Area,
    pub sqft: Area,
    pub acre: Area,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_area_convert(
    input: &AreaConvertInput,
) -> CalcResult<ComputationOutput<AreaConvertOutput>> {
    require_positive("value", input.value, "면적은 0보다 커야 합니다.")?;

    let sqm = input.value * input.from_unit.sqm_factor();
    let output = AreaConvertOutput {
        pyeong: round_to(sqm / SQM_PER_PYEONG, 2),
        sqm: round_to(sqm, 2),
        sqft: round_to(sqm / SQM_PER_SQFT, 2),
        acre: round_to(sqm / SQM_PER_ACRE, 4),
    };

    Ok(with_metadata(
        "Conversion through square metres",
        &serde_json::json!({ "from_unit": input.from_unit }),
        Vec::new(),
        output,
    ))
}

// ---------------------------------------------------------------------------
// Price per area
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPriceInput {
    pub total_price: Money,
    pub area: Area,
    pub unit: AreaUnit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitPriceOutput {
    pub price_per_pyeong: Money,
    pub price_per_sqm: Money,
    pub area_sqm: Area,
    pub area_pyeong: Area,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_unit_price(
    input: &UnitPriceInput,
) -> CalcResult<ComputationOutput<UnitPriceOutput>> {
    require_positive("total_price", input.total_price, "총 금액은 0보다 커야 합니다.")?;
    require_positive("area", input.area, "면적은 0보다 커야 합니다.")?;

    let area_sqm = input.area * input.unit.sqm_factor();
    let area_pyeong = match input.unit {
        AreaUnit::Pyeong => input.area,
        AreaUnit::Sqm | AreaUnit::Sqft | AreaUnit::Acre => area_sqm / SQM_PER_PYEONG,
    };

    let output = UnitPriceOutput {
        price_per_pyeong: round_to_won(checked_ratio(
            input.total_price,
            area_pyeong,
            "unit price",
        )?),
        price_per_sqm: round_to_won(checked_ratio(input.total_price, area_sqm, "unit price")?),
        area_sqm: round_to(area_sqm, 2),
        area_pyeong: round_to(area_pyeong, 2),
    };

    Ok(with_metadata(
        "Total price over area",
        &serde_json::json!({ "unit": input.unit }),
        Vec::new(),
        output,
    ))
}

// ---------------------------------------------------------------------------
// Land share
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandShareInput {
    pub total_land_area: Area,
    pub total_building_area: Area,
    pub unit_area: Area,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandShareOutput {
    pub land_share_sqm: Area,
    pub land_share_pyeong: Area,
    pub share_ratio: Percent,
}

/// A unit's share of the site, pro rata to its floor area.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_land_share(
    input: &LandShareInput,
) -> CalcResult<ComputationOutput<LandShareOutput>> {
    require_positive("total_land_area", input.total_land_area, "대지면적은 0보다 커야 합니다.")?;
    require_positive(
        "total_building_area",
        input.total_building_area,
        "전체연면적은 0보다 커야 합니다.",
    )?;
    require_positive("unit_area", input.unit_area, "전용면적은 0보다 커야 합니다.")?;
    if input.unit_area > input.total_building_area {
        return Err(CalcError::rule(
            "unit_area",
            "전용면적은 전체연면적보다 클 수 없습니다.",
        ));
    }

    let share = input.unit_area / input.total_building_area;
    let land_share_sqm = input.total_land_area * share;

    let output = LandShareOutput {
        land_share_sqm: round_to(land_share_sqm, 2),
        land_share_pyeong: round_to(land_share_sqm / SQM_PER_PYEONG, 2),
        share_ratio: ratio_percent(input.unit_area, input.total_building_area, 2)?,
    };

    Ok(with_metadata(
        "Site area x unit area / gross floor area",
        &serde_json::json!({}),
        Vec::new(),
        output,
    ))
}

// ---------------------------------------------------------------------------
// Coverage and floor-area ratios
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRatioInput {
    pub land_area: Area,
    pub building_area: Area,
    pub total_floor_area: Area,
    pub floors: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingRatioOutput {
    /// 건폐율
    pub building_coverage_ratio: Percent,
    /// 용적률
    pub floor_area_ratio: Percent,
    pub avg_floor_area: Area,
    pub building_area_sqm: Area,
    pub building_area_pyeong: Area,
    pub total_floor_area_sqm: Area,
    pub total_floor_area_pyeong: Area,
    pub land_area_sqm: Area,
    pub land_area_pyeong: Area,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_building_ratio(
    input: &BuildingRatioInput,
) -> CalcResult<ComputationOutput<BuildingRatioOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive("land_area", input.land_area, "대지면적은 0보다 커야 합니다.")?;
    require_positive("building_area", input.building_area, "건축면적은 0보다 커야 합니다.")?;
    require_positive("total_floor_area", input.total_floor_area, "연면적은 0보다 커야 합니다.")?;
    require_count("floors", input.floors, 1, u32::MAX, "층수는 0보다 커야 합니다.")?;

    let building_coverage_ratio = ratio_percent(input.building_area, input.land_area, 2)?;
    if building_coverage_ratio > Decimal::ONE_HUNDRED {
        warnings.push("건축면적이 대지면적보다 큽니다.".to_string());
    }

    let output = BuildingRatioOutput {
        building_coverage_ratio,
        floor_area_ratio: ratio_percent(input.total_floor_area, input.land_area, 2)?,
        avg_floor_area: round_to(input.total_floor_area / Decimal::from(input.floors), 2),
        building_area_sqm: input.building_area,
        building_area_pyeong: round_to(input.building_area * PYEONG_PER_SQM, 2),
        total_floor_area_sqm: input.total_floor_area,
        total_floor_area_pyeong: round_to(input.total_floor_area * PYEONG_PER_SQM, 2),
        land_area_sqm: input.land_area,
        land_area_pyeong: round_to(input.land_area * PYEONG_PER_SQM, 2),
    };

    Ok(with_metadata(
        "Coverage = building / land, FAR = gross floor / land",
        &serde_json::json!({ "pyeong_per_sqm": PYEONG_PER_SQM.to_string() }),
        warnings,
        output,
    ))
}
