//! Building-side valuation: the official standard price of a structure, VAT
//! on the building portion of a sale, straight-line residual value and the
//! reconstruction timetable.

use chrono::Datelike;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{percent_to_rate, ratio_percent, round_to, round_to_won};
use crate::tables::building::{
    DepreciationStructure, ReconstructionStructure, MINIMUM_RESIDUAL_RATE,
};
use crate::tables::fees::VAT_RATE;
use crate::tables::units::PYEONG_PER_SQM;
use crate::types::{with_metadata, Area, ComputationOutput, Money, Percent};
use crate::validation::{require_non_negative, require_positive, require_range};
use crate::CalcResult;

const EARLIEST_APPROVAL_YEAR: i32 = 1900;
const LATEST_REFERENCE_YEAR: i32 = 9999;

// ---------------------------------------------------------------------------
// Standard building price
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPriceInput {
    pub area: Area,
    /// 건물신축가격기준액, won per m2.
    pub construction_price_per_sqm: Money,
    pub structure_index: Decimal,
    pub use_index: Decimal,
    pub location_index: Decimal,
    /// 경과연수별잔가율, percent.
    pub age_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingPriceOutput {
    pub standard_price: Money,
    pub price_per_sqm: Money,
    pub price_per_pyeong: Money,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_building_price(
    input: &BuildingPriceInput,
) -> CalcResult<ComputationOutput<BuildingPriceOutput>> {
    require_positive("area", input.area, "면적은 0보다 커야 합니다.")?;
    require_positive(
        "construction_price_per_sqm",
        input.construction_price_per_sqm,
        "건물신축가격기준액은 0보다 커야 합니다.",
    )?;
    require_positive("structure_index", input.structure_index, "구조지수는 0보다 커야 합니다.")?;
    require_positive("use_index", input.use_index, "용도지수는 0보다 커야 합니다.")?;
    require_positive("location_index", input.location_index, "위치지수는 0보다 커야 합니다.")?;
    require_range(
        "age_rate",
        input.age_rate,
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
        "경과연수별잔가율은 0 이상 100 이하여야 합니다.",
    )?;

    let price_per_sqm = round_to_won(
        input.construction_price_per_sqm
            * input.structure_index
            * input.use_index
            * input.location_index
            * percent_to_rate(input.age_rate),
    );

    let output = BuildingPriceOutput {
        standard_price: round_to_won(input.area * price_per_sqm),
        price_per_sqm,
        price_per_pyeong: round_to_won(price_per_sqm / PYEONG_PER_SQM),
    };

    Ok(with_metadata(
        "Base price x structure x use x location x residual rate",
        &serde_json::json!({}),
        Vec::new(),
        output,
    ))
}

// ---------------------------------------------------------------------------
// VAT on the building portion
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingVatInput {
    pub total_price: Money,
    pub land_price: Money,
    /// Falls back to `total_price - land_price` when absent or zero.
    pub building_price: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingVatOutput {
    pub building_price: Money,
    pub land_price: Money,
    pub building_ratio: Percent,
    pub vat: Money,
    pub total_with_vat: Money,
}

/// Land is VAT-exempt, so only the building share of a sale carries VAT.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_building_vat(
    input: &BuildingVatInput,
) -> CalcResult<ComputationOutput<BuildingVatOutput>> {
    require_positive("total_price", input.total_price, "거래총액은 0보다 커야 합니다.")?;
    require_non_negative("land_price", input.land_price, "토지가는 0 이상이어야 합니다.")?;
    if let Some(building) = input.building_price {
        require_non_negative("building_price", building, "건물가는 0 이상이어야 합니다.")?;
    }

    let building_price = match input.building_price {
        Some(building) if building > Decimal::ZERO => round_to_won(building),
        _ => round_to_won(input.total_price - input.land_price),
    };
    if building_price < Decimal::ZERO {
        return Err(CalcError::rule("land_price", "건물가는 0 이상이어야 합니다."));
    }
    // a declared split may overshoot the total, but not by half
    if input.land_price + building_price > input.total_price * dec!(1.5) {
        return Err(CalcError::rule(
            "building_price",
            "토지가와 건물가의 합이 거래총액을 크게 초과합니다.",
        ));
    }

    let vat = round_to_won(building_price * VAT_RATE);
    let output = BuildingVatOutput {
        building_price,
        land_price: input.land_price,
        building_ratio: ratio_percent(building_price, input.total_price, 2)?,
        vat,
        total_with_vat: round_to_won(input.total_price + vat),
    };

    Ok(with_metadata(
        "10% VAT on the building portion only",
        &serde_json::json!({ "building_price_given": input.building_price.is_some() }),
        Vec::new(),
        output,
    ))
}

// ---------------------------------------------------------------------------
// Residual value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemainingValueInput {
    pub original_value: Money,
    pub elapsed_years: u32,
    pub structure_type: DepreciationStructure,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemainingValueOutput {
    pub original_value: Money,
    pub useful_life: u32,
    pub depreciation_amount: Money,
    pub remaining_value: Money,
    /// Percent, 2dp.
    pub depreciation_rate: Percent,
}

/// Straight-line depreciation over the structure's useful life, floored at
/// ten percent of the new-build value.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_remaining_value(
    input: &RemainingValueInput,
) -> CalcResult<ComputationOutput<RemainingValueOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive("original_value", input.original_value, "신축가액은 0보다 커야 합니다.")?;
    let useful_life = input.structure_type.useful_life();
    if input.elapsed_years > useful_life {
        return Err(CalcError::rule(
            "elapsed_years",
            format!("경과연수는 내용연수 {useful_life}년을 초과할 수 없습니다."),
        ));
    }

    let depreciation_rate = round_to(
        Decimal::from(input.elapsed_years) / Decimal::from(useful_life),
        4,
    );
    let straight_line = round_to_won(input.original_value * (Decimal::ONE - depreciation_rate));
    let floor = round_to_won(input.original_value * MINIMUM_RESIDUAL_RATE);
    let remaining_value = if straight_line < floor {
        warnings.push("최저 잔존가치(신축가액의 10%)가 적용되었습니다.".to_string());
        floor
    } else {
        straight_line
    };

    let output = RemainingValueOutput {
        original_value: input.original_value,
        useful_life,
        depreciation_amount: input.original_value - remaining_value,
        remaining_value,
        depreciation_rate: round_to(depreciation_rate * Decimal::ONE_HUNDRED, 2),
    };

    Ok(with_metadata(
        "Straight-line depreciation with a 10% residual floor",
        &serde_json::json!({ "structure_type": input.structure_type }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Reconstruction timetable
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionInput {
    pub approval_year: i32,
    pub building_type: ReconstructionStructure,
    /// Reference year for the elapsed age. The current calendar year when
    /// omitted.
    #[serde(default)]
    pub as_of_year: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconstructionOutput {
    pub standard_years: u32,
    pub minimum_years: u32,
    pub reconstruction_year: i32,
    pub early_reconstruction_year: i32,
    pub elapsed_years: i32,
    pub remaining_years: i32,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_reconstruction(
    input: &ReconstructionInput,
) -> CalcResult<ComputationOutput<ReconstructionOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    let as_of_year = match input.as_of_year {
        Some(year) => year,
        None => {
            warnings.push("기준연도가 없어 현재 연도를 사용했습니다.".to_string());
            chrono::Local::now().year()
        }
    };
    if as_of_year > LATEST_REFERENCE_YEAR {
        return Err(CalcError::invalid(
            "as_of_year",
            "기준연도는 9999년 이하여야 합니다.",
        ));
    }
    if input.approval_year < EARLIEST_APPROVAL_YEAR {
        return Err(CalcError::invalid(
            "approval_year",
            "사용승인일은 1900년 이후여야 합니다.",
        ));
    }
    if input.approval_year > as_of_year {
        return Err(CalcError::invalid(
            "approval_year",
            "사용승인일은 현재 연도를 초과할 수 없습니다.",
        ));
    }

    let age = input.building_type.age();
    let standard = age.standard as i32;
    let elapsed_years = as_of_year - input.approval_year;

    let output = ReconstructionOutput {
        standard_years: age.standard,
        minimum_years: age.minimum,
        reconstruction_year: input.approval_year + standard,
        early_reconstruction_year: input.approval_year + age.minimum as i32,
        elapsed_years,
        remaining_years: (standard - elapsed_years).max(0),
    };

    Ok(with_metadata(
        "Reconstruction age by structure",
        &serde_json::json!({ "as_of_year": as_of_year }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_price() {
        let r = calculate_building_price(&BuildingPriceInput {
            area: dec!(100),
            construction_price_per_sqm: dec!(820_000),
            structure_index: dec!(1.0),
            use_index: dec!(1.0),
            location_index: dec!(1.0),
            age_rate: dec!(80),
        })
        .unwrap()
        .result;
        assert_eq!(r.price_per_sqm, dec!(656_000));
        assert_eq!(r.standard_price, dec!(65_600_000));
        assert_eq!(r.price_per_pyeong, dec!(2_168_595));
    }

    #[test]
    fn test_building_price_rejects_age_rate_over_100() {
        let err = calculate_building_price(&BuildingPriceInput {
            area: dec!(100),
            construction_price_per_sqm: dec!(820_000),
            structure_index: dec!(1),
            use_index: dec!(1),
            location_index: dec!(1),
            age_rate: dec!(101),
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("age_rate"));
    }

    #[test]
    fn test_building_vat_derives_building_price() {
        let r = calculate_building_vat(&BuildingVatInput {
            total_price: dec!(500_000_000),
            land_price: dec!(300_000_000),
            building_price: None,
        })
        .unwrap()
        .result;
        assert_eq!(r.building_price, dec!(200_000_000));
        assert_eq!(r.vat, dec!(20_000_000));
        assert_eq!(r.building_ratio, dec!(40));
        assert_eq!(r.total_with_vat, dec!(520_000_000));
    }

    #[test]
    fn test_building_vat_split_far_above_total() {
        let err = calculate_building_vat(&BuildingVatInput {
            total_price: dec!(500_000_000),
            land_price: dec!(400_000_000),
            building_price: Some(dec!(400_000_000)),
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::DomainRule { .. }));
    }

    #[test]
    fn test_building_vat_land_above_total() {
        let err = calculate_building_vat(&BuildingVatInput {
            total_price: dec!(300_000_000),
            land_price: dec!(400_000_000),
            building_price: None,
        })
        .unwrap_err();
        assert_eq!(err.reason(), "건물가는 0 이상이어야 합니다.");
    }

    #[test]
    fn test_remaining_value_straight_line() {
        let out = calculate_remaining_value(&RemainingValueInput {
            original_value: dec!(1_000_000_000),
            elapsed_years: 10,
            structure_type: DepreciationStructure::Rc,
        })
        .unwrap();
        assert_eq!(out.result.remaining_value, dec!(800_000_000));
        assert_eq!(out.result.depreciation_amount, dec!(200_000_000));
        assert_eq!(out.result.depreciation_rate, dec!(20));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_remaining_value_floor() {
        let out = calculate_remaining_value(&RemainingValueInput {
            original_value: dec!(1_000_000_000),
            elapsed_years: 48,
            structure_type: DepreciationStructure::Rc,
        })
        .unwrap();
        assert_eq!(out.result.remaining_value, dec!(100_000_000));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_remaining_value_past_useful_life() {
        let err = calculate_remaining_value(&RemainingValueInput {
            original_value: dec!(1_000_000),
            elapsed_years: 21,
            structure_type: DepreciationStructure::Container,
        })
        .unwrap_err();
        assert_eq!(err.reason(), "경과연수는 내용연수 20년을 초과할 수 없습니다.");
    }

    #[test]
    fn test_reconstruction_with_fixed_year() {
        let out = calculate_reconstruction(&ReconstructionInput {
            approval_year: 1990,
            building_type: ReconstructionStructure::Rc,
            as_of_year: Some(2025),
        })
        .unwrap();
        let r = out.result;
        assert_eq!(r.reconstruction_year, 2030);
        assert_eq!(r.early_reconstruction_year, 2020);
        assert_eq!(r.elapsed_years, 35);
        assert_eq!(r.remaining_years, 5);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_reconstruction_overdue_has_zero_remaining() {
        let r = calculate_reconstruction(&ReconstructionInput {
            approval_year: 1970,
            building_type: ReconstructionStructure::Wood,
            as_of_year: Some(2025),
        })
        .unwrap()
        .result;
        assert_eq!(r.remaining_years, 0);
    }

    #[test]
    fn test_reconstruction_future_approval() {
        assert!(calculate_reconstruction(&ReconstructionInput {
            approval_year: 2030,
            building_type: ReconstructionStructure::Steel,
            as_of_year: Some(2025),
        })
        .is_err());
    }

    #[test]
    fn test_reference_year_far_in_the_future_rejected() {
        let err = calculate_reconstruction(&ReconstructionInput {
            approval_year: i32::MAX - 10,
            building_type: ReconstructionStructure::Rc,
            as_of_year: Some(i32::MAX),
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("as_of_year"));

        let r = calculate_reconstruction(&ReconstructionInput {
            approval_year: 9999,
            building_type: ReconstructionStructure::Rc,
            as_of_year: Some(9999),
        })
        .unwrap()
        .result;
        assert_eq!(r.reconstruction_year, 10_029);
    }
}
