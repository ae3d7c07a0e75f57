use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::{ratio_percent, round_to, round_to_won};
use crate::tables::acquisition::{
    single_home_rate, FIRST_TIME_BUYER_DISCOUNT, LOCAL_EDUCATION_TAX_RATE, LOWER_THRESHOLD,
    RURAL_SPECIAL_TAX_RATE, THREE_HOMES_REGULATED_RATE, THREE_HOMES_UNREGULATED_RATE,
    TWO_HOMES_REGULATED_RATE,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation::{require_count, require_positive};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionTaxInput {
    pub purchase_price: Money,
    /// Homes held after this purchase, 1 to 3 (3 means three or more).
    pub housing_count: u32,
    pub is_regulated: bool,
    pub is_first_time_buyer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionTaxOutput {
    /// After the first-time buyer discount.
    pub acquisition_tax: Money,
    pub local_education_tax: Money,
    pub rural_special_tax: Money,
    pub total_tax: Money,
    pub effective_rate: Percent,
    pub first_time_buyer_discount: Money,
    pub tax_rate: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Statutory acquisition tax rate for a home purchase.
///
/// A second home in a regulated area pays 8%, a third pays 12% (8% outside
/// regulated areas). Everything else pays the single-home rate.
pub fn acquisition_tax_rate(price: Money, housing_count: u32, is_regulated: bool) -> Rate {
    match (housing_count, is_regulated) {
        (0 | 1, _) | (2, false) => single_home_rate(price),
        (2, true) => TWO_HOMES_REGULATED_RATE,
        (_, true) => THREE_HOMES_REGULATED_RATE,
        (_, false) => THREE_HOMES_UNREGULATED_RATE,
    }
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_acquisition_tax(
    input: &AcquisitionTaxInput,
) -> CalcResult<ComputationOutput<AcquisitionTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    validate_acquisition_input(input)?;

    // --- 1. Rate and gross tax ---
    let rate = acquisition_tax_rate(input.purchase_price, input.housing_count, input.is_regulated);
    let gross_tax = round_to_won(input.purchase_price * rate);

    // --- 2. First-time buyer discount ---
    let first_time_buyer_discount = if input.is_first_time_buyer && input.housing_count == 1 {
        FIRST_TIME_BUYER_DISCOUNT.min(gross_tax)
    } else {
        Decimal::ZERO
    };
    let acquisition_tax = gross_tax - first_time_buyer_discount;

    // --- 3. Surtaxes ---
    let local_education_tax = round_to_won(acquisition_tax * LOCAL_EDUCATION_TAX_RATE);
    let rural_special_tax = if input.purchase_price > LOWER_THRESHOLD {
        round_to_won(input.purchase_price * RURAL_SPECIAL_TAX_RATE)
    } else {
        Decimal::ZERO
    };

    let total_tax = acquisition_tax + local_education_tax + rural_special_tax;

    let output = AcquisitionTaxOutput {
        acquisition_tax,
        local_education_tax,
        rural_special_tax,
        total_tax,
        effective_rate: ratio_percent(total_tax, input.purchase_price, 2)?,
        first_time_buyer_discount,
        tax_rate: round_to(rate * dec!(100), 2),
    };

    Ok(with_metadata(
        "Home acquisition tax with education and rural surtaxes",
        &serde_json::json!({
            "applied_rate": rate.to_string(),
            "rural_special_threshold": LOWER_THRESHOLD.to_string(),
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_acquisition_input(input: &AcquisitionTaxInput) -> CalcResult<()> {
    require_positive("purchase_price", input.purchase_price, "매매가는 0보다 커야 합니다.")?;
    require_count("housing_count", input.housing_count, 1, 3, "주택 수는 1~3 사이여야 합니다.")?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn input(price: Money, count: u32, regulated: bool, first: bool) -> AcquisitionTaxInput {
        AcquisitionTaxInput {
            purchase_price: price,
            housing_count: count,
            is_regulated: regulated,
            is_first_time_buyer: first,
        }
    }

    #[test]
    fn test_rate_lookup() {
        assert_eq!(acquisition_tax_rate(dec!(500_000_000), 1, false), dec!(0.01));
        assert_eq!(acquisition_tax_rate(dec!(600_000_000), 1, false), dec!(0.01));
        assert_eq!(acquisition_tax_rate(dec!(900_000_000), 1, false), dec!(0.03));
        assert_eq!(acquisition_tax_rate(dec!(500_000_000), 2, true), dec!(0.08));
        assert_eq!(acquisition_tax_rate(dec!(500_000_000), 2, false), dec!(0.01));
        assert_eq!(acquisition_tax_rate(dec!(500_000_000), 3, true), dec!(0.12));
        assert_eq!(acquisition_tax_rate(dec!(500_000_000), 3, false), dec!(0.08));
    }

    #[test]
    fn test_interpolated_rate() {
        let rate = acquisition_tax_rate(dec!(750_000_000), 1, false);
        assert_eq!(rate, dec!(0.02));
    }

    #[test]
    fn test_single_home_500m() {
        let out = calculate_acquisition_tax(&input(dec!(500_000_000), 1, false, false)).unwrap();
        let r = &out.result;
        assert_eq!(r.acquisition_tax, dec!(5_000_000));
        assert_eq!(r.local_education_tax, dec!(500_000));
        assert_eq!(r.rural_special_tax, Decimal::ZERO);
        assert_eq!(r.total_tax, dec!(5_500_000));
        assert_eq!(r.effective_rate, dec!(1.1));
        assert_eq!(r.tax_rate, dec!(1));
    }

    #[test]
    fn test_first_time_buyer_discount() {
        let out = calculate_acquisition_tax(&input(dec!(500_000_000), 1, false, true)).unwrap();
        assert_eq!(out.result.first_time_buyer_discount, dec!(2_000_000));
        assert_eq!(out.result.acquisition_tax, dec!(3_000_000));
        assert_eq!(out.result.local_education_tax, dec!(300_000));
    }

    #[test]
    fn test_discount_ignored_for_second_home() {
        let out = calculate_acquisition_tax(&input(dec!(500_000_000), 2, true, true)).unwrap();
        assert_eq!(out.result.first_time_buyer_discount, Decimal::ZERO);
        assert_eq!(out.result.acquisition_tax, dec!(40_000_000));
    }

    #[test]
    fn test_rural_tax_above_600m() {
        let out = calculate_acquisition_tax(&input(dec!(1_000_000_000), 1, false, false)).unwrap();
        assert_eq!(out.result.acquisition_tax, dec!(30_000_000));
        assert_eq!(out.result.rural_special_tax, dec!(2_000_000));
    }

    #[test]
    fn test_rejects_zero_price() {
        let err = calculate_acquisition_tax(&input(Decimal::ZERO, 1, false, false)).unwrap_err();
        assert_eq!(err.reason(), "매매가는 0보다 커야 합니다.");
    }

    #[test]
    fn test_rejects_housing_count_out_of_range() {
        assert!(calculate_acquisition_tax(&input(dec!(100), 4, false, false)).is_err());
        assert!(calculate_acquisition_tax(&input(dec!(100), 0, false, false)).is_err());
    }
}
