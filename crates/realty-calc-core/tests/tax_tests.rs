use realty_calc_core::tax::{
    calculate_acquisition_tax, calculate_gift_tax, calculate_transfer_tax, AcquisitionTaxInput,
    DonorRelation, GiftTaxInput, TransferTaxInput,
};
use realty_calc_core::CalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Acquisition tax
// ===========================================================================

#[test]
fn test_acquisition_tax_interpolated_band() {
    // 7.5억 sits on the straight line: 7.5 x 2/3 - 3 = 2%
    let out = calculate_acquisition_tax(&AcquisitionTaxInput {
        purchase_price: dec!(750_000_000),
        housing_count: 1,
        is_regulated: false,
        is_first_time_buyer: false,
    })
    .unwrap();
    let r = out.result;
    assert_eq!(r.tax_rate, dec!(2));
    assert_eq!(r.acquisition_tax, dec!(15_000_000));
    assert_eq!(r.local_education_tax, dec!(1_500_000));
    assert_eq!(r.rural_special_tax, dec!(1_500_000));
    assert_eq!(r.total_tax, dec!(18_000_000));
    assert_eq!(r.effective_rate, dec!(2.4));
}

#[test]
fn test_acquisition_total_is_sum_of_parts() {
    for (price, count, regulated) in [
        (dec!(300_000_000), 1, false),
        (dec!(820_000_000), 1, true),
        (dec!(1_300_000_000), 2, true),
        (dec!(450_000_000), 3, false),
    ] {
        let r = calculate_acquisition_tax(&AcquisitionTaxInput {
            purchase_price: price,
            housing_count: count,
            is_regulated: regulated,
            is_first_time_buyer: false,
        })
        .unwrap()
        .result;
        assert_eq!(
            r.total_tax,
            r.acquisition_tax + r.local_education_tax + r.rural_special_tax,
            "total mismatch at {price}"
        );
    }
}

// ===========================================================================
// Transfer tax
// ===========================================================================

fn transfer(count: u32, single: bool, holding: Decimal, residence: Decimal) -> TransferTaxInput {
    TransferTaxInput {
        acquisition_price: dec!(300_000_000),
        transfer_price: dec!(500_000_000),
        expenses: dec!(10_000_000),
        holding_years: holding,
        residence_years: residence,
        housing_count: count,
        is_single_household: single,
        is_regulated: false,
    }
}

#[test]
fn test_transfer_tax_two_home_owner() {
    let r = calculate_transfer_tax(&transfer(2, true, dec!(5), dec!(0)))
        .unwrap()
        .result;
    assert_eq!(r.capital_gain, dec!(190_000_000));
    assert_eq!(r.long_term_deduction_rate, dec!(10));
    assert_eq!(r.long_term_deduction, dec!(19_000_000));
    assert_eq!(r.taxable_income, dec!(171_000_000));
    assert_eq!(r.tax_base, dec!(168_500_000));
    assert_eq!(r.tax_rate, dec!(38));
    assert_eq!(r.calculated_tax, dec!(44_090_000));
    assert_eq!(r.local_income_tax, dec!(4_409_000));
    assert_eq!(r.total_tax, dec!(48_499_000));
    assert!(!r.is_tax_exempt);
}

#[test]
fn test_transfer_tax_single_home_exemption() {
    let r = calculate_transfer_tax(&transfer(1, true, dec!(3), dec!(3)))
        .unwrap()
        .result;
    assert!(r.is_tax_exempt);
    assert_eq!(r.total_tax, Decimal::ZERO);
    assert_eq!(
        r.tax_exempt_reason.as_deref(),
        Some("1세대 1주택 비과세 (양도가 12억 이하, 2년 보유+거주)")
    );
}

#[test]
fn test_transfer_tax_loss_is_not_an_error() {
    let input = TransferTaxInput {
        transfer_price: dec!(280_000_000),
        ..transfer(2, false, dec!(4), dec!(0))
    };
    let r = calculate_transfer_tax(&input).unwrap().result;
    assert_eq!(r.capital_gain, dec!(-30_000_000));
    assert_eq!(r.total_tax, Decimal::ZERO);
    assert_eq!(r.tax_exempt_reason.as_deref(), Some("양도차익 없음 (손실)"));
}

#[test]
fn test_transfer_tax_short_holding_flat_rate() {
    let out = calculate_transfer_tax(&transfer(2, false, dec!(0.5), dec!(0))).unwrap();
    let r = &out.result;
    assert_eq!(r.long_term_deduction, Decimal::ZERO);
    assert_eq!(r.tax_rate, dec!(45));
    assert_eq!(r.progressive_deduction, Decimal::ZERO);
    // (190M - 2.5M) x 45%
    assert_eq!(r.calculated_tax, dec!(84_375_000));
    assert_eq!(out.warnings.len(), 1);
}

// ===========================================================================
// Gift tax
// ===========================================================================

#[test]
fn test_gift_from_spouse_above_allowance() {
    let r = calculate_gift_tax(&GiftTaxInput {
        gift_value: dec!(700_000_000),
        donor_relation: DonorRelation::Spouse,
    })
    .unwrap()
    .result;
    assert_eq!(r.exemption_limit, dec!(600_000_000));
    assert_eq!(r.taxable_income, dec!(100_000_000));
    assert_eq!(r.calculated_tax, dec!(10_000_000));
    assert_eq!(r.reporting_discount, dec!(300_000));
    assert_eq!(r.final_tax, dec!(9_700_000));
}

#[test]
fn test_negative_gift_is_invalid_input() {
    let err = calculate_gift_tax(&GiftTaxInput {
        gift_value: dec!(-1),
        donor_relation: DonorRelation::Other,
    })
    .unwrap_err();
    assert!(matches!(err, CalcError::InvalidInput { .. }));
}
