use realty_calc_core::fees::{
    calculate_appraisal_fee, calculate_attorney_fee, calculate_brokerage, AppraisalFeeInput,
    AttorneyFeeInput, AttorneyPropertyType, BrokerageInput, ContractType,
};
use realty_calc_core::rent::{
    adjust_deposit_to_rent, adjust_rent_to_deposit, calculate_rent_increase,
    convert_jeonse_to_monthly, convert_monthly_to_jeonse, rent_conversion_rate, RentAdjustInput,
    RentConvertInput, RentIncreaseInput,
};
use realty_calc_core::CalcError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Jeonse / monthly conversion
// ===========================================================================

#[test]
fn test_jeonse_to_monthly() {
    let out = convert_jeonse_to_monthly(&RentConvertInput {
        jeonse_deposit: Some(dec!(300_000_000)),
        monthly_deposit: dec!(100_000_000),
        monthly_rent: None,
        conversion_rate: dec!(5),
    })
    .unwrap();
    assert_eq!(out.result.monthly_rent, Some(dec!(833_333)));
    assert_eq!(out.result.jeonse_equivalent, None);
}

#[test]
fn test_monthly_to_jeonse_and_implied_rate() {
    let r = convert_monthly_to_jeonse(&RentConvertInput {
        jeonse_deposit: None,
        monthly_deposit: dec!(100_000_000),
        monthly_rent: Some(dec!(1_000_000)),
        conversion_rate: dec!(5),
    })
    .unwrap()
    .result;
    assert_eq!(r.jeonse_equivalent, Some(dec!(340_000_000)));
    assert_eq!(
        rent_conversion_rate(dec!(340_000_000), dec!(100_000_000), dec!(1_000_000)).unwrap(),
        dec!(5)
    );
}

#[test]
fn test_deposit_must_stay_below_jeonse() {
    let err = convert_jeonse_to_monthly(&RentConvertInput {
        jeonse_deposit: Some(dec!(100_000_000)),
        monthly_deposit: dec!(100_000_000),
        monthly_rent: None,
        conversion_rate: dec!(5),
    })
    .unwrap_err();
    assert!(matches!(err, CalcError::DomainRule { .. }));
}

#[test]
fn test_zero_conversion_rate_is_rejected() {
    let err = convert_monthly_to_jeonse(&RentConvertInput {
        jeonse_deposit: None,
        monthly_deposit: dec!(10_000_000),
        monthly_rent: Some(dec!(500_000)),
        conversion_rate: Decimal::ZERO,
    })
    .unwrap_err();
    assert_eq!(err.field(), Some("conversion_rate"));
}

// ===========================================================================
// Adjustment and renewal
// ===========================================================================

#[test]
fn test_deposit_increase_lowers_rent() {
    let r = adjust_deposit_to_rent(&RentAdjustInput {
        current_deposit: dec!(50_000_000),
        current_rent: dec!(1_000_000),
        new_deposit: Some(dec!(74_000_000)),
        new_rent: None,
        conversion_rate: dec!(5),
    })
    .unwrap()
    .result;
    assert_eq!(r.deposit_diff, dec!(24_000_000));
    assert_eq!(r.new_rent, dec!(900_000));
    assert_eq!(r.rent_diff, dec!(-100_000));
}

#[test]
fn test_rent_increase_beyond_deposit_clamps_to_zero() {
    let out = adjust_rent_to_deposit(&RentAdjustInput {
        current_deposit: dec!(10_000_000),
        current_rent: dec!(500_000),
        new_deposit: None,
        new_rent: Some(dec!(1_500_000)),
        conversion_rate: dec!(6),
    })
    .unwrap();
    // 1,000,000 x 12 / 0.06 = 200M of deposit against 10M available
    assert_eq!(out.result.new_deposit, Decimal::ZERO);
    assert_eq!(out.result.deposit_diff, dec!(-200_000_000));
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_renewal_increase_two_methods() {
    let r = calculate_rent_increase(&RentIncreaseInput {
        current_deposit: dec!(100_000_000),
        current_rent: dec!(500_000),
        conversion_rate: dec!(5),
        increase_rate: dec!(5),
    })
    .unwrap()
    .result;
    assert_eq!(r.method1.new_deposit, dec!(111_000_000));
    assert_eq!(r.method1.new_rent, dec!(500_000));
    assert_eq!(r.method2.new_deposit, dec!(105_000_000));
    assert_eq!(r.method2.new_rent, dec!(525_000));
    assert_eq!(r.method2.total_increase, dec!(5_300_000));
}

#[test]
fn test_renewal_increase_capped_at_five_percent() {
    let err = calculate_rent_increase(&RentIncreaseInput {
        current_deposit: dec!(100_000_000),
        current_rent: dec!(0),
        conversion_rate: dec!(5),
        increase_rate: dec!(5.5),
    })
    .unwrap_err();
    assert_eq!(err.reason(), "주택임대차보호법상 최대 5%입니다.");
}

// ===========================================================================
// Fees
// ===========================================================================

#[test]
fn test_brokerage_from_korean_json() {
    let json = r#"{
        "contract_type": "매매",
        "property_type": "주택",
        "transaction_amount": "300000000"
    }"#;
    let input: BrokerageInput = serde_json::from_str(json).unwrap();
    assert_eq!(input.contract_type, ContractType::Sale);
    assert_eq!(input.monthly_rent, None);

    let r = calculate_brokerage(&input).unwrap().result;
    assert_eq!(r.commission, dec!(1_200_000));
    assert_eq!(r.total_with_vat, dec!(1_200_000));
}

#[test]
fn test_attorney_and_appraisal_totals() {
    let attorney = calculate_attorney_fee(&AttorneyFeeInput {
        property_price: dec!(300_000_000),
        property_type: AttorneyPropertyType::Housing,
        include_public_costs: true,
    })
    .unwrap()
    .result;
    assert_eq!(attorney.total_fee, dec!(538_000));

    let appraisal = calculate_appraisal_fee(&AppraisalFeeInput {
        appraisal_value: dec!(300_000_000),
    })
    .unwrap()
    .result;
    assert_eq!(appraisal.base_fee + appraisal.vat, appraisal.total_fee);
    assert_eq!(appraisal.total_fee, dec!(681_450));
}
