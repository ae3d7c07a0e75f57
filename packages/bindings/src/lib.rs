use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use realty_calc_core::{
    distribution, fees, investment, loan, rent, tax, valuation, CalcError, CalcResult,
    ComputationOutput,
};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Calculator errors surface only their user-facing reason.
fn calc_error(e: CalcError) -> napi::Error {
    napi::Error::from_reason(e.reason())
}

/// JSON in, JSON envelope out.
fn call<I, O>(
    input_json: &str,
    calculate: fn(&I) -> CalcResult<ComputationOutput<O>>,
) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calculate(&input).map_err(calc_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_acquisition_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_acquisition_tax)
}

#[napi]
pub fn calculate_transfer_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_transfer_tax)
}

#[napi]
pub fn calculate_property_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_property_tax)
}

#[napi]
pub fn calculate_comprehensive_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_comprehensive_tax)
}

#[napi]
pub fn calculate_holding_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_holding_tax)
}

#[napi]
pub fn calculate_inheritance_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_inheritance_tax)
}

#[napi]
pub fn calculate_gift_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_gift_tax)
}

#[napi]
pub fn calculate_income_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_income_tax)
}

#[napi]
pub fn calculate_progressive_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_progressive_tax)
}

#[napi]
pub fn calculate_regional_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_regional_tax)
}

#[napi]
pub fn calculate_stamp_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_stamp_tax)
}

#[napi]
pub fn calculate_rental_income_tax(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_rental_income_tax)
}

#[napi]
pub fn calculate_deemed_rental(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_deemed_rental)
}

#[napi]
pub fn calculate_good_landlord(input_json: String) -> NapiResult<String> {
    call(&input_json, tax::calculate_good_landlord)
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan_repayment(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_loan_repayment)
}

#[napi]
pub fn calculate_ltv(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_ltv)
}

#[napi]
pub fn calculate_dti(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_dti)
}

#[napi]
pub fn calculate_dsr(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_dsr)
}

#[napi]
pub fn calculate_rti(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_rti)
}

#[napi]
pub fn calculate_max_loan(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_max_loan)
}

#[napi]
pub fn calculate_regulatory_limit(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_regulatory_limit)
}

#[napi]
pub fn calculate_foreclosure_loan(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_foreclosure_loan)
}

#[napi]
pub fn calculate_early_repayment(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_early_repayment)
}

#[napi]
pub fn calculate_overdue_interest(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_overdue_interest)
}

#[napi]
pub fn calculate_future_income(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_future_income)
}

#[napi]
pub fn calculate_estimated_income(input_json: String) -> NapiResult<String> {
    call(&input_json, loan::calculate_estimated_income)
}

// ---------------------------------------------------------------------------
// Rent
// ---------------------------------------------------------------------------

#[napi]
pub fn convert_jeonse_to_monthly(input_json: String) -> NapiResult<String> {
    call(&input_json, rent::convert_jeonse_to_monthly)
}

#[napi]
pub fn convert_monthly_to_jeonse(input_json: String) -> NapiResult<String> {
    call(&input_json, rent::convert_monthly_to_jeonse)
}

#[napi]
pub fn adjust_deposit_to_rent(input_json: String) -> NapiResult<String> {
    call(&input_json, rent::adjust_deposit_to_rent)
}

#[napi]
pub fn adjust_rent_to_deposit(input_json: String) -> NapiResult<String> {
    call(&input_json, rent::adjust_rent_to_deposit)
}

#[napi]
pub fn calculate_rent_increase(input_json: String) -> NapiResult<String> {
    call(&input_json, rent::calculate_rent_increase)
}

// ---------------------------------------------------------------------------
// Fees
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_brokerage(input_json: String) -> NapiResult<String> {
    call(&input_json, fees::calculate_brokerage)
}

#[napi]
pub fn calculate_attorney_fee(input_json: String) -> NapiResult<String> {
    call(&input_json, fees::calculate_attorney_fee)
}

#[napi]
pub fn calculate_registration_cost(input_json: String) -> NapiResult<String> {
    call(&input_json, fees::calculate_registration_cost)
}

#[napi]
pub fn calculate_appraisal_fee(input_json: String) -> NapiResult<String> {
    call(&input_json, fees::calculate_appraisal_fee)
}

#[napi]
pub fn calculate_housing_bond(input_json: String) -> NapiResult<String> {
    call(&input_json, fees::calculate_housing_bond)
}

#[napi]
pub fn calculate_eviction_cost(input_json: String) -> NapiResult<String> {
    call(&input_json, fees::calculate_eviction_cost)
}

#[napi]
pub fn calculate_auction_cost(input_json: String) -> NapiResult<String> {
    call(&input_json, fees::calculate_auction_cost)
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_auction_distribution(input_json: String) -> NapiResult<String> {
    call(&input_json, distribution::calculate_auction_distribution)
}

#[napi]
pub fn calculate_inheritance_share(input_json: String) -> NapiResult<String> {
    call(&input_json, distribution::calculate_inheritance_share)
}

// ---------------------------------------------------------------------------
// Valuation
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_area_convert(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_area_convert)
}

#[napi]
pub fn calculate_unit_price(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_unit_price)
}

#[napi]
pub fn calculate_land_share(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_land_share)
}

#[napi]
pub fn calculate_building_ratio(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_building_ratio)
}

#[napi]
pub fn calculate_building_price(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_building_price)
}

#[napi]
pub fn calculate_building_vat(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_building_vat)
}

#[napi]
pub fn calculate_remaining_value(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_remaining_value)
}

#[napi]
pub fn calculate_reconstruction(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_reconstruction)
}

#[napi]
pub fn calculate_rental_yield(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_rental_yield)
}

#[napi]
pub fn calculate_savings_interest(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_savings_interest)
}

#[napi]
pub fn calculate_date_diff(input_json: String) -> NapiResult<String> {
    call(&input_json, valuation::calculate_date_diff)
}

// ---------------------------------------------------------------------------
// Investment
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_investment_return(input_json: String) -> NapiResult<String> {
    call(&input_json, investment::calculate_investment_return)
}

#[napi]
pub fn analyze_investment(input_json: String) -> NapiResult<String> {
    call(&input_json, investment::analyze_investment)
}

// ---------------------------------------------------------------------------
// Reference data
// ---------------------------------------------------------------------------

#[napi]
pub fn regulated_regions() -> NapiResult<String> {
    serde_json::to_string(&realty_calc_core::tables::regions::regulated_regions())
        .map_err(to_napi_error)
}

#[napi]
pub fn tax_law_snapshot() -> String {
    realty_calc_core::TAX_LAW_SNAPSHOT.to_string()
}
