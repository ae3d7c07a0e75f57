//! Registration costs: the judicial scrivener's fee and the full quote of
//! taxes, bond cost and fees payable when title is registered.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::round_to_won;
use crate::tables::acquisition::{
    banded_single_home_rate, FIRST_TIME_BUYER_DISCOUNT, LOCAL_EDUCATION_TAX_RATE, LOWER_THRESHOLD,
    NON_HOUSING_EDUCATION_RATE, NON_HOUSING_RATE, RURAL_SPECIAL_TAX_RATE,
    THREE_HOMES_REGULATED_RATE, TWO_HOMES_REGULATED_RATE,
};
use crate::tables::fees::{
    ATTORNEY_BASE_FEE, ATTORNEY_MISC_COSTS, BOND_DISCOUNT_RATE, OTHER_BOND_RATE,
    REGISTRATION_ATTORNEY_FEE, REGISTRATION_SEAL, REVENUE_SEAL, SEOUL_BOND_RATE,
};
use crate::tables::units::WON_PER_MANWON;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::validation::require_positive;
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Scrivener fee
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttorneyPropertyType {
    #[serde(rename = "주택")]
    Housing,
    #[serde(rename = "그외건물")]
    OtherBuilding,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttorneyFeeInput {
    pub property_price: Money,
    pub property_type: AttorneyPropertyType,
    /// Add revenue and registration seals to the quote.
    pub include_public_costs: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttorneyFeeOutput {
    pub base_fee: Money,
    pub revenue_seal: Money,
    pub registration_seal: Money,
    pub miscellaneous_costs: Money,
    /// Zero unless public costs were requested.
    pub public_costs: Money,
    pub total_fee: Money,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_attorney_fee(
    input: &AttorneyFeeInput,
) -> CalcResult<ComputationOutput<AttorneyFeeOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive("property_price", input.property_price, "부동산 가액은 0보다 커야 합니다.")?;

    let base_fee = round_to_won(ATTORNEY_BASE_FEE.amount(input.property_price));
    let revenue_seal = *REVENUE_SEAL.lookup(input.property_price);
    let public_costs = if input.include_public_costs {
        revenue_seal + REGISTRATION_SEAL
    } else {
        Decimal::ZERO
    };

    let output = AttorneyFeeOutput {
        base_fee,
        revenue_seal,
        registration_seal: REGISTRATION_SEAL,
        miscellaneous_costs: ATTORNEY_MISC_COSTS,
        public_costs,
        total_fee: round_to_won(base_fee + public_costs + ATTORNEY_MISC_COSTS),
    };

    Ok(with_metadata(
        "Judicial scrivener fee schedule",
        &serde_json::json!({
            "property_type": input.property_type,
            "include_public_costs": input.include_public_costs,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Registration cost quote
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationPropertyType {
    #[serde(rename = "주택")]
    Housing,
    #[serde(rename = "오피스텔")]
    Officetel,
    #[serde(rename = "기타건물")]
    OtherBuilding,
    #[serde(rename = "토지")]
    Land,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegistrationRegion {
    #[serde(rename = "서울")]
    Seoul,
    #[serde(rename = "수도권")]
    Capital,
    #[serde(rename = "광역시")]
    Metropolitan,
    #[serde(rename = "기타지역")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HousingCount {
    #[serde(rename = "1주택")]
    One,
    #[serde(rename = "2주택")]
    Two,
    #[serde(rename = "3주택이상")]
    ThreeOrMore,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationCostInput {
    pub property_price: Money,
    pub property_type: RegistrationPropertyType,
    pub region: RegistrationRegion,
    /// Exclusive floor area in m2.
    pub area: Decimal,
    pub housing_count: HousingCount,
    pub is_self_registration: bool,
    pub is_first_time_buyer: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrationCostOutput {
    /// Before the first-time buyer discount.
    pub acquisition_tax: Money,
    pub local_education_tax: Money,
    pub rural_special_tax: Money,
    pub housing_bond_purchase: Money,
    pub housing_bond_actual_cost: Money,
    pub attorney_fee: Money,
    pub first_time_buyer_discount: Money,
    pub total_taxes: Money,
    pub total_cost: Money,
}

/// Everything a buyer pays at registration: acquisition tax and surtaxes,
/// the loss on the compulsory housing bond, and the scrivener.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_registration_cost(
    input: &RegistrationCostInput,
) -> CalcResult<ComputationOutput<RegistrationCostOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive("property_price", input.property_price, "매매가는 0보다 커야 합니다.")?;
    require_positive("area", input.area, "전용면적은 0보다 커야 합니다.")?;

    let is_housing = input.property_type == RegistrationPropertyType::Housing;

    // --- 1. Acquisition tax and surtaxes ---
    let rate = registration_acquisition_rate(
        input.property_type,
        input.housing_count,
        input.property_price,
    );
    let acquisition_tax = round_to_won(input.property_price * rate);
    let education_rate = if is_housing {
        LOCAL_EDUCATION_TAX_RATE
    } else {
        NON_HOUSING_EDUCATION_RATE
    };
    let local_education_tax = round_to_won(acquisition_tax * education_rate);
    let rural_special_tax = if is_housing && input.property_price > LOWER_THRESHOLD {
        round_to_won(input.property_price * RURAL_SPECIAL_TAX_RATE)
    } else {
        Decimal::ZERO
    };

    // --- 2. Housing bond ---
    let price_manwon = input.property_price / WON_PER_MANWON;
    let bond_rate = match input.region {
        RegistrationRegion::Seoul => *SEOUL_BOND_RATE.lookup(price_manwon),
        RegistrationRegion::Capital
        | RegistrationRegion::Metropolitan
        | RegistrationRegion::Other => *OTHER_BOND_RATE.lookup(price_manwon),
    };
    let housing_bond_purchase = round_to_won(input.property_price * bond_rate);
    let housing_bond_actual_cost = round_to_won(housing_bond_purchase * BOND_DISCOUNT_RATE);

    // --- 3. Fees and discount ---
    let attorney_fee = if input.is_self_registration {
        Decimal::ZERO
    } else {
        REGISTRATION_ATTORNEY_FEE
    };
    let first_time_buyer_discount =
        if input.is_first_time_buyer && is_housing && input.housing_count == HousingCount::One {
            acquisition_tax.min(FIRST_TIME_BUYER_DISCOUNT)
        } else {
            Decimal::ZERO
        };

    let total_taxes = round_to_won(
        acquisition_tax - first_time_buyer_discount + local_education_tax + rural_special_tax,
    );
    let total_cost = round_to_won(total_taxes + housing_bond_actual_cost + attorney_fee);

    let output = RegistrationCostOutput {
        acquisition_tax,
        local_education_tax,
        rural_special_tax,
        housing_bond_purchase,
        housing_bond_actual_cost,
        attorney_fee,
        first_time_buyer_discount,
        total_taxes,
        total_cost,
    };

    Ok(with_metadata(
        "Registration cost quote: taxes, bond discount and scrivener",
        &serde_json::json!({
            "acquisition_rate": rate.to_string(),
            "bond_rate": bond_rate.to_string(),
        }),
        warnings,
        output,
    ))
}

fn registration_acquisition_rate(
    property: RegistrationPropertyType,
    count: HousingCount,
    price: Money,
) -> Rate {
    use RegistrationPropertyType::*;
    match (property, count) {
        (Housing, HousingCount::One) => banded_single_home_rate(price),
        (Housing, HousingCount::Two) => TWO_HOMES_REGULATED_RATE,
        (Housing, HousingCount::ThreeOrMore) => THREE_HOMES_REGULATED_RATE,
        (Officetel | OtherBuilding | Land, _) => NON_HOUSING_RATE,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
