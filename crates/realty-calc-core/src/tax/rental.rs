//! Taxes that fall on landlords: separate taxation of rental income, deemed
//! rent on deposits, and the credit for cutting rent.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{percent_to_rate, round_to_won};
use crate::tables::personal_income::{
    DEEMED_RENTAL_DEPOSIT_FLOOR, DEEMED_RENTAL_RESIDENTIAL_SHARE, GOOD_LANDLORD_CREDIT_RATE,
    REGISTERED_BASIC_DEDUCTION, REGISTERED_EXPENSE_RATE, RENTAL_SEPARATE_TAX_RATE,
    UNREGISTERED_BASIC_DEDUCTION, UNREGISTERED_EXPENSE_RATE,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{require_count, require_non_negative, require_positive, require_range};
use crate::CalcResult;

const DAYS_PER_YEAR: Decimal = dec!(365);

// ---------------------------------------------------------------------------
// Rental income tax
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalIncomeTaxInput {
    pub monthly_rent: Money,
    pub deposit: Money,
    pub rental_months: u32,
    /// Registered rental business operator.
    pub is_registered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalIncomeTaxOutput {
    pub annual_income: Money,
    pub expenses: Money,
    pub basic_deduction: Money,
    pub taxable_income: Money,
    pub calculated_tax: Money,
}

/// 14% separate tax on annualised rent after the deemed expense ratio and
/// basic deduction.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_rental_income_tax(
    input: &RentalIncomeTaxInput,
) -> CalcResult<ComputationOutput<RentalIncomeTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_non_negative("monthly_rent", input.monthly_rent, "월세수입은 0 이상이어야 합니다.")?;
    require_non_negative("deposit", input.deposit, "보증금은 0 이상이어야 합니다.")?;
    require_count(
        "rental_months",
        input.rental_months,
        1,
        u32::MAX,
        "임대기간은 0보다 커야 합니다.",
    )?;

    // Income is annualised regardless of how many months were let.
    let annual_income = round_to_won(input.monthly_rent * dec!(12));

    let (expense_rate, basic_deduction) = if input.is_registered {
        (REGISTERED_EXPENSE_RATE, REGISTERED_BASIC_DEDUCTION)
    } else {
        (UNREGISTERED_EXPENSE_RATE, UNREGISTERED_BASIC_DEDUCTION)
    };
    let expenses = round_to_won(annual_income * expense_rate);
    let taxable_income = (annual_income - expenses - basic_deduction).max(Decimal::ZERO);
    let calculated_tax = round_to_won(taxable_income * RENTAL_SEPARATE_TAX_RATE);

    let output = RentalIncomeTaxOutput {
        annual_income,
        expenses,
        basic_deduction,
        taxable_income,
        calculated_tax,
    };

    Ok(with_metadata(
        "Separate taxation of housing rental income",
        &serde_json::json!({
            "expense_rate": expense_rate.to_string(),
            "separate_tax_rate": RENTAL_SEPARATE_TAX_RATE.to_string(),
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Deemed rental on deposits
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DepositPropertyType {
    Residential,
    Commercial,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeemedRentalInput {
    pub deposit: Money,
    pub rental_days: Decimal,
    /// Statutory deemed interest rate, percent.
    pub interest_rate: Percent,
    pub property_type: DepositPropertyType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeemedRentalOutput {
    pub deemed_rental: Money,
    pub taxable_deposit: Money,
    pub applied_rate: Percent,
}

/// Deemed rental income on a lease deposit. Residential deposits count
/// only above 3억 and at 60%; commercial deposits count in full.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_deemed_rental(
    input: &DeemedRentalInput,
) -> CalcResult<ComputationOutput<DeemedRentalOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive("deposit", input.deposit, "보증금은 0보다 커야 합니다.")?;
    require_positive("rental_days", input.rental_days, "임대기간은 0보다 커야 합니다.")?;
    require_positive("interest_rate", input.interest_rate, "이자율은 0보다 커야 합니다.")?;

    let rate = percent_to_rate(input.interest_rate);
    let day_fraction = input.rental_days / DAYS_PER_YEAR;

    let (taxable_deposit, deemed_rental) = match input.property_type {
        DepositPropertyType::Residential if input.deposit >= DEEMED_RENTAL_DEPOSIT_FLOOR => {
            let taxable = input.deposit - DEEMED_RENTAL_DEPOSIT_FLOOR;
            let rental =
                round_to_won(taxable * DEEMED_RENTAL_RESIDENTIAL_SHARE * rate * day_fraction);
            (taxable, rental)
        }
        DepositPropertyType::Residential => {
            warnings.push("주거용 보증금 3억원 미만: 간주임대료 없음".to_string());
            (Decimal::ZERO, Decimal::ZERO)
        }
        DepositPropertyType::Commercial => {
            (input.deposit, round_to_won(input.deposit * rate * day_fraction))
        }
    };

    let output = DeemedRentalOutput {
        deemed_rental,
        taxable_deposit,
        applied_rate: input.interest_rate,
    };

    Ok(with_metadata(
        "Deemed rental income on lease deposits",
        &serde_json::json!({
            "residential_floor": DEEMED_RENTAL_DEPOSIT_FLOOR.to_string(),
            "residential_share": DEEMED_RENTAL_RESIDENTIAL_SHARE.to_string(),
            "days_per_year": 365,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Good-landlord credit
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodLandlordInput {
    pub previous_rent: Money,
    pub reduced_rent: Money,
    pub months_reduced: u32,
    /// Landlord's marginal income tax rate, percent.
    pub tax_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodLandlordOutput {
    pub rent_reduction: Money,
    pub total_reduction: Money,
    pub tax_credit: Money,
    pub actual_tax_savings: Money,
    pub net_burden_reduction: Money,
}

/// Tax credit of 70% of the rent given up, and what it is worth at the
/// landlord's own marginal rate.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_good_landlord(
    input: &GoodLandlordInput,
) -> CalcResult<ComputationOutput<GoodLandlordOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_non_negative("previous_rent", input.previous_rent, "기존 월세는 0 이상이어야 합니다.")?;
    require_non_negative("reduced_rent", input.reduced_rent, "인하된 월세는 0 이상이어야 합니다.")?;
    if input.months_reduced == 0 {
        return Err(CalcError::invalid("months_reduced", "인하 개월수는 0보다 커야 합니다."));
    }
    require_count(
        "months_reduced",
        input.months_reduced,
        1,
        12,
        "인하 개월수는 12개월 이하여야 합니다.",
    )?;
    if input.tax_rate < dec!(6) {
        return Err(CalcError::invalid("tax_rate", "세율은 6% 이상이어야 합니다."));
    }
    require_range("tax_rate", input.tax_rate, dec!(6), dec!(45), "세율은 45% 이하여야 합니다.")?;

    let rent_reduction = round_to_won(input.previous_rent - input.reduced_rent);
    if rent_reduction < Decimal::ZERO {
        return Err(CalcError::rule(
            "reduced_rent",
            "인하된 월세가 기존 월세보다 클 수 없습니다.",
        ));
    }

    let total_reduction = round_to_won(rent_reduction * Decimal::from(input.months_reduced));
    let tax_credit = round_to_won(total_reduction * GOOD_LANDLORD_CREDIT_RATE);
    let theoretical_savings = round_to_won(total_reduction * percent_to_rate(input.tax_rate));
    let actual_tax_savings = tax_credit.min(theoretical_savings);
    let net_burden_reduction = round_to_won(tax_credit - total_reduction + actual_tax_savings);

    let output = GoodLandlordOutput {
        rent_reduction,
        total_reduction,
        tax_credit,
        actual_tax_savings,
        net_burden_reduction,
    };

    Ok(with_metadata(
        "Good-landlord rent reduction credit",
        &serde_json::json!({ "credit_rate": GOOD_LANDLORD_CREDIT_RATE.to_string() }),
        warnings,
        output,
    ))
}
