//! Debt-to-income screens: DTI, DSR and the rent-to-interest ratio for
//! rental-business loans.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::loan::repayment::{first_monthly_payment, RepaymentMethod};
use crate::numeric::{monthly_rate_from_annual, percent_to_rate, round_to, round_to_won};
use crate::tables::lending::{required_rti, RentalPropertyKind, MAX_LOAN_TERM_MONTHS};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{
    require_annual_rate, require_count, require_positive, require_range, MAX_AMOUNT,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtiInput {
    pub annual_income: Money,
    pub loan_amount: Money,
    pub loan_term_months: u32,
    pub loan_rate: Percent,
    pub repayment_method: RepaymentMethod,
    pub other_debt_amount: Money,
    pub other_debt_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DtiOutput {
    pub dti_rate: Percent,
    pub annual_total_repay: Money,
    pub loan_annual_repay: Money,
    /// Interest only; DTI ignores principal on other debt.
    pub other_debt_annual_interest: Money,
    pub monthly_repay: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsrInput {
    pub annual_income: Money,
    pub loan_amount: Money,
    pub loan_term_months: u32,
    pub loan_rate: Percent,
    pub repayment_method: RepaymentMethod,
    pub other_debt_amount: Money,
    /// Annual repayment rate on other debt, principal included.
    pub other_debt_rate: Percent,
    /// Added to `loan_rate` before the payment is computed.
    pub stress_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DsrOutput {
    pub dsr_rate: Percent,
    pub annual_total_repay: Money,
    pub loan_annual_repay: Money,
    pub other_debt_annual_repay: Money,
    pub monthly_repay: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtiInput {
    pub annual_rental_income: Money,
    pub loan_amount: Money,
    pub interest_rate: Percent,
    pub property_type: RentalPropertyKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RtiOutput {
    pub rti_ratio: Decimal,
    pub annual_rental_income: Money,
    pub annual_interest_cost: Money,
    pub is_qualified: bool,
    pub required_rti: Decimal,
    pub max_loan_amount: Money,
}

/// Annual burden of the new loan and of existing debt.
struct DebtService {
    monthly: Money,
    loan_annual: Money,
    other_annual: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_dti(input: &DtiInput) -> CalcResult<ComputationOutput<DtiOutput>> {
    let warnings: Vec<String> = Vec::new();

    validate_debt_fields(
        input.annual_income,
        input.loan_amount,
        input.loan_term_months,
        input.loan_rate,
        input.other_debt_amount,
        input.other_debt_rate,
    )?;

    let service = debt_service(
        input.loan_amount,
        input.loan_rate,
        input.loan_term_months,
        input.repayment_method,
        input.other_debt_amount,
        input.other_debt_rate,
    )?;
    let annual_total_repay = service.loan_annual + service.other_annual;

    let output = DtiOutput {
        dti_rate: income_share(annual_total_repay, input.annual_income, "DTI")?,
        annual_total_repay,
        loan_annual_repay: service.loan_annual,
        other_debt_annual_interest: service.other_annual,
        monthly_repay: round_to_won(service.monthly),
    };

    Ok(with_metadata(
        "DTI: annual loan repayment plus other-debt interest over income",
        &serde_json::json!({ "method": input.repayment_method }),
        warnings,
        output,
    ))
}

/// DSR screen. Same arithmetic as DTI, with the stress rate added to the
/// new loan's rate and other debt counted at its full repayment.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_dsr(input: &DsrInput) -> CalcResult<ComputationOutput<DsrOutput>> {
    let warnings: Vec<String> = Vec::new();

    validate_debt_fields(
        input.annual_income,
        input.loan_amount,
        input.loan_term_months,
        input.loan_rate,
        input.other_debt_amount,
        input.other_debt_rate,
    )?;
    require_annual_rate(
        "stress_rate",
        input.stress_rate,
        "스트레스금리는 0% 이상 100% 이하여야 합니다.",
    )?;

    let service = debt_service(
        input.loan_amount,
        input.loan_rate + input.stress_rate,
        input.loan_term_months,
        input.repayment_method,
        input.other_debt_amount,
        input.other_debt_rate,
    )?;
    let annual_total_repay = service.loan_annual + service.other_annual;

    let output = DsrOutput {
        dsr_rate: income_share(annual_total_repay, input.annual_income, "DSR")?,
        annual_total_repay,
        loan_annual_repay: service.loan_annual,
        other_debt_annual_repay: service.other_annual,
        monthly_repay: round_to_won(service.monthly),
    };

    Ok(with_metadata(
        "DSR: stressed annual loan repayment plus other-debt repayment over income",
        &serde_json::json!({
            "method": input.repayment_method,
            "stressed_rate": (input.loan_rate + input.stress_rate).to_string(),
        }),
        warnings,
        output,
    ))
}

/// Rent-to-interest ratio for a rental-business loan.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_rti(input: &RtiInput) -> CalcResult<ComputationOutput<RtiOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive(
        "annual_rental_income",
        input.annual_rental_income,
        "연간임대소득은 0보다 커야 합니다.",
    )?;
    require_positive("loan_amount", input.loan_amount, "대출금액은 0보다 커야 합니다.")?;
    require_positive("interest_rate", input.interest_rate, "대출이자율은 0보다 커야 합니다.")?;
    require_annual_rate(
        "interest_rate",
        input.interest_rate,
        "대출이자율은 100% 이하여야 합니다.",
    )?;

    let rate = percent_to_rate(input.interest_rate);
    let interest_cost = input.loan_amount * rate;
    let rti_ratio = round_to(
        input
            .annual_rental_income
            .checked_div(interest_cost)
            .ok_or_else(|| CalcError::overflow("RTI ratio"))?,
        2,
    );
    let required = required_rti(input.property_type);
    let is_qualified = rti_ratio >= required;
    if !is_qualified {
        warnings.push(format!("RTI {rti_ratio} < 기준 {required}"));
    }

    let output = RtiOutput {
        rti_ratio,
        annual_rental_income: input.annual_rental_income,
        annual_interest_cost: round_to_won(interest_cost),
        is_qualified,
        required_rti: required,
        max_loan_amount: (input.annual_rental_income / required)
            .checked_div(rate)
            .ok_or_else(|| CalcError::overflow("RTI loan ceiling"))?
            .floor(),
    };

    Ok(with_metadata(
        "RTI: annual rent over annual loan interest",
        &serde_json::json!({ "required_rti": required.to_string() }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `total / income` as a percentage to two places.
fn income_share(total: Money, income: Money, context: &str) -> CalcResult<Percent> {
    let percent = total
        .checked_div(income)
        .and_then(|ratio| ratio.checked_mul(dec!(100)))
        .ok_or_else(|| CalcError::overflow(context))?;
    Ok(round_to(percent, 2))
}

fn debt_service(
    loan_amount: Money,
    annual_rate: Percent,
    months: u32,
    method: RepaymentMethod,
    other_amount: Money,
    other_rate: Percent,
) -> CalcResult<DebtService> {
    let monthly = first_monthly_payment(
        loan_amount,
        monthly_rate_from_annual(annual_rate),
        months,
        method,
    )?;
    Ok(DebtService {
        monthly,
        loan_annual: round_to_won(monthly * dec!(12)),
        other_annual: round_to_won(other_amount * percent_to_rate(other_rate)),
    })
}

fn validate_debt_fields(
    annual_income: Money,
    loan_amount: Money,
    loan_term_months: u32,
    loan_rate: Percent,
    other_debt_amount: Money,
    other_debt_rate: Percent,
) -> CalcResult<()> {
    require_positive("annual_income", annual_income, "연소득은 0보다 커야 합니다.")?;
    require_amount("loan_amount", loan_amount, "대출금액은 0 이상이어야 합니다.")?;
    require_count(
        "loan_term_months",
        loan_term_months,
        1,
        MAX_LOAN_TERM_MONTHS,
        "대출기간은 1개월 이상 600개월 이하여야 합니다.",
    )?;
    require_annual_rate("loan_rate", loan_rate, "대출이율은 0% 이상 100% 이하여야 합니다.")?;
    require_amount(
        "other_debt_amount",
        other_debt_amount,
        "기타부채금액은 0 이상이어야 합니다.",
    )?;
    require_annual_rate(
        "other_debt_rate",
        other_debt_rate,
        "기타부채이율은 0% 이상 100% 이하여야 합니다.",
    )?;
    Ok(())
}

fn require_amount(field: &str, value: Money, reason: &str) -> CalcResult<()> {
    require_range(field, value, Decimal::ZERO, MAX_AMOUNT, reason)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
