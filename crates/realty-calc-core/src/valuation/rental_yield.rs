use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::{percent_to_rate, ratio_percent, round_to_won};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{require_non_negative, require_range};
use crate::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalYieldInput {
    pub purchase_price: Money,
    /// Taxes, brokerage and fit-out on top of the price.
    pub other_costs: Money,
    pub loan_amount: Money,
    /// Annual percent.
    pub loan_rate: Percent,
    pub deposit: Money,
    pub monthly_rent: Money,
    pub annual_expenses: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RentalYieldOutput {
    pub total_investment: Money,
    /// Cash left in after the loan and the tenant's deposit.
    pub equity: Money,
    pub annual_rental_income: Money,
    pub annual_loan_interest: Money,
    pub net_income: Money,
    pub gross_yield: Percent,
    pub roi: Percent,
    pub cap_rate: Percent,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_rental_yield(
    input: &RentalYieldInput,
) -> CalcResult<ComputationOutput<RentalYieldOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_rental_yield_input(input)?;

    // --- 1. Capital ---
    let total_investment = round_to_won(input.purchase_price + input.other_costs);
    let equity = round_to_won(total_investment - input.loan_amount - input.deposit);

    // --- 2. Income ---
    let annual_rental_income = round_to_won(input.monthly_rent * dec!(12));
    let annual_loan_interest = round_to_won(input.loan_amount * percent_to_rate(input.loan_rate));
    let net_income =
        round_to_won(annual_rental_income - annual_loan_interest - input.annual_expenses);

    // --- 3. Yields ---
    if equity <= Decimal::ZERO {
        warnings.push("자기자본이 0 이하여서 ROI를 0으로 표시합니다.".to_string());
    }
    let output = RentalYieldOutput {
        total_investment,
        equity,
        annual_rental_income,
        annual_loan_interest,
        net_income,
        gross_yield: ratio_percent(annual_rental_income, total_investment, 2)?,
        roi: ratio_percent(net_income, equity, 2)?,
        cap_rate: ratio_percent(
            annual_rental_income - input.annual_expenses,
            total_investment,
            2,
        )?,
    };

    Ok(with_metadata(
        "Gross yield, levered ROI on equity and unlevered cap rate",
        &serde_json::json!({}),
        warnings,
        output,
    ))
}

fn validate_rental_yield_input(input: &RentalYieldInput) -> CalcResult<()> {
    require_non_negative("purchase_price", input.purchase_price, "매매가는 0 이상이어야 합니다.")?;
    require_non_negative("other_costs", input.other_costs, "기타비용은 0 이상이어야 합니다.")?;
    require_non_negative("loan_amount", input.loan_amount, "대출금은 0 이상이어야 합니다.")?;
    require_range(
        "loan_rate",
        input.loan_rate,
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
        "대출이율은 0 이상 100% 이하여야 합니다.",
    )?;
    require_non_negative("deposit", input.deposit, "보증금은 0 이상이어야 합니다.")?;
    require_non_negative("monthly_rent", input.monthly_rent, "월세는 0 이상이어야 합니다.")?;
    require_non_negative(
        "annual_expenses",
        input.annual_expenses,
        "연간운영비용은 0 이상이어야 합니다.",
    )?;
    Ok(())
}
