use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::{checked_ratio, percent_to_rate, ratio_percent, round_to, round_to_won};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{require_count, require_non_negative, require_positive, require_range};
use crate::CalcResult;

const MAX_HOLDING_YEARS: u32 = 100;
const MAX_LOAN_RATE: Decimal = dec!(30);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReturnInput {
    pub purchase_price: Money,
    /// Market value today, or the expected exit price.
    pub current_price: Money,
    /// Equity put in.
    pub total_investment: Money,
    pub annual_rental_income: Money,
    /// Management, repairs and holding taxes.
    pub annual_expenses: Money,
    pub holding_years: u32,
    pub loan_amount: Money,
    pub loan_interest_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentReturnOutput {
    /// Price appreciation over the holding period.
    pub total_gain: Money,
    pub net_rental_income: Money,
    pub total_rental_income: Money,
    pub annual_loan_interest: Money,
    pub total_loan_interest: Money,
    pub total_profit: Money,
    pub roi: Percent,
    /// Simple average of `roi` per year.
    pub annualized_return: Percent,
    pub cap_rate: Percent,
    /// Purchase price over equity.
    pub leverage_effect: Decimal,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_investment_return(
    input: &InvestmentReturnInput,
) -> CalcResult<ComputationOutput<InvestmentReturnOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_investment_return_input(input)?;

    let years = Decimal::from(input.holding_years);

    // --- 1. Appreciation and rent ---
    let total_gain = round_to_won(input.current_price - input.purchase_price);
    let net_rental_income = round_to_won(input.annual_rental_income - input.annual_expenses);
    let total_rental_income = round_to_won(net_rental_income * years);

    // --- 2. Financing ---
    let annual_loan_interest =
        round_to_won(input.loan_amount * percent_to_rate(input.loan_interest_rate));
    let total_loan_interest = round_to_won(annual_loan_interest * years);

    // --- 3. Returns ---
    let total_profit = total_gain + total_rental_income - total_loan_interest;
    if total_profit < Decimal::ZERO {
        warnings.push("보유기간 전체 순수익이 손실입니다.".to_string());
    }
    let roi = ratio_percent(total_profit, input.total_investment, 2)?;

    let output = InvestmentReturnOutput {
        total_gain,
        net_rental_income,
        total_rental_income,
        annual_loan_interest,
        total_loan_interest,
        total_profit,
        roi,
        annualized_return: round_to(roi / years, 2),
        cap_rate: ratio_percent(net_rental_income, input.purchase_price, 2)?,
        leverage_effect: round_to(
            checked_ratio(input.purchase_price, input.total_investment, "leverage effect")?,
            2,
        ),
    };

    Ok(with_metadata(
        "Appreciation plus net rent less interest, over equity",
        &serde_json::json!({ "holding_years": input.holding_years }),
        warnings,
        output,
    ))
}

fn validate_investment_return_input(input: &InvestmentReturnInput) -> CalcResult<()> {
    require_positive("purchase_price", input.purchase_price, "매입가는 0보다 커야 합니다.")?;
    require_non_negative("current_price", input.current_price, "현재 시세는 0 이상이어야 합니다.")?;
    require_positive("total_investment", input.total_investment, "총 투자금은 0보다 커야 합니다.")?;
    require_non_negative(
        "annual_rental_income",
        input.annual_rental_income,
        "연 임대수익은 0 이상이어야 합니다.",
    )?;
    require_non_negative(
        "annual_expenses",
        input.annual_expenses,
        "연 비용은 0 이상이어야 합니다.",
    )?;
    require_count(
        "holding_years",
        input.holding_years,
        1,
        MAX_HOLDING_YEARS,
        "보유기간은 1년 이상 100년 이하여야 합니다.",
    )?;
    require_non_negative("loan_amount", input.loan_amount, "대출금은 0 이상이어야 합니다.")?;
    require_range(
        "loan_interest_rate",
        input.loan_interest_rate,
        Decimal::ZERO,
        MAX_LOAN_RATE,
        "대출 금리는 0% 이상 30% 이하여야 합니다.",
    )?;
    Ok(())
}
