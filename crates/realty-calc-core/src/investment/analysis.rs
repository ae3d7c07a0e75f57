//! Income-property analysis: NOI, cap rate, cash-on-cash and the leverage
//! identity, plus the exit value under steady appreciation.
//!
//! Taxes are inputs here. Acquisition and holding taxes come from the `tax`
//! calculators, so this module never reaches into the tax tables itself.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{percent_to_rate, rate_to_percent, round_to, round_to_won};
use crate::time_value::compound_factor;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation::{require_count, require_non_negative, require_positive, require_range};
use crate::CalcResult;

const MAX_HOLDING_YEARS: u32 = 100;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAnalysisInput {
    pub purchase_price: Money,
    pub loan_amount: Money,
    /// Annual percent, interest-only.
    pub interest_rate: Percent,
    pub rental_deposit: Money,
    pub monthly_rent: Money,
    pub holding_years: u32,
    /// Expected price growth per year, percent. May be negative.
    pub annual_appreciation_rate: Percent,
    pub vacancy_rate: Percent,
    pub acquisition_tax: Money,
    pub annual_holding_tax: Money,
    pub annual_maintenance_cost: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAnalysisOutput {
    pub total_equity: Money,
    pub annual_gross_rental_income: Money,
    pub effective_gross_income: Money,
    pub noi: Money,
    pub cap_rate: Percent,
    pub annual_debt_service: Money,
    pub annual_cash_flow_before_tax: Money,
    pub cash_on_cash_return: Percent,
    pub leveraged_return: Percent,
    pub expected_sale_price: Money,
    /// Appreciation plus cumulative cash flow, per year of equity.
    pub total_return_rate: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

#[tracing::instrument(level = "debug", skip_all)]
pub fn analyze_investment(
    input: &InvestmentAnalysisInput,
) -> CalcResult<ComputationOutput<InvestmentAnalysisOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_analysis_input(input)?;

    let interest = percent_to_rate(input.interest_rate);
    let years = Decimal::from(input.holding_years);

    // --- 1. Equity ---
    let total_equity = round_to_won(
        input.purchase_price - input.loan_amount - input.rental_deposit + input.acquisition_tax,
    );
    if total_equity <= Decimal::ZERO {
        warnings.push("자기자본이 0 이하여서 자기자본 수익률을 0으로 표시합니다.".to_string());
    }

    // --- 2. Operating income ---
    let annual_gross_rental_income = round_to_won(input.monthly_rent * dec!(12));
    let effective_gross_income = round_to_won(
        annual_gross_rental_income * (Decimal::ONE - percent_to_rate(input.vacancy_rate)),
    );
    let noi = effective_gross_income - input.annual_holding_tax - input.annual_maintenance_cost;
    let cap = share(noi, input.purchase_price)?;

    // --- 3. Financing ---
    let annual_debt_service = round_to_won(input.loan_amount * interest);
    let annual_cash_flow_before_tax = noi - annual_debt_service;
    let leveraged = leveraged_return(cap, interest, input.loan_amount, total_equity)?;
    if input.loan_amount > Decimal::ZERO && cap < interest {
        warnings.push("자본환원율이 대출금리보다 낮아 부(負)의 레버리지입니다.".to_string());
    }

    // --- 4. Exit ---
    let growth =
        compound_factor(percent_to_rate(input.annual_appreciation_rate), input.holding_years)?;
    let expected_sale_price = round_to_won(
        input
            .purchase_price
            .checked_mul(growth)
            .ok_or_else(|| CalcError::overflow("expected sale price"))?,
    );
    let total_profit = (expected_sale_price - input.purchase_price)
        .checked_add(annual_cash_flow_before_tax * years)
        .ok_or_else(|| CalcError::overflow("total profit"))?;
    let total_return = share(total_profit, total_equity)? / years;

    let output = InvestmentAnalysisOutput {
        total_equity,
        annual_gross_rental_income,
        effective_gross_income,
        noi,
        cap_rate: percent_2dp(cap)?,
        annual_debt_service,
        annual_cash_flow_before_tax,
        cash_on_cash_return: percent_2dp(share(annual_cash_flow_before_tax, total_equity)?)?,
        leveraged_return: percent_2dp(leveraged)?,
        expected_sale_price,
        total_return_rate: percent_2dp(total_return)?,
    };

    Ok(with_metadata(
        "NOI / price cap rate; leverage = cap + (cap - i) x debt / equity",
        &serde_json::json!({
            "debt_service": "interest-only",
            "holding_years": input.holding_years,
        }),
        warnings,
        output,
    ))
}

/// Return on equity from a price move at a given LTV: `change / (1 - ltv)`.
/// Zero when the loan covers the whole price.
pub fn capital_gain_leverage(price_change: Percent, ltv: Percent) -> CalcResult<Percent> {
    let equity_ratio = Decimal::ONE - percent_to_rate(ltv);
    Ok(share(price_change, equity_ratio)?.normalize())
}

/// Price implied by capitalising `noi` at `cap_rate` percent. Zero for a
/// non-positive cap rate.
pub fn property_value_from_cap_rate(noi: Money, cap_rate: Percent) -> CalcResult<Money> {
    Ok(round_to_won(share(noi, percent_to_rate(cap_rate))?))
}

/// `cap + (cap - interest) x loan / equity`, all rates as decimals.
pub fn leveraged_return(cap: Rate, interest: Rate, loan: Money, equity: Money) -> CalcResult<Rate> {
    if equity <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    (cap - interest)
        .checked_mul(share(loan, equity)?)
        .and_then(|spread| spread.checked_add(cap))
        .ok_or_else(|| CalcError::overflow("leveraged return"))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// `numerator / denominator`, zero for a non-positive denominator.
fn share(numerator: Decimal, denominator: Decimal) -> CalcResult<Rate> {
    if denominator <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    numerator
        .checked_div(denominator)
        .ok_or_else(|| CalcError::overflow("return ratio"))
}

fn percent_2dp(rate: Rate) -> CalcResult<Percent> {
    rate.checked_mul(dec!(100))
        .map(|percent| round_to(percent, 2))
        .ok_or_else(|| CalcError::overflow("return percentage"))
}

fn validate_analysis_input(input: &InvestmentAnalysisInput) -> CalcResult<()> {
    require_positive("purchase_price", input.purchase_price, "매매가는 0보다 커야 합니다.")?;
    require_non_negative("loan_amount", input.loan_amount, "대출금은 0 이상이어야 합니다.")?;
    require_range(
        "interest_rate",
        input.interest_rate,
        Decimal::ZERO,
        dec!(30),
        "대출 금리는 0% 이상 30% 이하여야 합니다.",
    )?;
    require_non_negative("rental_deposit", input.rental_deposit, "보증금은 0 이상이어야 합니다.")?;
    require_non_negative("monthly_rent", input.monthly_rent, "월세는 0 이상이어야 합니다.")?;
    require_count(
        "holding_years",
        input.holding_years,
        1,
        MAX_HOLDING_YEARS,
        "보유기간은 1년 이상 100년 이하여야 합니다.",
    )?;
    require_range(
        "annual_appreciation_rate",
        input.annual_appreciation_rate,
        dec!(-50),
        dec!(50),
        "연간 시세상승률은 -50% 이상 50% 이하여야 합니다.",
    )?;
    require_range(
        "vacancy_rate",
        input.vacancy_rate,
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
        "공실률은 0% 이상 100% 이하여야 합니다.",
    )?;
    require_non_negative(
        "acquisition_tax",
        input.acquisition_tax,
        "취득세는 0 이상이어야 합니다.",
    )?;
    require_non_negative(
        "annual_holding_tax",
        input.annual_holding_tax,
        "보유세는 0 이상이어야 합니다.",
    )?;
    require_non_negative(
        "annual_maintenance_cost",
        input.annual_maintenance_cost,
        "관리비는 0 이상이어야 합니다.",
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> InvestmentAnalysisInput {
        InvestmentAnalysisInput {
            purchase_price: dec!(500_000_000),
            loan_amount: dec!(200_000_000),
            interest_rate: dec!(4),
            rental_deposit: dec!(100_000_000),
            monthly_rent: dec!(1_500_000),
            holding_years: 5,
            annual_appreciation_rate: dec!(3),
            vacancy_rate: dec!(5),
            acquisition_tax: dec!(5_500_000),
            annual_holding_tax: dec!(1_200_000),
            annual_maintenance_cost: dec!(2_400_000),
        }
    }

    #[test]
    fn test_negative_leverage_case() {
        let out = analyze_investment(&base()).unwrap();
        let r = &out.result;
        assert_eq!(r.total_equity, dec!(205_500_000));
        assert_eq!(r.effective_gross_income, dec!(17_100_000));
        assert_eq!(r.noi, dec!(13_500_000));
        assert_eq!(r.cap_rate, dec!(2.7));
        assert_eq!(r.annual_debt_service, dec!(8_000_000));
        assert_eq!(r.annual_cash_flow_before_tax, dec!(5_500_000));
        assert_eq!(r.cash_on_cash_return, dec!(2.68));
        assert_eq!(r.leveraged_return, dec!(1.43));
        assert_eq!(r.expected_sale_price, dec!(579_637_037));
        assert_eq!(r.total_return_rate, dec!(10.43));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_unlevered_return_equals_cap_rate() {
        let input = InvestmentAnalysisInput {
            loan_amount: Decimal::ZERO,
            ..base()
        };
        let r = analyze_investment(&input).unwrap().result;
        assert_eq!(r.leveraged_return, r.cap_rate);
    }

    #[test]
    fn test_capital_gain_leverage() {
        assert_eq!(capital_gain_leverage(dec!(20), dec!(80)).unwrap(), dec!(100));
        assert_eq!(capital_gain_leverage(dec!(-10), dec!(50)).unwrap(), dec!(-20));
        assert_eq!(capital_gain_leverage(dec!(10), dec!(100)).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_property_value_from_cap_rate() {
        assert_eq!(
            property_value_from_cap_rate(dec!(30_000_000), dec!(5)).unwrap(),
            dec!(600_000_000)
        );
        assert_eq!(
            property_value_from_cap_rate(dec!(30_000_000), Decimal::ZERO).unwrap(),
            Decimal::ZERO
        );
    }

    #[test]
    fn test_vacancy_over_100_rejected() {
        let input = InvestmentAnalysisInput {
            vacancy_rate: dec!(101),
            ..base()
        };
        assert!(analyze_investment(&input).is_err());
    }

    #[test]
    fn test_near_total_ltv_is_an_error_not_a_panic() {
        let err =
            capital_gain_leverage(Decimal::MAX, dec!(99.99999999999999999999999)).unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
        assert!(
            property_value_from_cap_rate(Decimal::MAX, dec!(0.0000000000000000000001)).is_err()
        );
    }

    #[test]
    fn test_steepest_growth_over_longest_hold() {
        let input = InvestmentAnalysisInput {
            purchase_price: dec!(1_000_000_000_000),
            holding_years: MAX_HOLDING_YEARS,
            annual_appreciation_rate: dec!(50),
            ..base()
        };
        // 1.5^100 is about 4e17, on 1조 won that leaves the Decimal range
        let err = analyze_investment(&input).unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));

        let r = analyze_investment(&InvestmentAnalysisInput {
            holding_years: MAX_HOLDING_YEARS,
            annual_appreciation_rate: dec!(-10),
            ..base()
        })
        .unwrap()
        .result;
        // 500M x 0.9^100
        assert!(r.expected_sale_price > Decimal::ZERO);
        assert!(r.expected_sale_price < dec!(20_000));
    }

    #[test]
    fn test_one_won_equity_stays_in_range() {
        let input = InvestmentAnalysisInput {
            purchase_price: dec!(300_000_001),
            loan_amount: dec!(200_000_000),
            rental_deposit: dec!(100_000_000),
            acquisition_tax: Decimal::ZERO,
            ..base()
        };
        let r = analyze_investment(&input).unwrap().result;
        assert_eq!(r.total_equity, Decimal::ONE);
        assert!(r.cash_on_cash_return > dec!(1_000_000));
    }
}
