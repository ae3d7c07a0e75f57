use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{monthly_rate_from_annual, round_to_won};
use crate::tables::lending::MAX_LOAN_TERM_YEARS;
use crate::time_value::annuity_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation::{
    require_annual_rate, require_at_most, require_count, require_positive, MAX_AMOUNT,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How principal is returned over the term.
///
/// The canonical names are kebab-case; the Korean names used by the
/// income-ratio screens are accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RepaymentMethod {
    /// Level payment (원리금균등).
    #[serde(alias = "원리금균등")]
    EqualPrincipalInterest,
    /// Level principal, interest on the declining balance (원금균등).
    #[serde(alias = "원금균등")]
    EqualPrincipal,
    /// Interest only, principal at maturity (만기일시).
    #[serde(alias = "만기일시")]
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRepaymentInput {
    pub loan_amount: Money,
    pub annual_rate: Percent,
    pub loan_term_years: u32,
    pub repayment_method: RepaymentMethod,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub principal: Money,
    pub interest: Money,
    pub payment: Money,
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRepaymentOutput {
    /// Payment due in the first month.
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly amortization schedule for a mortgage.
///
/// Every row is rounded to won. Principal never exceeds the outstanding
/// balance and the final month retires whatever is left, so the principal
/// column always sums to the loan amount.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_loan_repayment(
    input: &LoanRepaymentInput,
) -> CalcResult<ComputationOutput<LoanRepaymentOutput>> {
    let warnings: Vec<String> = Vec::new();

    validate_loan_input(input)?;

    let months = input.loan_term_years * 12;
    let rate = monthly_rate_from_annual(input.annual_rate);

    let schedule = match input.repayment_method {
        RepaymentMethod::EqualPrincipalInterest => {
            let payment = round_to_won(annuity_payment(input.loan_amount, rate, months)?);
            amortize(input.loan_amount, rate, months, |interest| payment - interest)
        }
        RepaymentMethod::EqualPrincipal => {
            let level = round_to_won(input.loan_amount / Decimal::from(months));
            amortize(input.loan_amount, rate, months, |_| level)
        }
        RepaymentMethod::Bullet => bullet(input.loan_amount, rate, months),
    };

    let total_payment: Money = schedule.iter().map(|row| row.payment).sum();
    let monthly_payment = schedule.first().map_or(Decimal::ZERO, |row| row.payment);

    let output = LoanRepaymentOutput {
        monthly_payment,
        total_payment,
        total_interest: total_payment - input.loan_amount,
        schedule,
    };

    Ok(with_metadata(
        "Monthly amortization schedule",
        &serde_json::json!({
            "method": input.repayment_method,
            "months": months,
            "monthly_rate": rate.to_string(),
        }),
        warnings,
        output,
    ))
}

/// Unrounded first-month payment for `method`. The income-ratio screens
/// annualise this figure.
pub fn first_monthly_payment(
    principal: Money,
    monthly_rate: Rate,
    months: u32,
    method: RepaymentMethod,
) -> CalcResult<Money> {
    Ok(match method {
        RepaymentMethod::EqualPrincipalInterest => {
            annuity_payment(principal, monthly_rate, months)?
        }
        RepaymentMethod::EqualPrincipal => {
            principal / Decimal::from(months) + principal * monthly_rate
        }
        RepaymentMethod::Bullet => principal * monthly_rate,
    })
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Interest on the declining balance; `principal_for(interest)` gives the
/// scheduled principal of a non-final month before clamping.
fn amortize(
    loan_amount: Money,
    rate: Rate,
    months: u32,
    principal_for: impl Fn(Money) -> Money,
) -> Vec<AmortizationRow> {
    let mut rows = Vec::with_capacity(months as usize);
    let mut remaining = loan_amount;

    for period in 1..=months {
        let interest = round_to_won(remaining * rate);
        let principal = if period == months {
            remaining
        } else {
            principal_for(interest).max(Decimal::ZERO).min(remaining)
        };
        remaining -= principal;
        rows.push(AmortizationRow {
            period,
            principal,
            interest,
            payment: principal + interest,
            remaining_balance: remaining,
        });
    }

    rows
}

fn bullet(loan_amount: Money, rate: Rate, months: u32) -> Vec<AmortizationRow> {
    let interest = round_to_won(loan_amount * rate);
    (1..=months)
        .map(|period| {
            let last = period == months;
            let principal = if last { loan_amount } else { Decimal::ZERO };
            AmortizationRow {
                period,
                principal,
                interest,
                payment: principal + interest,
                remaining_balance: if last { Decimal::ZERO } else { loan_amount },
            }
        })
        .collect()
}

fn validate_loan_input(input: &LoanRepaymentInput) -> CalcResult<()> {
    require_positive("loan_amount", input.loan_amount, "대출금은 0보다 커야 합니다.")?;
    require_at_most(
        "loan_amount",
        input.loan_amount,
        MAX_AMOUNT,
        "대출금이 계산 가능한 범위를 넘었습니다.",
    )?;
    require_annual_rate("annual_rate", input.annual_rate, "금리는 0% 이상 100% 이하여야 합니다.")?;
    require_count(
        "loan_term_years",
        input.loan_term_years,
        1,
        MAX_LOAN_TERM_YEARS,
        "대출기간은 1년 이상 50년 이하여야 합니다.",
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::MAX_ANNUAL_RATE;
    use rust_decimal_macros::dec;

    fn loan(
        amount: Money,
        rate: Percent,
        years: u32,
        method: RepaymentMethod,
    ) -> LoanRepaymentOutput {
        calculate_loan_repayment(&LoanRepaymentInput {
            loan_amount: amount,
            annual_rate: rate,
            loan_term_years: years,
            repayment_method: method,
        })
        .unwrap()
        .result
    }

    fn principal_sum(out: &LoanRepaymentOutput) -> Money {
        out.schedule.iter().map(|r| r.principal).sum()
    }

    #[test]
    fn test_equal_principal_interest_30_years() {
        let out = loan(dec!(300_000_000), dec!(4), 30, RepaymentMethod::EqualPrincipalInterest);
        assert_eq!(out.schedule.len(), 360);
        assert!(out.monthly_payment > dec!(1_400_000));
        assert!(out.monthly_payment < dec!(1_440_000));
        assert_eq!(principal_sum(&out), dec!(300_000_000));
        assert_eq!(out.schedule.last().unwrap().remaining_balance, Decimal::ZERO);
        assert_eq!(out.total_interest, out.total_payment - dec!(300_000_000));
    }

    #[test]
    fn test_equal_principal_declines() {
        let out = loan(dec!(120_000_000), dec!(3), 10, RepaymentMethod::EqualPrincipal);
        assert_eq!(out.schedule[0].principal, dec!(1_000_000));
        assert_eq!(out.schedule[0].interest, dec!(300_000));
        assert!(out.schedule[1].payment < out.schedule[0].payment);
        assert_eq!(principal_sum(&out), dec!(120_000_000));
    }

    #[test]
    fn test_bullet_pays_principal_last() {
        let out = loan(dec!(100_000_000), dec!(6), 1, RepaymentMethod::Bullet);
        assert_eq!(out.schedule.len(), 12);
        assert!(out.schedule[..11].iter().all(|r| r.principal.is_zero()));
        assert!(out.schedule.iter().all(|r| r.interest == dec!(500_000)));
        assert_eq!(out.schedule[11].payment, dec!(100_500_000));
        assert_eq!(out.total_interest, dec!(6_000_000));
    }

    #[test]
    fn test_zero_rate_is_straight_line() {
        let out = loan(dec!(1_000_000), Decimal::ZERO, 1, RepaymentMethod::EqualPrincipalInterest);
        assert!(out.schedule.iter().all(|r| r.interest.is_zero()));
        assert_eq!(out.monthly_payment, dec!(83_333));
        assert_eq!(out.schedule[11].principal, dec!(83_337));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_korean_alias_is_accepted() {
        let m: RepaymentMethod = serde_json::from_str("\"원금균등\"").unwrap();
        assert_eq!(m, RepaymentMethod::EqualPrincipal);
        assert_eq!(
            serde_json::to_string(&RepaymentMethod::Bullet).unwrap(),
            "\"bullet\""
        );
    }

    #[test]
    fn test_rejects_long_term() {
        let err = calculate_loan_repayment(&LoanRepaymentInput {
            loan_amount: dec!(1_000_000),
            annual_rate: dec!(3),
            loan_term_years: 51,
            repayment_method: RepaymentMethod::Bullet,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("loan_term_years"));
    }

    #[test]
    fn test_rate_above_ceiling_rejected() {
        let err = calculate_loan_repayment(&LoanRepaymentInput {
            loan_amount: dec!(100_000_000),
            annual_rate: dec!(300),
            loan_term_years: 50,
            repayment_method: RepaymentMethod::EqualPrincipalInterest,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("annual_rate"));
    }

    #[test]
    fn test_ceiling_amount_rate_and_term_still_amortize() {
        for method in [
            RepaymentMethod::EqualPrincipalInterest,
            RepaymentMethod::EqualPrincipal,
            RepaymentMethod::Bullet,
        ] {
            let r = loan(MAX_AMOUNT, MAX_ANNUAL_RATE, MAX_LOAN_TERM_YEARS, method);
            assert_eq!(r.schedule.len(), 600);
            let principal: Money = r.schedule.iter().map(|row| row.principal).sum();
            assert_eq!(principal, MAX_AMOUNT);
            assert_eq!(r.schedule[599].remaining_balance, Decimal::ZERO);
        }
    }

    #[test]
    fn test_amount_above_ceiling_rejected() {
        let err = calculate_loan_repayment(&LoanRepaymentInput {
            loan_amount: MAX_AMOUNT + Decimal::ONE,
            annual_rate: dec!(4),
            loan_term_years: 30,
            repayment_method: RepaymentMethod::Bullet,
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("loan_amount"));
    }
}
