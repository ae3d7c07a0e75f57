//! Income figures used when screening borrowers: projected future income
//! for young applicants and income backed out of social-insurance premiums.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{percent_to_rate, rate_to_percent, round_to_won};
use crate::tables::lending::{
    contribution_rate, income_growth_percent, AverageIncome, IncomeProof, ProjectionTerm,
    AVERAGE_INCOME_BY_AGE,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::require_positive;
use crate::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureIncomeInput {
    pub current_income: Money,
    pub age: u32,
    pub loan_term_years: ProjectionTerm,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureIncomeOutput {
    pub current_income: Money,
    pub growth_rate: Percent,
    pub future_income: Money,
    pub income_increase: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedIncomeInput {
    pub income_type: IncomeProof,
    pub monthly_payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedIncomeOutput {
    pub monthly_estimated_income: Money,
    pub annual_estimated_income: Money,
    pub applied_rate: Percent,
    pub income_type: String,
}

/// Projected income at the end of the loan term. Applicants aged 35 or
/// older get no uplift.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_future_income(
    input: &FutureIncomeInput,
) -> CalcResult<ComputationOutput<FutureIncomeOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive("current_income", input.current_income, "현재 연소득은 0보다 커야 합니다.")?;
    if input.age < 20 {
        return Err(CalcError::invalid("age", "만 나이는 20세 이상이어야 합니다."));
    }
    if input.age > 70 {
        return Err(CalcError::invalid("age", "만 나이는 70세 이하여야 합니다."));
    }

    let growth_rate = income_growth_percent(input.age, input.loan_term_years);
    if growth_rate.is_zero() {
        warnings.push("만 35세 이상은 장래소득 증가율이 적용되지 않습니다.".to_string());
    }

    let future_income =
        round_to_won(input.current_income * (Decimal::ONE + percent_to_rate(growth_rate)));

    let output = FutureIncomeOutput {
        current_income: input.current_income,
        growth_rate,
        future_income,
        income_increase: round_to_won(future_income - input.current_income),
    };

    Ok(with_metadata(
        "Projected future income by age band and loan term",
        &serde_json::json!({ "loan_term_years": input.loan_term_years }),
        warnings,
        output,
    ))
}

/// Average wage by age band (만원), for display next to the projection.
pub fn average_income_by_age() -> &'static [AverageIncome] {
    &AVERAGE_INCOME_BY_AGE
}

/// Income implied by a national-pension or health-insurance premium.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_estimated_income(
    input: &EstimatedIncomeInput,
) -> CalcResult<ComputationOutput<EstimatedIncomeOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive("monthly_payment", input.monthly_payment, "월납입액은 0보다 커야 합니다.")?;

    let rate = contribution_rate(input.income_type);
    let monthly = round_to_won(input.monthly_payment / rate);

    let output = EstimatedIncomeOutput {
        monthly_estimated_income: monthly,
        annual_estimated_income: monthly * dec!(12),
        applied_rate: rate_to_percent(rate),
        income_type: input.income_type.label().to_string(),
    };

    Ok(with_metadata(
        "Income estimated from insurance premium / contribution rate",
        &serde_json::json!({ "contribution_rate": rate.to_string() }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_future_income_young_borrower() {
        let r = calculate_future_income(&FutureIncomeInput {
            current_income: dec!(40_000_000),
            age: 27,
            loan_term_years: ProjectionTerm::Thirty,
        })
        .unwrap()
        .result;
        assert_eq!(r.growth_rate, dec!(31.6));
        assert_eq!(r.future_income, dec!(52_640_000));
        assert_eq!(r.income_increase, dec!(12_640_000));
    }

    #[test]
    fn test_future_income_no_uplift_from_35() {
        let out = calculate_future_income(&FutureIncomeInput {
            current_income: dec!(50_000_000),
            age: 35,
            loan_term_years: ProjectionTerm::Ten,
        })
        .unwrap();
        assert_eq!(out.result.growth_rate, Decimal::ZERO);
        assert_eq!(out.result.future_income, dec!(50_000_000));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_future_income_age_bounds() {
        let err = calculate_future_income(&FutureIncomeInput {
            current_income: dec!(50_000_000),
            age: 19,
            loan_term_years: ProjectionTerm::Ten,
        })
        .unwrap_err();
        assert_eq!(err.reason(), "만 나이는 20세 이상이어야 합니다.");
    }

    #[test]
    fn test_term_must_be_listed() {
        let parsed: Result<FutureIncomeInput, _> = serde_json::from_str(
            r#"{"current_income":"40000000","age":27,"loan_term_years":25}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_estimated_income_from_pension() {
        let r = calculate_estimated_income(&EstimatedIncomeInput {
            income_type: IncomeProof::NationalPension,
            monthly_payment: dec!(180_000),
        })
        .unwrap()
        .result;
        assert_eq!(r.monthly_estimated_income, dec!(4_000_000));
        assert_eq!(r.annual_estimated_income, dec!(48_000_000));
        assert_eq!(r.applied_rate, dec!(4.5));
        assert_eq!(r.income_type, "국민연금");
    }

    #[test]
    fn test_average_income_table() {
        assert_eq!(average_income_by_age().len(), 4);
        assert_eq!(average_income_by_age()[0].age_band, "20-24");
    }
}
