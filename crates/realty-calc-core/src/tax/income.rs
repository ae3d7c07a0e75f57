use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::{rate_to_percent, ratio_percent, round_to_won};
use crate::tables::personal_income::{
    BASIC_DEDUCTION_PER_PERSON, LOCAL_INCOME_TAX_RATE, PERSONAL_INCOME,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::require_non_negative;
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Comprehensive income tax
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxInput {
    pub rental_income: Money,
    pub other_income: Money,
    pub expenses: Money,
    pub dependents: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeTaxOutput {
    pub total_income: Money,
    pub taxable_income: Money,
    pub calculated_tax: Money,
    pub local_income_tax: Money,
    pub total_tax: Money,
    pub effective_rate: Percent,
}

/// Income tax on rental plus other income after the per-person deduction.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_income_tax(
    input: &IncomeTaxInput,
) -> CalcResult<ComputationOutput<IncomeTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_non_negative("rental_income", input.rental_income, "임대소득은 0 이상이어야 합니다.")?;
    require_non_negative("other_income", input.other_income, "기타소득은 0 이상이어야 합니다.")?;
    require_non_negative("expenses", input.expenses, "필요경비는 0 이상이어야 합니다.")?;

    let total_income = input.rental_income + input.other_income - input.expenses;
    let basic_deduction = BASIC_DEDUCTION_PER_PERSON * Decimal::from(1 + input.dependents);
    let taxable_income = (total_income - basic_deduction).max(Decimal::ZERO);

    let calculated_tax = round_to_won(PERSONAL_INCOME.tax(taxable_income));
    let local_income_tax = round_to_won(calculated_tax * LOCAL_INCOME_TAX_RATE);
    let total_tax = calculated_tax + local_income_tax;

    let output = IncomeTaxOutput {
        total_income,
        taxable_income,
        calculated_tax,
        local_income_tax,
        total_tax,
        effective_rate: ratio_percent(total_tax, total_income, 2)?,
    };

    Ok(with_metadata(
        "Comprehensive income tax with local income tax",
        &serde_json::json!({
            "basic_deduction": basic_deduction.to_string(),
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Progressive breakdown
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveTaxInput {
    pub taxable_income: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BracketLine {
    pub bracket: String,
    pub taxable_amount: Money,
    pub rate: Percent,
    pub tax_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressiveTaxOutput {
    pub brackets: Vec<BracketLine>,
    pub total_tax: Money,
    pub effective_rate: Percent,
}

/// Slice-by-slice view of the personal income tax on a given base.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_progressive_tax(
    input: &ProgressiveTaxInput,
) -> CalcResult<ComputationOutput<ProgressiveTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_non_negative(
        "taxable_income",
        input.taxable_income,
        "과세표준은 0 이상이어야 합니다.",
    )?;

    let brackets: Vec<BracketLine> = PERSONAL_INCOME
        .marginal_breakdown(input.taxable_income)
        .into_iter()
        .map(|slice| BracketLine {
            bracket: slice.label.to_string(),
            taxable_amount: slice.taxable_amount,
            rate: rate_to_percent(slice.rate),
            tax_amount: slice.tax_amount,
        })
        .collect();
    let total_tax: Money = brackets.iter().map(|b| b.tax_amount).sum();

    let output = ProgressiveTaxOutput {
        effective_rate: ratio_percent(total_tax, input.taxable_income, 2)?,
        brackets,
        total_tax,
    };

    Ok(with_metadata(
        "Marginal breakdown over personal income brackets",
        &serde_json::json!({ "brackets": PERSONAL_INCOME.brackets.len() }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_income_tax_with_dependents() {
        let out = calculate_income_tax(&IncomeTaxInput {
            rental_income: dec!(30_000_000),
            other_income: dec!(20_000_000),
            expenses: dec!(5_000_000),
            dependents: 2,
        })
        .unwrap();
        let r = &out.result;
        assert_eq!(r.total_income, dec!(45_000_000));
        assert_eq!(r.taxable_income, dec!(40_500_000));
        // 40.5M x 15% - 1.26M
        assert_eq!(r.calculated_tax, dec!(4_815_000));
        assert_eq!(r.local_income_tax, dec!(481_500));
        assert_eq!(r.total_tax, dec!(5_296_500));
        assert_eq!(r.effective_rate, dec!(11.77));
    }

    #[test]
    fn test_income_below_deduction() {
        let r = calculate_income_tax(&IncomeTaxInput {
            rental_income: dec!(1_000_000),
            other_income: Decimal::ZERO,
            expenses: Decimal::ZERO,
            dependents: 0,
        })
        .unwrap()
        .result;
        assert_eq!(r.taxable_income, Decimal::ZERO);
        assert_eq!(r.total_tax, Decimal::ZERO);
    }

    #[test]
    fn test_progressive_breakdown() {
        let r = calculate_progressive_tax(&ProgressiveTaxInput {
            taxable_income: dec!(60_000_000),
        })
        .unwrap()
        .result;
        assert_eq!(r.brackets.len(), 3);
        assert_eq!(r.brackets[0].bracket, "1,400만원 이하");
        assert_eq!(r.brackets[0].tax_amount, dec!(840_000));
        assert_eq!(r.brackets[1].taxable_amount, dec!(36_000_000));
        assert_eq!(r.brackets[1].rate, dec!(15));
        assert_eq!(r.brackets[2].taxable_amount, dec!(10_000_000));
        // Matches the subtraction form: 60M x 24% - 5.76M
        assert_eq!(r.total_tax, dec!(8_640_000));
        assert_eq!(r.effective_rate, dec!(14.4));
    }

    #[test]
    fn test_progressive_zero_income() {
        let r = calculate_progressive_tax(&ProgressiveTaxInput {
            taxable_income: Decimal::ZERO,
        })
        .unwrap()
        .result;
        assert!(r.brackets.is_empty());
        assert_eq!(r.effective_rate, Decimal::ZERO);
    }
}
