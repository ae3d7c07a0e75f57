use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::{ratio_percent, round_to_won};
use crate::tables::long_term_deduction;
use crate::tables::personal_income::{
    HIGH_VALUE_THRESHOLD, LOCAL_INCOME_TAX_RATE, PERSONAL_INCOME, SHORT_TERM_RATE,
    TRANSFER_BASIC_DEDUCTION,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::validation::{require_count, require_non_negative};
use crate::CalcResult;

const EXEMPT_REASON: &str = "1세대 1주택 비과세 (양도가 12억 이하, 2년 보유+거주)";
const LOSS_REASON: &str = "양도차익 없음 (손실)";
const EXEMPTION_MIN_YEARS: Decimal = dec!(2);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTaxInput {
    pub acquisition_price: Money,
    pub transfer_price: Money,
    /// Deductible costs of acquisition and sale.
    pub expenses: Money,
    pub holding_years: Decimal,
    pub residence_years: Decimal,
    pub housing_count: u32,
    pub is_single_household: bool,
    pub is_regulated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferTaxOutput {
    /// Taxable gain after the high-value pro-rating. Negative for a loss.
    pub capital_gain: Money,
    pub long_term_deduction: Money,
    /// Whole percent.
    pub long_term_deduction_rate: Percent,
    pub taxable_income: Money,
    pub tax_base: Money,
    /// Whole percent.
    pub tax_rate: Percent,
    pub progressive_deduction: Money,
    pub calculated_tax: Money,
    pub local_income_tax: Money,
    pub total_tax: Money,
    pub effective_rate: Percent,
    pub is_tax_exempt: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_exempt_reason: Option<String>,
}

impl TransferTaxOutput {
    fn zero(capital_gain: Money, is_tax_exempt: bool, reason: &str) -> Self {
        Self {
            capital_gain,
            long_term_deduction: Decimal::ZERO,
            long_term_deduction_rate: Decimal::ZERO,
            taxable_income: Decimal::ZERO,
            tax_base: Decimal::ZERO,
            tax_rate: Decimal::ZERO,
            progressive_deduction: Decimal::ZERO,
            calculated_tax: Decimal::ZERO,
            local_income_tax: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            effective_rate: Decimal::ZERO,
            is_tax_exempt,
            tax_exempt_reason: Some(reason.to_string()),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Capital gains tax on the sale of a home.
///
/// Short-circuits to zero for the single-home exemption and for a sale at a
/// loss. A single-home owner selling above 12억 is taxed only on the share
/// of the gain above the threshold.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_transfer_tax(
    input: &TransferTaxInput,
) -> CalcResult<ComputationOutput<TransferTaxOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    validate_transfer_input(input)?;

    let assumptions = serde_json::json!({
        "basic_deduction": TRANSFER_BASIC_DEDUCTION.to_string(),
        "high_value_threshold": HIGH_VALUE_THRESHOLD.to_string(),
        "short_term_rate": SHORT_TERM_RATE.to_string(),
    });
    let methodology = "Capital gains tax on housing transfer";

    let is_single_home_owner = input.is_single_household && input.housing_count == 1;

    // --- 1. Exemption ---
    if is_single_home_owner
        && input.holding_years >= EXEMPTION_MIN_YEARS
        && input.residence_years >= EXEMPTION_MIN_YEARS
        && input.transfer_price <= HIGH_VALUE_THRESHOLD
    {
        let output = TransferTaxOutput::zero(Decimal::ZERO, true, EXEMPT_REASON);
        return Ok(with_metadata(methodology, &assumptions, warnings, output));
    }

    // --- 2. Gain ---
    let raw_gain = input.transfer_price - input.acquisition_price - input.expenses;
    if raw_gain <= Decimal::ZERO {
        let output = TransferTaxOutput::zero(raw_gain, false, LOSS_REASON);
        return Ok(with_metadata(methodology, &assumptions, warnings, output));
    }

    let high_value_ratio = if is_single_home_owner {
        high_value_ratio(input.transfer_price)
    } else {
        Decimal::ONE
    };
    let capital_gain = round_to_won(raw_gain * high_value_ratio);

    // --- 3. Long-term holding deduction ---
    let short_term = input.holding_years < Decimal::ONE;
    let deduction_rate = if short_term {
        Decimal::ZERO
    } else if is_single_home_owner {
        long_term_deduction::single_home_rate(input.holding_years, input.residence_years)
    } else {
        long_term_deduction::general_rate(input.holding_years)
    };
    let long_term_deduction = round_to_won(capital_gain * deduction_rate);

    let taxable_income = capital_gain - long_term_deduction;
    let tax_base = (taxable_income - TRANSFER_BASIC_DEDUCTION).max(Decimal::ZERO);

    // --- 4. Rate ---
    let (tax_rate, progressive_deduction): (Rate, Money) = if short_term {
        warnings.push("보유기간 1년 미만: 단기 양도세율 45% 적용".to_string());
        (SHORT_TERM_RATE, Decimal::ZERO)
    } else {
        let bracket = PERSONAL_INCOME.lookup(tax_base);
        (bracket.rate, bracket.subtracted_amount)
    };

    let calculated_tax =
        round_to_won((tax_base * tax_rate - progressive_deduction).max(Decimal::ZERO));
    let local_income_tax = round_to_won(calculated_tax * LOCAL_INCOME_TAX_RATE);
    let total_tax = calculated_tax + local_income_tax;

    let output = TransferTaxOutput {
        capital_gain,
        long_term_deduction,
        long_term_deduction_rate: (deduction_rate * dec!(100)).round(),
        taxable_income,
        tax_base,
        tax_rate: (tax_rate * dec!(100)).round(),
        progressive_deduction,
        calculated_tax,
        local_income_tax,
        total_tax,
        effective_rate: ratio_percent(total_tax, raw_gain, 2)?,
        is_tax_exempt: false,
        tax_exempt_reason: None,
    };

    Ok(with_metadata(methodology, &assumptions, warnings, output))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Share of the gain that is taxable for a single home sold above 12억.
fn high_value_ratio(transfer_price: Money) -> Rate {
    if transfer_price <= HIGH_VALUE_THRESHOLD {
        return Decimal::ONE;
    }
    (transfer_price - HIGH_VALUE_THRESHOLD) / transfer_price
}

fn validate_transfer_input(input: &TransferTaxInput) -> CalcResult<()> {
    require_non_negative(
        "acquisition_price",
        input.acquisition_price,
        "취득가액은 0 이상이어야 합니다.",
    )?;
    require_non_negative(
        "transfer_price",
        input.transfer_price,
        "양도가액은 0 이상이어야 합니다.",
    )?;
    require_non_negative("expenses", input.expenses, "필요경비는 0 이상이어야 합니다.")?;
    require_non_negative("holding_years", input.holding_years, "보유기간은 0 이상이어야 합니다.")?;
    require_non_negative(
        "residence_years",
        input.residence_years,
        "거주기간은 0 이상이어야 합니다.",
    )?;
    require_count(
        "housing_count",
        input.housing_count,
        1,
        u32::MAX,
        "주택 수는 1 이상이어야 합니다.",
    )?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base_input() -> TransferTaxInput {
        TransferTaxInput {
            acquisition_price: dec!(500_000_000),
            transfer_price: dec!(600_000_000),
            expenses: Decimal::ZERO,
            holding_years: dec!(3),
            residence_years: Decimal::ZERO,
            housing_count: 2,
            is_single_household: false,
            is_regulated: false,
        }
    }

    #[test]
    fn test_single_home_exemption() {
        let input = TransferTaxInput {
            acquisition_price: dec!(500_000_000),
            transfer_price: dec!(800_000_000),
            expenses: dec!(5_000_000),
            holding_years: dec!(3),
            residence_years: dec!(3),
            housing_count: 1,
            is_single_household: true,
            is_regulated: false,
        };
        let out = calculate_transfer_tax(&input).unwrap();
        assert!(out.result.is_tax_exempt);
        assert_eq!(out.result.total_tax, Decimal::ZERO);
        assert_eq!(out.result.tax_exempt_reason.as_deref(), Some(EXEMPT_REASON));
    }

    #[test]
    fn test_loss_short_circuits() {
        let input = TransferTaxInput {
            acquisition_price: dec!(800_000_000),
            transfer_price: dec!(700_000_000),
            expenses: dec!(5_000_000),
            holding_years: dec!(5),
            ..base_input()
        };
        let out = calculate_transfer_tax(&input).unwrap();
        assert_eq!(out.result.capital_gain, dec!(-105_000_000));
        assert_eq!(out.result.total_tax, Decimal::ZERO);
        assert!(!out.result.is_tax_exempt);
        assert_eq!(out.result.tax_exempt_reason.as_deref(), Some(LOSS_REASON));
    }

    #[test]
    fn test_short_term_flat_rate() {
        let input = TransferTaxInput {
            holding_years: Decimal::ZERO,
            ..base_input()
        };
        let out = calculate_transfer_tax(&input).unwrap();
        let r = &out.result;
        assert_eq!(r.tax_rate, dec!(45));
        assert_eq!(r.progressive_deduction, Decimal::ZERO);
        assert_eq!(r.long_term_deduction, Decimal::ZERO);
        // (100M - 2.5M) x 45% = 43,875,000
        assert_eq!(r.calculated_tax, dec!(43_875_000));
        assert_eq!(r.local_income_tax, dec!(4_387_500));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_general_three_year_holding() {
        let out = calculate_transfer_tax(&base_input()).unwrap();
        let r = &out.result;
        assert_eq!(r.capital_gain, dec!(100_000_000));
        assert_eq!(r.long_term_deduction_rate, dec!(6));
        assert_eq!(r.long_term_deduction, dec!(6_000_000));
        assert_eq!(r.taxable_income, dec!(94_000_000));
        assert_eq!(r.tax_base, dec!(91_500_000));
        assert!(r.tax_base < r.taxable_income);
        // 91.5M falls in the 35% bracket: 32,025,000 - 15,440,000
        assert_eq!(r.tax_rate, dec!(35));
        assert_eq!(r.calculated_tax, dec!(16_585_000));
        assert_eq!(r.total_tax, dec!(18_243_500));
        assert_eq!(r.effective_rate, dec!(18.24));
    }

    #[test]
    fn test_high_value_single_home_is_prorated() {
        let input = TransferTaxInput {
            acquisition_price: dec!(1_000_000_000),
            transfer_price: dec!(1_500_000_000),
            expenses: Decimal::ZERO,
            holding_years: dec!(5),
            residence_years: dec!(5),
            housing_count: 1,
            is_single_household: true,
            is_regulated: false,
        };
        let out = calculate_transfer_tax(&input).unwrap();
        let r = &out.result;
        assert!(!r.is_tax_exempt);
        // 500M x (300M / 1.5B)
        assert_eq!(r.capital_gain, dec!(100_000_000));
        assert_eq!(r.long_term_deduction_rate, dec!(40));
        assert!(r.total_tax > Decimal::ZERO);
    }

    #[test]
    fn test_rejects_zero_housing_count() {
        let input = TransferTaxInput {
            housing_count: 0,
            ..base_input()
        };
        assert!(calculate_transfer_tax(&input).is_err());
    }
}
