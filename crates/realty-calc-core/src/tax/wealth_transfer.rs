use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::numeric::round_to_won;
use crate::tables::wealth_transfer::{
    GIFT_EXEMPTION_LINEAL, GIFT_EXEMPTION_RELATIVE, GIFT_EXEMPTION_SPOUSE,
    INHERITANCE_BASIC_DEDUCTION, INHERITANCE_LUMP_SUM_DEDUCTION, INHERITANCE_SPOUSE_DEDUCTION,
    REPORTING_DISCOUNT_RATE, WEALTH_TRANSFER,
};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation::require_non_negative;
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceTaxInput {
    pub estate_value: Money,
    pub has_spouse: bool,
    pub children_count: u32,
    pub debt_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceTaxOutput {
    /// Net of debts.
    pub estate_value: Money,
    pub total_deduction: Money,
    pub taxable_income: Money,
    pub calculated_tax: Money,
    pub reporting_discount: Money,
    pub final_tax: Money,
}

/// Donor's relationship to the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DonorRelation {
    Spouse,
    DirectAscendant,
    DirectDescendant,
    Relative,
    Other,
}

impl DonorRelation {
    /// Ten-year exemption allowance for gifts from this donor.
    pub fn exemption_limit(self) -> Money {
        match self {
            DonorRelation::Spouse => GIFT_EXEMPTION_SPOUSE,
            DonorRelation::DirectAscendant | DonorRelation::DirectDescendant => {
                GIFT_EXEMPTION_LINEAL
            }
            DonorRelation::Relative => GIFT_EXEMPTION_RELATIVE,
            DonorRelation::Other => Decimal::ZERO,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftTaxInput {
    pub gift_value: Money,
    pub donor_relation: DonorRelation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiftTaxOutput {
    pub gift_value: Money,
    pub exemption_limit: Money,
    pub taxable_income: Money,
    pub calculated_tax: Money,
    pub reporting_discount: Money,
    pub final_tax: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Inheritance tax: the larger of the lump-sum deduction and basic plus
/// spouse deduction comes off the net estate.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_inheritance_tax(
    input: &InheritanceTaxInput,
) -> CalcResult<ComputationOutput<InheritanceTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_non_negative(
        "estate_value",
        input.estate_value,
        "상속재산가액은 0 이상이어야 합니다.",
    )?;
    require_non_negative("debt_amount", input.debt_amount, "채무액은 0 이상이어야 합니다.")?;

    let net_estate = (input.estate_value - input.debt_amount).max(Decimal::ZERO);

    let spouse = if input.has_spouse {
        INHERITANCE_SPOUSE_DEDUCTION
    } else {
        Decimal::ZERO
    };
    let total_deduction = INHERITANCE_LUMP_SUM_DEDUCTION.max(INHERITANCE_BASIC_DEDUCTION + spouse);
    let taxable_income = (net_estate - total_deduction).max(Decimal::ZERO);

    let (calculated_tax, reporting_discount, final_tax) = progressive_with_discount(taxable_income);

    let output = InheritanceTaxOutput {
        estate_value: net_estate,
        total_deduction,
        taxable_income,
        calculated_tax,
        reporting_discount,
        final_tax,
    };

    Ok(with_metadata(
        "Inheritance tax with lump-sum or basic+spouse deduction",
        &serde_json::json!({
            "reporting_discount_rate": REPORTING_DISCOUNT_RATE.to_string(),
            "children_count": input.children_count,
        }),
        warnings,
        output,
    ))
}

/// Gift tax after the relationship-based exemption.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_gift_tax(input: &GiftTaxInput) -> CalcResult<ComputationOutput<GiftTaxOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_non_negative("gift_value", input.gift_value, "증여재산가액은 0 이상이어야 합니다.")?;

    let exemption_limit = input.donor_relation.exemption_limit();
    let taxable_income = (input.gift_value - exemption_limit).max(Decimal::ZERO);

    let (calculated_tax, reporting_discount, final_tax) = progressive_with_discount(taxable_income);

    let output = GiftTaxOutput {
        gift_value: input.gift_value,
        exemption_limit,
        taxable_income,
        calculated_tax,
        reporting_discount,
        final_tax,
    };

    Ok(with_metadata(
        "Gift tax after relationship exemption",
        &serde_json::json!({
            "reporting_discount_rate": REPORTING_DISCOUNT_RATE.to_string(),
        }),
        warnings,
        output,
    ))
}

/// Bracket tax, 3% filing discount and the net amount due.
fn progressive_with_discount(taxable_income: Money) -> (Money, Money, Money) {
    let calculated_tax = round_to_won(WEALTH_TRANSFER.tax(taxable_income));
    let reporting_discount = round_to_won(calculated_tax * REPORTING_DISCOUNT_RATE);
    (calculated_tax, reporting_discount, calculated_tax - reporting_discount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_inheritance_lump_sum_deduction() {
        let r = calculate_inheritance_tax(&InheritanceTaxInput {
            estate_value: dec!(1_000_000_000),
            has_spouse: false,
            children_count: 2,
            debt_amount: dec!(100_000_000),
        })
        .unwrap()
        .result;
        assert_eq!(r.estate_value, dec!(900_000_000));
        assert_eq!(r.total_deduction, dec!(500_000_000));
        assert_eq!(r.taxable_income, dec!(400_000_000));
        // 400M x 20% - 10M
        assert_eq!(r.calculated_tax, dec!(70_000_000));
        assert_eq!(r.reporting_discount, dec!(2_100_000));
        assert_eq!(r.final_tax, dec!(67_900_000));
    }

    #[test]
    fn test_inheritance_spouse_deduction_wins() {
        let r = calculate_inheritance_tax(&InheritanceTaxInput {
            estate_value: dec!(1_000_000_000),
            has_spouse: true,
            children_count: 0,
            debt_amount: Decimal::ZERO,
        })
        .unwrap()
        .result;
        assert_eq!(r.total_deduction, dec!(700_000_000));
        assert_eq!(r.taxable_income, dec!(300_000_000));
    }

    #[test]
    fn test_debt_exceeding_estate() {
        let r = calculate_inheritance_tax(&InheritanceTaxInput {
            estate_value: dec!(100_000_000),
            has_spouse: false,
            children_count: 1,
            debt_amount: dec!(200_000_000),
        })
        .unwrap()
        .result;
        assert_eq!(r.estate_value, Decimal::ZERO);
        assert_eq!(r.final_tax, Decimal::ZERO);
    }

    #[test]
    fn test_gift_from_parent() {
        let r = calculate_gift_tax(&GiftTaxInput {
            gift_value: dec!(150_000_000),
            donor_relation: DonorRelation::DirectAscendant,
        })
        .unwrap()
        .result;
        assert_eq!(r.exemption_limit, dec!(50_000_000));
        assert_eq!(r.taxable_income, dec!(100_000_000));
        assert_eq!(r.calculated_tax, dec!(10_000_000));
        assert_eq!(r.reporting_discount, dec!(300_000));
        assert_eq!(r.final_tax, dec!(9_700_000));
    }

    #[test]
    fn test_gift_within_spouse_exemption() {
        let r = calculate_gift_tax(&GiftTaxInput {
            gift_value: dec!(600_000_000),
            donor_relation: DonorRelation::Spouse,
        })
        .unwrap()
        .result;
        assert_eq!(r.final_tax, Decimal::ZERO);
    }

    #[test]
    fn test_donor_relation_wire_names() {
        let rel: DonorRelation = serde_json::from_str("\"direct-ascendant\"").unwrap();
        assert_eq!(rel, DonorRelation::DirectAscendant);
    }
}
