//! Loan ceilings: collateral (LTV) limits, income (DSR) limits and the
//! binding minimum of the two.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::{checked_ratio, percent_to_rate, rate_to_percent, round_to_won};
use crate::tables::lending::{
    auction_ltv_rate, dsr_limit, ltv_rate, stress_add_on, AuctionBorrower, BorrowerType,
    FinancialInstitution, LenderTier, LtvRegion, MetroArea, StressRegion, MAX_LOAN_TERM_YEARS,
    QUICK_DSR_RATE, REGULATORY_LTV_FIRST_TIME, REGULATORY_LTV_GENERAL,
};
use crate::time_value::annuity_present_value;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{
    require_annual_rate, require_at_most, require_count, require_non_negative, require_positive,
};
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Regulatory limit (LTV + stress DSR)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryLimitInput {
    pub property_value: Money,
    pub annual_income: Money,
    /// Annual repayments already committed to other debt.
    pub other_debt_payment: Money,
    pub region: StressRegion,
    pub is_first_time_buyer: bool,
    pub financial_institution: FinancialInstitution,
    pub loan_term_years: u32,
    pub annual_rate: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegulatoryLimitOutput {
    pub max_loan_by_ltv: Money,
    pub max_loan_by_dsr: Money,
    pub max_loan: Money,
    pub ltv_limit: Percent,
    pub dsr_limit: Percent,
}

/// Binding loan ceiling under LTV and stress-DSR rules.
///
/// The DSR leg solves for the principal whose level payment at the
/// stressed rate fits the income headroom left after other debt.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_regulatory_limit(
    input: &RegulatoryLimitInput,
) -> CalcResult<ComputationOutput<RegulatoryLimitOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive("property_value", input.property_value, "주택가격은 0보다 커야 합니다.")?;
    require_non_negative("annual_income", input.annual_income, "연소득은 0 이상이어야 합니다.")?;
    require_non_negative(
        "other_debt_payment",
        input.other_debt_payment,
        "기타부채 상환액은 0 이상이어야 합니다.",
    )?;
    require_count(
        "loan_term_years",
        input.loan_term_years,
        1,
        MAX_LOAN_TERM_YEARS,
        "대출기간은 1년 이상 50년 이하여야 합니다.",
    )?;
    require_annual_rate("annual_rate", input.annual_rate, "금리는 0% 이상 100% 이하여야 합니다.")?;

    // --- 1. Collateral leg ---
    let ltv = if input.is_first_time_buyer {
        REGULATORY_LTV_FIRST_TIME
    } else {
        REGULATORY_LTV_GENERAL
    };
    let max_loan_by_ltv = round_to_won(input.property_value * ltv);

    // --- 2. Income leg at the stressed rate ---
    let dsr = dsr_limit(input.financial_institution);
    let stress = stress_add_on(input.region);
    let monthly_rate = (percent_to_rate(input.annual_rate) + stress) / dec!(12);
    let months = input.loan_term_years * 12;

    let headroom = input.annual_income * dsr - input.other_debt_payment;
    if headroom <= Decimal::ZERO {
        warnings.push("기존 부채 상환액이 DSR 한도를 초과합니다.".to_string());
    }
    let pv = annuity_present_value(headroom / dec!(12), monthly_rate, months)?;
    let max_loan_by_dsr = round_to_won(pv).max(Decimal::ZERO);

    let output = RegulatoryLimitOutput {
        max_loan_by_ltv,
        max_loan_by_dsr,
        max_loan: max_loan_by_ltv.min(max_loan_by_dsr),
        ltv_limit: rate_to_percent(ltv),
        dsr_limit: rate_to_percent(dsr),
    };

    Ok(with_metadata(
        "Regulatory loan limit: min(LTV, stress DSR)",
        &serde_json::json!({
            "stress_add_on": stress.to_string(),
            "months": months,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// LTV
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtvInput {
    pub property_price: Money,
    pub borrower_type: BorrowerType,
    pub region: LtvRegion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LtvOutput {
    pub ltv_rate: Percent,
    pub max_loan_amount: Money,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_ltv(input: &LtvInput) -> CalcResult<ComputationOutput<LtvOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive("property_price", input.property_price, "주택가격은 0보다 커야 합니다.")?;

    let rate = ltv_rate(input.borrower_type, input.region);
    if rate.is_zero() {
        warnings.push("해당 지역에서는 주택담보대출이 허용되지 않습니다 (LTV 0%).".to_string());
    }

    let output = LtvOutput {
        ltv_rate: rate_to_percent(rate),
        max_loan_amount: round_to_won(input.property_price * rate),
    };

    Ok(with_metadata(
        "LTV limit by borrower type and region",
        &serde_json::json!({
            "borrower_type": input.borrower_type,
            "region": input.region,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Quick maximum loan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxLoanInput {
    pub property_price: Money,
    pub annual_income: Money,
    pub borrower_type: BorrowerType,
    pub region: LtvRegion,
    pub interest_rate: Percent,
    pub loan_term_years: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaxLoanOutput {
    pub ltv_limit: Money,
    pub ltv_rate: Percent,
    pub dsr_limit: Money,
    pub dsr_rate: Percent,
    pub max_loan_amount: Money,
}

/// Quick estimate: the DSR leg approximates annual debt service as
/// `principal x (rate + 1/years)`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_max_loan(input: &MaxLoanInput) -> CalcResult<ComputationOutput<MaxLoanOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive("property_price", input.property_price, "주택가격은 0보다 커야 합니다.")?;
    require_positive("annual_income", input.annual_income, "연소득은 0보다 커야 합니다.")?;
    require_positive("interest_rate", input.interest_rate, "대출금리는 0보다 커야 합니다.")?;
    require_annual_rate(
        "interest_rate",
        input.interest_rate,
        "대출금리는 100% 이하여야 합니다.",
    )?;
    require_positive("loan_term_years", input.loan_term_years, "대출기간은 0보다 커야 합니다.")?;
    require_at_most(
        "loan_term_years",
        input.loan_term_years,
        Decimal::from(MAX_LOAN_TERM_YEARS),
        "대출기간은 50년 이하여야 합니다.",
    )?;

    let rate = ltv_rate(input.borrower_type, input.region);
    let ltv_limit = round_to_won(input.property_price * rate);

    let service_factor =
        percent_to_rate(input.interest_rate) + Decimal::ONE / input.loan_term_years;
    let dsr_limit = round_to_won(checked_ratio(
        input.annual_income * QUICK_DSR_RATE,
        service_factor,
        "simplified DSR limit",
    )?);

    let output = MaxLoanOutput {
        ltv_limit,
        ltv_rate: rate_to_percent(rate),
        dsr_limit,
        dsr_rate: rate_to_percent(QUICK_DSR_RATE),
        max_loan_amount: ltv_limit.min(dsr_limit),
    };

    Ok(with_metadata(
        "Maximum loan: min(LTV limit, simplified DSR limit)",
        &serde_json::json!({ "dsr_rate": QUICK_DSR_RATE.to_string() }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Auction (court sale) loan
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeclosureLoanInput {
    /// Winning bid.
    pub sale_price: Money,
    pub appraisal_price: Money,
    pub borrower_type: AuctionBorrower,
    pub region: MetroArea,
    pub financial_tier: LenderTier,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForeclosureLoanOutput {
    pub ltv_rate: Percent,
    pub collateral_base: Money,
    pub max_loan_amount: Money,
    pub required_equity: Money,
}

/// Auction loans lend against the lower of the winning bid and the appraisal.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_foreclosure_loan(
    input: &ForeclosureLoanInput,
) -> CalcResult<ComputationOutput<ForeclosureLoanOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive("sale_price", input.sale_price, "낙찰가는 0보다 커야 합니다.")?;
    require_positive("appraisal_price", input.appraisal_price, "감정가는 0보다 커야 합니다.")?;

    let rate = auction_ltv_rate(input.financial_tier, input.borrower_type, input.region);
    let collateral_base = input.sale_price.min(input.appraisal_price);
    let max_loan_amount = round_to_won(collateral_base * rate);

    let output = ForeclosureLoanOutput {
        ltv_rate: rate_to_percent(rate),
        collateral_base,
        max_loan_amount,
        required_equity: round_to_won(input.sale_price - max_loan_amount),
    };

    Ok(with_metadata(
        "Auction loan limit on min(bid, appraisal)",
        &serde_json::json!({
            "financial_tier": input.financial_tier,
            "borrower_type": input.borrower_type,
            "region": input.region,
        }),
        warnings,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    fn regulatory(income: Money, first_time: bool) -> RegulatoryLimitInput {
        RegulatoryLimitInput {
            property_value: dec!(500_000_000),
            annual_income: income,
            other_debt_payment: Decimal::ZERO,
            region: StressRegion::Capital,
            is_first_time_buyer: first_time,
            financial_institution: FinancialInstitution::First,
            loan_term_years: 30,
            annual_rate: dec!(4),
        }
    }

    #[test]
    fn test_regulatory_ltv_binds() {
        let r = calculate_regulatory_limit(&regulatory(dec!(60_000_000), false))
            .unwrap()
            .result;
        assert_eq!(r.max_loan_by_ltv, dec!(350_000_000));
        assert!(r.max_loan_by_dsr > dec!(352_000_000));
        assert!(r.max_loan_by_dsr < dec!(352_500_000));
        assert_eq!(r.max_loan, dec!(350_000_000));
        assert_eq!(r.ltv_limit, dec!(70));
        assert_eq!(r.dsr_limit, dec!(40));
    }

    #[test]
    fn test_regulatory_dsr_binds() {
        let r = calculate_regulatory_limit(&regulatory(dec!(40_000_000), true))
            .unwrap()
            .result;
        assert_eq!(r.max_loan_by_ltv, dec!(400_000_000));
        assert!(r.max_loan_by_dsr > dec!(234_700_000));
        assert!(r.max_loan_by_dsr < dec!(235_000_000));
        assert_eq!(r.max_loan, r.max_loan_by_dsr);
    }

    #[test]
    fn test_regulatory_dsr_clamped_when_debt_exceeds_headroom() {
        let input = RegulatoryLimitInput {
            other_debt_payment: dec!(30_000_000),
            ..regulatory(dec!(60_000_000), false)
        };
        let out = calculate_regulatory_limit(&input).unwrap();
        assert_eq!(out.result.max_loan_by_dsr, Decimal::ZERO);
        assert_eq!(out.result.max_loan, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_ltv_matrix_and_warning() {
        let out = calculate_ltv(&LtvInput {
            property_price: dec!(500_000_000),
            borrower_type: BorrowerType::FirstTimeBuyer,
            region: LtvRegion::NonCapital,
        })
        .unwrap();
        assert_eq!(out.result.ltv_rate, dec!(80));
        assert_eq!(out.result.max_loan_amount, dec!(400_000_000));
        assert!(out.warnings.is_empty());

        let blocked = calculate_ltv(&LtvInput {
            property_price: dec!(500_000_000),
            borrower_type: BorrowerType::MultiHome,
            region: LtvRegion::Speculation,
        })
        .unwrap();
        assert_eq!(blocked.result.max_loan_amount, Decimal::ZERO);
        assert_eq!(blocked.warnings.len(), 1);
    }

    #[test]
    fn test_max_loan_dsr_binds() {
        let r = calculate_max_loan(&MaxLoanInput {
            property_price: dec!(500_000_000),
            annual_income: dec!(60_000_000),
            borrower_type: BorrowerType::FirstTimeBuyer,
            region: LtvRegion::NonCapital,
            interest_rate: dec!(4),
            loan_term_years: dec!(30),
        })
        .unwrap()
        .result;
        assert_eq!(r.ltv_limit, dec!(400_000_000));
        assert_eq!(r.dsr_limit, dec!(327_272_727));
        assert_eq!(r.dsr_rate, dec!(40));
        assert_eq!(r.max_loan_amount, dec!(327_272_727));
    }

    #[test]
    fn test_max_loan_rejects_zero_rate() {
        let err = calculate_max_loan(&MaxLoanInput {
            property_price: dec!(500_000_000),
            annual_income: dec!(60_000_000),
            borrower_type: BorrowerType::Homeless,
            region: LtvRegion::Capital,
            interest_rate: Decimal::ZERO,
            loan_term_years: dec!(30),
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
        assert_eq!(err.reason(), "대출금리는 0보다 커야 합니다.");
    }

    #[test]
    fn test_foreclosure_uses_lower_of_bid_and_appraisal() {
        let r = calculate_foreclosure_loan(&ForeclosureLoanInput {
            sale_price: dec!(300_000_000),
            appraisal_price: dec!(250_000_000),
            borrower_type: AuctionBorrower::Homeless,
            region: MetroArea::NonCapital,
            financial_tier: LenderTier::NonBank,
        })
        .unwrap()
        .result;
        assert_eq!(r.collateral_base, dec!(250_000_000));
        assert_eq!(r.ltv_rate, dec!(85));
        assert_eq!(r.max_loan_amount, dec!(212_500_000));
        assert_eq!(r.required_equity, dec!(87_500_000));
    }

    #[test]
    fn test_rate_above_ceiling_rejected() {
        let err = calculate_regulatory_limit(&RegulatoryLimitInput {
            annual_rate: dec!(300),
            ..regulatory(dec!(60_000_000), false)
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("annual_rate"));
    }

    #[test]
    fn test_ceiling_rate_and_term() {
        let r = calculate_regulatory_limit(&RegulatoryLimitInput {
            annual_rate: dec!(100),
            loan_term_years: MAX_LOAN_TERM_YEARS,
            ..regulatory(dec!(60_000_000), false)
        })
        .unwrap()
        .result;
        assert!(r.max_loan_by_dsr < dec!(24_000_000));
        assert_eq!(r.max_loan, r.max_loan_by_dsr);
    }

    #[test]
    fn test_unbounded_income_is_an_error_not_a_panic() {
        let err = calculate_regulatory_limit(&RegulatoryLimitInput {
            annual_rate: Decimal::ZERO,
            loan_term_years: MAX_LOAN_TERM_YEARS,
            ..regulatory(Decimal::MAX, false)
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::Overflow { .. }));
    }

    #[test]
    fn test_max_loan_term_beyond_fifty_years_rejected() {
        let err = calculate_max_loan(&MaxLoanInput {
            property_price: dec!(500_000_000),
            annual_income: dec!(60_000_000),
            borrower_type: BorrowerType::Homeless,
            region: LtvRegion::NonCapital,
            interest_rate: dec!(0.0000000000000000000000001),
            loan_term_years: dec!(10_000_000_000_000_000_000_000_000),
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("loan_term_years"));
    }
}
