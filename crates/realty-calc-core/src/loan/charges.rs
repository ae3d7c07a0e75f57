use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{percent_to_rate, round_to_won};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{require_non_negative, require_positive};
use crate::CalcResult;

const DAYS_PER_YEAR: Decimal = dec!(365);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyRepaymentInput {
    pub repayment_amount: Money,
    pub fee_rate: Percent,
    pub remaining_days: Decimal,
    pub total_days: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarlyRepaymentOutput {
    pub early_repayment_fee: Money,
    pub net_amount: Money,
    pub repayment_amount: Money,
    pub fee_rate: Percent,
    /// Share of the term still outstanding, unrounded.
    pub day_ratio: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueInterestInput {
    pub overdue_amount: Money,
    pub annual_rate: Percent,
    pub days: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverdueInterestOutput {
    pub overdue_interest: Money,
    pub total_amount: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Prepayment penalty, scaled down linearly by the days left on the loan.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_early_repayment(
    input: &EarlyRepaymentInput,
) -> CalcResult<ComputationOutput<EarlyRepaymentOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive(
        "repayment_amount",
        input.repayment_amount,
        "중도상환금액은 0보다 커야 합니다.",
    )?;
    require_non_negative("fee_rate", input.fee_rate, "수수료율은 0 이상이어야 합니다.")?;
    require_non_negative(
        "remaining_days",
        input.remaining_days,
        "대출잔여일수는 0 이상이어야 합니다.",
    )?;
    require_positive("total_days", input.total_days, "대출전체기간은 0보다 커야 합니다.")?;
    if input.remaining_days > input.total_days {
        return Err(CalcError::rule(
            "remaining_days",
            "대출잔여일수는 대출전체기간보다 클 수 없습니다.",
        ));
    }

    let day_ratio = input.remaining_days / input.total_days;
    let early_repayment_fee =
        round_to_won(input.repayment_amount * percent_to_rate(input.fee_rate) * day_ratio);

    let output = EarlyRepaymentOutput {
        early_repayment_fee,
        net_amount: input.repayment_amount - early_repayment_fee,
        repayment_amount: input.repayment_amount,
        fee_rate: input.fee_rate,
        day_ratio,
    };

    Ok(with_metadata(
        "Early repayment fee: amount x fee rate x remaining/total days",
        &serde_json::json!({}),
        warnings,
        output,
    ))
}

/// Simple late-payment interest on an actual/365 basis.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_overdue_interest(
    input: &OverdueInterestInput,
) -> CalcResult<ComputationOutput<OverdueInterestOutput>> {
    let warnings: Vec<String> = Vec::new();

    require_positive("overdue_amount", input.overdue_amount, "연체금액은 0보다 커야 합니다.")?;
    require_non_negative("annual_rate", input.annual_rate, "연체이율은 0 이상이어야 합니다.")?;
    require_non_negative("days", input.days, "연체일수는 0 이상이어야 합니다.")?;

    let interest =
        input.overdue_amount * percent_to_rate(input.annual_rate) * input.days / DAYS_PER_YEAR;

    let output = OverdueInterestOutput {
        overdue_interest: round_to_won(interest),
        // Rounded once from the unrounded sum.
        total_amount: round_to_won(input.overdue_amount + interest),
    };

    Ok(with_metadata(
        "Overdue interest, actual/365",
        &serde_json::json!({ "day_count": "actual/365" }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_early_repayment_pro_rata() {
        let r = calculate_early_repayment(&EarlyRepaymentInput {
            repayment_amount: dec!(100_000_000),
            fee_rate: dec!(1.2),
            remaining_days: dec!(547.5),
            total_days: dec!(1095),
        })
        .unwrap()
        .result;
        assert_eq!(r.day_ratio, dec!(0.5));
        assert_eq!(r.early_repayment_fee, dec!(600_000));
        assert_eq!(r.net_amount, dec!(99_400_000));
    }

    #[test]
    fn test_early_repayment_rejects_remaining_over_total() {
        let err = calculate_early_repayment(&EarlyRepaymentInput {
            repayment_amount: dec!(100_000_000),
            fee_rate: dec!(1.2),
            remaining_days: dec!(1200),
            total_days: dec!(1095),
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::DomainRule { .. }));
    }

    #[test]
    fn test_overdue_interest() {
        let r = calculate_overdue_interest(&OverdueInterestInput {
            overdue_amount: dec!(10_000_000),
            annual_rate: dec!(12),
            days: dec!(73),
        })
        .unwrap()
        .result;
        assert_eq!(r.overdue_interest, dec!(240_000));
        assert_eq!(r.total_amount, dec!(10_240_000));
    }

    #[test]
    fn test_overdue_zero_days() {
        let r = calculate_overdue_interest(&OverdueInterestInput {
            overdue_amount: dec!(10_000_000),
            annual_rate: dec!(12),
            days: Decimal::ZERO,
        })
        .unwrap()
        .result;
        assert_eq!(r.overdue_interest, Decimal::ZERO);
        assert_eq!(r.total_amount, dec!(10_000_000));
    }
}
