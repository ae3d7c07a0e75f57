//! Statutory intestate shares: a spouse takes one and a half shares against
//! one share per child.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{ratio_percent, round_to_won};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::{require_count, require_positive};
use crate::CalcResult;

const SPOUSE_WEIGHT: Decimal = dec!(1.5);
const CHILD_WEIGHT: Decimal = Decimal::ONE;
const MAX_CHILDREN: u32 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceShareInput {
    pub total_assets: Money,
    pub has_spouse: bool,
    pub number_of_children: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeirShare {
    /// "배우자" or "자녀 n".
    pub heir: String,
    /// Percent, 2dp.
    pub share_ratio: Percent,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InheritanceShareOutput {
    pub shares: Vec<HeirShare>,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_inheritance_share(
    input: &InheritanceShareInput,
) -> CalcResult<ComputationOutput<InheritanceShareOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_positive("total_assets", input.total_assets, "상속재산가액은 0보다 커야 합니다.")?;
    require_count(
        "number_of_children",
        input.number_of_children,
        0,
        MAX_CHILDREN,
        "자녀수는 0 이상 50 이하여야 합니다.",
    )?;
    if !input.has_spouse && input.number_of_children == 0 {
        return Err(CalcError::rule("number_of_children", "상속인이 없습니다."));
    }

    let spouse_weight = if input.has_spouse {
        SPOUSE_WEIGHT
    } else {
        Decimal::ZERO
    };
    let total_weight = spouse_weight + CHILD_WEIGHT * Decimal::from(input.number_of_children);

    let share = |heir: String, weight: Decimal| -> CalcResult<HeirShare> {
        Ok(HeirShare {
            heir,
            share_ratio: ratio_percent(weight, total_weight, 2)?,
            amount: round_to_won(input.total_assets * weight / total_weight),
        })
    };

    let mut shares = Vec::with_capacity(input.number_of_children as usize + 1);
    if input.has_spouse {
        shares.push(share("배우자".to_string(), SPOUSE_WEIGHT)?);
    }
    for n in 1..=input.number_of_children {
        shares.push(share(format!("자녀 {n}"), CHILD_WEIGHT)?);
    }

    let allocated: Money = shares.iter().map(|s| s.amount).sum();
    let drift = round_to_won(input.total_assets) - allocated;
    if !drift.is_zero() {
        warnings.push(format!("원 단위 반올림으로 합계가 {drift}원 차이납니다."));
    }

    Ok(with_metadata(
        "Statutory shares: spouse 1.5, each child 1",
        &serde_json::json!({
            "total_weight": total_weight.to_string(),
            "heirs": shares.len(),
        }),
        warnings,
        InheritanceShareOutput { shares },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shares(
        assets: Money,
        spouse: bool,
        children: u32,
    ) -> ComputationOutput<InheritanceShareOutput> {
        calculate_inheritance_share(&InheritanceShareInput {
            total_assets: assets,
            has_spouse: spouse,
            number_of_children: children,
        })
        .unwrap()
    }

    #[test]
    fn test_spouse_and_two_children() {
        let out = shares(dec!(700_000_000), true, 2);
        let s = &out.result.shares;
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].heir, "배우자");
        assert_eq!(s[0].share_ratio, dec!(42.86));
        assert_eq!(s[0].amount, dec!(300_000_000));
        assert_eq!(s[1].heir, "자녀 1");
        assert_eq!(s[1].share_ratio, dec!(28.57));
        assert_eq!(s[2].amount, dec!(200_000_000));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_spouse_alone_takes_everything() {
        let s = shares(dec!(123_456_789), true, 0).result.shares;
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].share_ratio, dec!(100));
        assert_eq!(s[0].amount, dec!(123_456_789));
    }

    #[test]
    fn test_children_only_split_evenly() {
        let out = shares(dec!(100_000_000), false, 3);
        let s = &out.result.shares;
        assert_eq!(s[0].share_ratio, dec!(33.33));
        assert_eq!(s[0].amount, dec!(33_333_333));
        // three rounded shares leave one won unallocated
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_no_heirs_is_a_domain_error() {
        let err = calculate_inheritance_share(&InheritanceShareInput {
            total_assets: dec!(1_000),
            has_spouse: false,
            number_of_children: 0,
        })
        .unwrap_err();
        assert!(matches!(err, CalcError::DomainRule { .. }));
        assert_eq!(err.reason(), "상속인이 없습니다.");
    }
}
