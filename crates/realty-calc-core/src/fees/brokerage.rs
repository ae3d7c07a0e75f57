use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::numeric::{percent_to_rate, round_to_won};
use crate::tables::fees::{
    CommissionRate, HOUSING_LEASE, HOUSING_SALE, MONTHLY_RENT_MULTIPLIER,
    MONTHLY_RENT_SMALL_MULTIPLIER, MONTHLY_RENT_SMALL_THRESHOLD, OFFICETEL_LEASE, OFFICETEL_SALE,
    OTHER_PROPERTY, VAT_RATE,
};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::validation::require_non_negative;
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContractType {
    #[serde(rename = "매매")]
    Sale,
    #[serde(rename = "전세")]
    Jeonse,
    #[serde(rename = "월세")]
    MonthlyRent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BrokeragePropertyType {
    #[serde(rename = "주택")]
    Housing,
    #[serde(rename = "오피스텔")]
    Officetel,
    #[serde(rename = "그외")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerageInput {
    pub contract_type: ContractType,
    pub property_type: BrokeragePropertyType,
    /// Sale price, or the deposit for leases.
    pub transaction_amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rent: Option<Money>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrokerageOutput {
    pub effective_amount: Money,
    pub commission: Money,
    pub applied_rate: Percent,
    pub vat: Money,
    pub total_with_vat: Money,
    pub has_vat: bool,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Maximum statutory brokerage commission.
///
/// Housing uses the banded sale or lease table with caps on the lowest
/// bands. Officetels and other property pay a flat rate plus 10% VAT.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_brokerage(
    input: &BrokerageInput,
) -> CalcResult<ComputationOutput<BrokerageOutput>> {
    let mut warnings: Vec<String> = Vec::new();

    require_non_negative(
        "transaction_amount",
        input.transaction_amount,
        "거래금액은 0 이상이어야 합니다.",
    )?;
    if let Some(rent) = input.monthly_rent {
        require_non_negative("monthly_rent", rent, "월세는 0 이상이어야 합니다.")?;
    }

    // --- 1. Effective amount ---
    let effective_amount = match input.contract_type {
        ContractType::MonthlyRent => {
            let rent = match input.monthly_rent {
                Some(rent) if rent > Decimal::ZERO => rent,
                _ => {
                    return Err(CalcError::invalid(
                        "monthly_rent",
                        "월세 계약의 경우 월세액을 입력해야 합니다.",
                    ))
                }
            };
            monthly_rent_equivalent(input.transaction_amount, rent)
        }
        ContractType::Sale | ContractType::Jeonse => input.transaction_amount,
    };

    // --- 2. Commission ---
    let rate = commission_rate(input.contract_type, input.property_type, effective_amount);
    let uncapped = round_to_won(effective_amount * percent_to_rate(rate.percent));
    let commission = match rate.cap {
        Some(cap) if uncapped > cap => {
            warnings.push(format!("한도액 {cap}원 적용"));
            cap
        }
        _ => uncapped,
    };

    // --- 3. VAT ---
    let has_vat = input.property_type != BrokeragePropertyType::Housing;
    let vat = if has_vat {
        round_to_won(commission * VAT_RATE)
    } else {
        Decimal::ZERO
    };

    let output = BrokerageOutput {
        effective_amount,
        commission,
        applied_rate: rate.percent,
        vat,
        total_with_vat: commission + vat,
        has_vat,
    };

    Ok(with_metadata(
        "Statutory maximum brokerage commission",
        &serde_json::json!({
            "contract_type": input.contract_type,
            "property_type": input.property_type,
        }),
        warnings,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Deposit + rent x 100, falling back to x 70 when that lands below 5천만.
fn monthly_rent_equivalent(deposit: Money, rent: Money) -> Money {
    let full = deposit + rent * Decimal::from(MONTHLY_RENT_MULTIPLIER);
    if full < MONTHLY_RENT_SMALL_THRESHOLD {
        deposit + rent * Decimal::from(MONTHLY_RENT_SMALL_MULTIPLIER)
    } else {
        full
    }
}

fn commission_rate(
    contract: ContractType,
    property: BrokeragePropertyType,
    amount: Money,
) -> CommissionRate {
    use BrokeragePropertyType::*;
    match (property, contract) {
        (Housing, ContractType::Sale) => *HOUSING_SALE.lookup(amount),
        (Housing, ContractType::Jeonse | ContractType::MonthlyRent) => {
            *HOUSING_LEASE.lookup(amount)
        }
        (Officetel, ContractType::Sale) => OFFICETEL_SALE,
        (Officetel, ContractType::Jeonse | ContractType::MonthlyRent) => OFFICETEL_LEASE,
        (Other, _) => OTHER_PROPERTY,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn brokerage(
        contract: ContractType,
        property: BrokeragePropertyType,
        amount: Money,
        rent: Option<Money>,
    ) -> ComputationOutput<BrokerageOutput> {
        calculate_brokerage(&BrokerageInput {
            contract_type: contract,
            property_type: property,
            transaction_amount: amount,
            monthly_rent: rent,
        })
        .unwrap()
    }

    #[test]
    fn test_housing_sale_bands() {
        let r = brokerage(
            ContractType::Sale,
            BrokeragePropertyType::Housing,
            dec!(300_000_000),
            None,
        )
        .result;
        assert_eq!(r.applied_rate, dec!(0.4));
        assert_eq!(r.commission, dec!(1_200_000));
        assert!(!r.has_vat);
        assert_eq!(r.total_with_vat, dec!(1_200_000));

        let small = brokerage(
            ContractType::Sale,
            BrokeragePropertyType::Housing,
            dec!(30_000_000),
            None,
        )
        .result;
        assert_eq!(small.commission, dec!(180_000));
    }

    #[test]
    fn test_cap_applies() {
        let out = brokerage(
            ContractType::Sale,
            BrokeragePropertyType::Housing,
            dec!(49_000_000),
            None,
        );
        // 0.6% of 49M = 294,000 capped at 250,000
        assert_eq!(out.result.commission, dec!(250_000));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_monthly_rent_effective_amount() {
        let r = brokerage(
            ContractType::MonthlyRent,
            BrokeragePropertyType::Housing,
            dec!(10_000_000),
            Some(dec!(500_000)),
        )
        .result;
        assert_eq!(r.effective_amount, dec!(60_000_000));
        assert_eq!(r.commission, dec!(240_000));

        let small = brokerage(
            ContractType::MonthlyRent,
            BrokeragePropertyType::Housing,
            dec!(5_000_000),
            Some(dec!(300_000)),
        )
        .result;
        assert_eq!(small.effective_amount, dec!(26_000_000));
        assert_eq!(small.commission, dec!(130_000));
    }

    #[test]
    fn test_monthly_rent_required() {
        let err = calculate_brokerage(&BrokerageInput {
            contract_type: ContractType::MonthlyRent,
            property_type: BrokeragePropertyType::Housing,
            transaction_amount: dec!(10_000_000),
            monthly_rent: None,
        })
        .unwrap_err();
        assert_eq!(err.reason(), "월세 계약의 경우 월세액을 입력해야 합니다.");
    }

    #[test]
    fn test_officetel_pays_vat() {
        let r = brokerage(
            ContractType::Sale,
            BrokeragePropertyType::Officetel,
            dec!(200_000_000),
            None,
        )
        .result;
        assert_eq!(r.commission, dec!(1_000_000));
        assert!(r.has_vat);
        assert_eq!(r.vat, dec!(100_000));
        assert_eq!(r.total_with_vat, dec!(1_100_000));
    }
}
