use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::numeric::round_to_won;
use crate::tables::fees::{bond_per_mille, AreaBand, BondRegion, BOND_DISCOUNT_RATE};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation::require_positive;
use crate::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingBondInput {
    pub sale_price: Money,
    pub region: BondRegion,
    pub area_size: AreaBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingBondOutput {
    /// Face value of bonds the buyer must take up.
    pub bond_purchase_amount: Money,
    /// Loss when the bonds are sold back at once.
    pub discount_cost: Money,
    pub actual_burden: Money,
    /// Per mille of the sale price.
    pub purchase_rate: Decimal,
}

/// Compulsory first-class housing bond bought at registration.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_housing_bond(
    input: &HousingBondInput,
) -> CalcResult<ComputationOutput<HousingBondOutput>> {
    require_positive("sale_price", input.sale_price, "매매가격은 0보다 커야 합니다.")?;

    let per_mille = Decimal::from(bond_per_mille(input.region, input.area_size));
    let bond_purchase_amount = round_to_won(input.sale_price * per_mille / dec!(1000));
    let discount_cost = round_to_won(bond_purchase_amount * BOND_DISCOUNT_RATE);

    let output = HousingBondOutput {
        bond_purchase_amount,
        discount_cost,
        actual_burden: bond_purchase_amount - discount_cost,
        purchase_rate: per_mille,
    };

    Ok(with_metadata(
        "Housing bond purchase by region and floor-area band",
        &serde_json::json!({
            "region": input.region,
            "area_size": input.area_size,
            "discount_rate": BOND_DISCOUNT_RATE.to_string(),
        }),
        Vec::new(),
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seoul_large_unit() {
        let r = calculate_housing_bond(&HousingBondInput {
            sale_price: dec!(500_000_000),
            region: BondRegion::Seoul,
            area_size: AreaBand::Large,
        })
        .unwrap()
        .result;
        assert_eq!(r.bond_purchase_amount, dec!(15_500_000));
        assert_eq!(r.discount_cost, dec!(930_000));
        assert_eq!(r.actual_burden, dec!(14_570_000));
        assert_eq!(r.purchase_rate, dec!(31));
    }

    #[test]
    fn test_small_unit_elsewhere() {
        let r = calculate_housing_bond(&HousingBondInput {
            sale_price: dec!(100_000_000),
            region: BondRegion::Other,
            area_size: AreaBand::Small,
        })
        .unwrap()
        .result;
        assert_eq!(r.bond_purchase_amount, dec!(500_000));
        assert_eq!(r.actual_burden, dec!(470_000));
    }

    #[test]
    fn test_region_parses_from_korean() {
        let input: HousingBondInput = serde_json::from_str(
            r#"{"sale_price":"300000000","region":"광역시","area_size":"60~85㎡"}"#,
        )
        .unwrap();
        assert_eq!(input.region, BondRegion::Metropolitan);
        assert_eq!(input.area_size, AreaBand::Medium);
    }
}
