use serde::{Deserialize, Serialize};

use crate::numeric::round_to_won;
use crate::tables::fees::{APPRAISAL_BASE_FEE, VAT_RATE};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::validation::require_positive;
use crate::CalcResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalFeeInput {
    pub appraisal_value: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppraisalFeeOutput {
    pub base_fee: Money,
    pub vat: Money,
    pub total_fee: Money,
}

/// Appraiser's fee from the statutory schedule, plus VAT.
#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_appraisal_fee(
    input: &AppraisalFeeInput,
) -> CalcResult<ComputationOutput<AppraisalFeeOutput>> {
    require_positive("appraisal_value", input.appraisal_value, "감정평가액은 0보다 커야 합니다.")?;

    let base_fee = round_to_won(APPRAISAL_BASE_FEE.amount(input.appraisal_value));
    let vat = round_to_won(base_fee * VAT_RATE);

    let output = AppraisalFeeOutput {
        base_fee,
        vat,
        total_fee: base_fee + vat,
    };

    Ok(with_metadata(
        "Appraisal fee schedule plus 10% VAT",
        &serde_json::json!({ "vat_rate": VAT_RATE.to_string() }),
        Vec::new(),
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn fee(value: Money) -> AppraisalFeeOutput {
        calculate_appraisal_fee(&AppraisalFeeInput {
            appraisal_value: value,
        })
        .unwrap()
        .result
    }

    #[test]
    fn test_appraisal_fee_mid_schedule() {
        let r = fee(dec!(300_000_000));
        assert_eq!(r.base_fee, dec!(619_500));
        assert_eq!(r.vat, dec!(61_950));
        assert_eq!(r.total_fee, dec!(681_450));
    }

    #[test]
    fn test_appraisal_fee_minimum() {
        assert_eq!(fee(dec!(1_000_000)).base_fee, dec!(110_000));
    }

    #[test]
    fn test_appraisal_fee_rejects_zero() {
        let err = calculate_appraisal_fee(&AppraisalFeeInput {
            appraisal_value: dec!(0),
        })
        .unwrap_err();
        assert_eq!(err.field(), Some("appraisal_value"));
    }
}
