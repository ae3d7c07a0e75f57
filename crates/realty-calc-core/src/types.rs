use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values, in won unless a field says 만원.
pub type Money = Decimal;

/// Rates expressed as decimals (0.05 = 5%). Used by tables and formulas.
pub type Rate = Decimal;

/// Rates as callers type them (4.5 = 4.5%). Inputs and display outputs.
pub type Percent = Decimal;

/// Areas in square metres unless a field says pyeong.
pub type Area = Decimal;

/// Label of the statutory snapshot every table in this crate encodes.
pub const TAX_LAW_SNAPSHOT: &str = "2025-01";

/// Standard computation output envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation. Contains nothing time- or host-dependent,
/// so identical inputs serialize to identical bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
    pub tax_law_snapshot: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
            tax_law_snapshot: TAX_LAW_SNAPSHOT.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_with_metadata_is_deterministic() {
        let a = with_metadata("m", &serde_json::json!({"x": 1}), vec![], dec!(1.5));
        let b = with_metadata("m", &serde_json::json!({"x": 1}), vec![], dec!(1.5));
        assert_eq!(a, b);
        assert_eq!(a.metadata.tax_law_snapshot, TAX_LAW_SNAPSHOT);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
