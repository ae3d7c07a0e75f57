use rust_decimal::Decimal;
use serde::Serialize;

use crate::numeric::round_to_won;
use crate::types::{Money, Rate};

/// One tier of a progressive table. `upper_limit: None` is the open top tier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bracket {
    pub upper_limit: Option<Money>,
    pub rate: Rate,
    pub subtracted_amount: Money,
    pub label: &'static str,
}

impl Bracket {
    /// Boundary values belong to the lower bracket.
    pub fn contains(&self, base: Money) -> bool {
        match self.upper_limit {
            Some(limit) => base <= limit,
            None => true,
        }
    }
}

/// Slice of the base taxed at one marginal rate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarginalSlice {
    pub label: &'static str,
    pub taxable_amount: Money,
    pub rate: Rate,
    pub tax_amount: Money,
}

/// Ordered progressive table, evaluated as `base x rate - subtracted_amount`.
#[derive(Debug, Clone, Copy)]
pub struct BracketTable {
    pub brackets: &'static [Bracket],
}

impl BracketTable {
    pub const fn new(brackets: &'static [Bracket]) -> Self {
        Self { brackets }
    }

    /// First bracket whose upper limit is >= `base`.
    pub fn lookup(&self, base: Money) -> &'static Bracket {
        let brackets = self.brackets;
        brackets
            .iter()
            .find(|b| b.contains(base))
            .unwrap_or(&brackets[brackets.len() - 1])
    }

    /// `max(0, base x rate - subtracted_amount)`, unrounded.
    pub fn tax(&self, base: Money) -> Money {
        let bracket = self.lookup(base);
        (base * bracket.rate - bracket.subtracted_amount).max(Decimal::ZERO)
    }

    /// Splits `base` across the tiers and taxes each slice at its own rate,
    /// rounding each slice to won.
    pub fn marginal_breakdown(&self, base: Money) -> Vec<MarginalSlice> {
        let mut slices = Vec::new();
        let mut remaining = base;
        let mut previous_limit = Decimal::ZERO;

        for bracket in self.brackets {
            if remaining <= Decimal::ZERO {
                break;
            }
            let taxable_amount = match bracket.upper_limit {
                Some(limit) => remaining.min(limit - previous_limit),
                None => remaining,
            };
            slices.push(MarginalSlice {
                label: bracket.label,
                taxable_amount,
                rate: bracket.rate,
                tax_amount: round_to_won(taxable_amount * bracket.rate),
            });
            remaining -= taxable_amount;
            match bracket.upper_limit {
                Some(limit) => previous_limit = limit,
                None => break,
            }
        }

        slices
    }

    /// Limits strictly increasing and the last tier open-ended.
    pub fn is_well_formed(&self) -> bool {
        let Some((last, rest)) = self.brackets.split_last() else {
            return false;
        };
        if last.upper_limit.is_some() || rest.iter().any(|b| b.upper_limit.is_none()) {
            return false;
        }
        rest.windows(2)
            .all(|w| matches!((w[0].upper_limit, w[1].upper_limit), (Some(a), Some(b)) if a < b))
    }

    /// The formula is continuous when each tier's subtraction lines up with
    /// the tier below at the shared boundary.
    pub fn is_continuous(&self) -> bool {
        self.brackets.windows(2).all(|w| match w[0].upper_limit {
            Some(limit) => {
                let below = limit * w[0].rate - w[0].subtracted_amount;
                let above = limit * w[1].rate - w[1].subtracted_amount;
                below == above
            }
            None => false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const SAMPLE: BracketTable = BracketTable::new(&[
        Bracket {
            upper_limit: Some(dec!(100)),
            rate: dec!(0.1),
            subtracted_amount: dec!(0),
            label: "low",
        },
        Bracket {
            upper_limit: None,
            rate: dec!(0.2),
            subtracted_amount: dec!(10),
            label: "high",
        },
    ]);

    #[test]
    fn test_boundary_belongs_to_lower_bracket() {
        assert_eq!(SAMPLE.lookup(dec!(100)).label, "low");
        assert_eq!(SAMPLE.lookup(dec!(100.01)).label, "high");
    }

    #[test]
    fn test_tax_is_clamped_at_zero() {
        assert_eq!(SAMPLE.tax(dec!(0)), dec!(0));
        assert_eq!(SAMPLE.tax(dec!(300)), dec!(50));
    }

    #[test]
    fn test_marginal_breakdown_matches_formula() {
        let slices = SAMPLE.marginal_breakdown(dec!(300));
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].taxable_amount, dec!(100));
        assert_eq!(slices[1].taxable_amount, dec!(200));
        let total: Decimal = slices.iter().map(|s| s.tax_amount).sum();
        assert_eq!(total, SAMPLE.tax(dec!(300)));
    }

    #[test]
    fn test_shape_checks() {
        assert!(SAMPLE.is_well_formed());
        assert!(SAMPLE.is_continuous());
    }
}
