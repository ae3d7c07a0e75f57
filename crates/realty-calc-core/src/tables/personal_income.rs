//! Personal income tax table shared by transfer, comprehensive income and
//! the progressive breakdown.

use rust_decimal_macros::dec;

use super::brackets::{Bracket, BracketTable};
use crate::types::{Money, Rate};

pub const PERSONAL_INCOME: BracketTable = BracketTable::new(&[
    Bracket {
        upper_limit: Some(dec!(14_000_000)),
        rate: dec!(0.06),
        subtracted_amount: dec!(0),
        label: "1,400만원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(50_000_000)),
        rate: dec!(0.15),
        subtracted_amount: dec!(1_260_000),
        label: "5,000만원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(88_000_000)),
        rate: dec!(0.24),
        subtracted_amount: dec!(5_760_000),
        label: "8,800만원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(150_000_000)),
        rate: dec!(0.35),
        subtracted_amount: dec!(15_440_000),
        label: "1억 5,000만원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(300_000_000)),
        rate: dec!(0.38),
        subtracted_amount: dec!(19_940_000),
        label: "3억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(500_000_000)),
        rate: dec!(0.40),
        subtracted_amount: dec!(25_940_000),
        label: "5억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(1_000_000_000)),
        rate: dec!(0.42),
        subtracted_amount: dec!(35_940_000),
        label: "10억원 이하",
    },
    Bracket {
        upper_limit: None,
        rate: dec!(0.45),
        subtracted_amount: dec!(65_940_000),
        label: "10억원 초과",
    },
]);

/// Local income tax as a share of national income tax.
pub const LOCAL_INCOME_TAX_RATE: Rate = dec!(0.1);

// Capital gains on transfer
pub const TRANSFER_BASIC_DEDUCTION: Money = dec!(2_500_000);
pub const HIGH_VALUE_THRESHOLD: Money = dec!(1_200_000_000);
pub const SHORT_TERM_RATE: Rate = dec!(0.45);

// Comprehensive income
pub const BASIC_DEDUCTION_PER_PERSON: Money = dec!(1_500_000);

// Separate taxation of rental income
pub const RENTAL_SEPARATE_TAX_RATE: Rate = dec!(0.14);
pub const REGISTERED_EXPENSE_RATE: Rate = dec!(0.6);
pub const UNREGISTERED_EXPENSE_RATE: Rate = dec!(0.5);
pub const REGISTERED_BASIC_DEDUCTION: Money = dec!(4_000_000);
pub const UNREGISTERED_BASIC_DEDUCTION: Money = dec!(2_000_000);

// Deemed rental on deposits
pub const DEEMED_RENTAL_DEPOSIT_FLOOR: Money = dec!(300_000_000);
pub const DEEMED_RENTAL_RESIDENTIAL_SHARE: Rate = dec!(0.6);

/// Credit on rent reductions by a "good landlord".
pub const GOOD_LANDLORD_CREDIT_RATE: Rate = dec!(0.7);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        assert!(PERSONAL_INCOME.is_well_formed());
        assert!(PERSONAL_INCOME.is_continuous());
    }

    #[test]
    fn test_known_points() {
        assert_eq!(PERSONAL_INCOME.tax(dec!(14_000_000)), dec!(840_000));
        assert_eq!(PERSONAL_INCOME.tax(dec!(50_000_000)), dec!(6_240_000));
        assert_eq!(PERSONAL_INCOME.lookup(dec!(50_000_001)).rate, dec!(0.24));
    }
}
