//! Inheritance and gift tax.

use rust_decimal_macros::dec;

use super::brackets::{Bracket, BracketTable};
use crate::types::{Money, Rate};

pub const WEALTH_TRANSFER: BracketTable = BracketTable::new(&[
    Bracket {
        upper_limit: Some(dec!(100_000_000)),
        rate: dec!(0.10),
        subtracted_amount: dec!(0),
        label: "1억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(500_000_000)),
        rate: dec!(0.20),
        subtracted_amount: dec!(10_000_000),
        label: "5억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(1_000_000_000)),
        rate: dec!(0.30),
        subtracted_amount: dec!(60_000_000),
        label: "10억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(3_000_000_000)),
        rate: dec!(0.40),
        subtracted_amount: dec!(160_000_000),
        label: "30억원 이하",
    },
    Bracket {
        upper_limit: None,
        rate: dec!(0.50),
        subtracted_amount: dec!(460_000_000),
        label: "30억원 초과",
    },
]);

/// Discount for filing on time.
pub const REPORTING_DISCOUNT_RATE: Rate = dec!(0.03);

pub const INHERITANCE_BASIC_DEDUCTION: Money = dec!(200_000_000);
pub const INHERITANCE_LUMP_SUM_DEDUCTION: Money = dec!(500_000_000);
pub const INHERITANCE_SPOUSE_DEDUCTION: Money = dec!(500_000_000);

pub const GIFT_EXEMPTION_SPOUSE: Money = dec!(600_000_000);
pub const GIFT_EXEMPTION_LINEAL: Money = dec!(50_000_000);
pub const GIFT_EXEMPTION_RELATIVE: Money = dec!(10_000_000);
