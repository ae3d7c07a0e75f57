//! Property, comprehensive real-estate and fire-safety (regional resource)
//! tax tables.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::brackets::{Bracket, BracketTable};
use super::schedule::{Step, StepSchedule};
use crate::types::{Money, Rate};

/// Share of the assessed value that forms the tax base.
pub const FAIR_MARKET_RATIO: Rate = dec!(0.6);
pub const CITY_PLANNING_RATE: Rate = dec!(0.0014);
pub const PROPERTY_EDUCATION_RATE: Rate = dec!(0.2);
/// Urban surcharge in the holding-tax view, charged on the property tax.
pub const URBAN_SURCHARGE_ON_PROPERTY_TAX: Rate = dec!(0.14);
/// Rural special tax charged on the comprehensive tax.
pub const RURAL_SPECIAL_ON_COMPREHENSIVE: Rate = dec!(0.2);

pub const PROPERTY_GENERAL: BracketTable = BracketTable::new(&[
    Bracket {
        upper_limit: Some(dec!(60_000_000)),
        rate: dec!(0.001),
        subtracted_amount: dec!(0),
        label: "6천만원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(150_000_000)),
        rate: dec!(0.0015),
        subtracted_amount: dec!(30_000),
        label: "1억 5천만원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(300_000_000)),
        rate: dec!(0.0025),
        subtracted_amount: dec!(180_000),
        label: "3억원 이하",
    },
    Bracket {
        upper_limit: None,
        rate: dec!(0.004),
        subtracted_amount: dec!(630_000),
        label: "3억원 초과",
    },
]);

/// Reduced rates for a single-household single home.
pub const PROPERTY_SINGLE_HOUSEHOLD: BracketTable = BracketTable::new(&[
    Bracket {
        upper_limit: Some(dec!(60_000_000)),
        rate: dec!(0.0005),
        subtracted_amount: dec!(0),
        label: "6천만원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(150_000_000)),
        rate: dec!(0.001),
        subtracted_amount: dec!(30_000),
        label: "1억 5천만원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(300_000_000)),
        rate: dec!(0.002),
        subtracted_amount: dec!(180_000),
        label: "3억원 이하",
    },
    Bracket {
        upper_limit: None,
        rate: dec!(0.0035),
        subtracted_amount: dec!(630_000),
        label: "3억원 초과",
    },
]);

pub const COMPREHENSIVE_DEDUCTION_SINGLE_HOME: Money = dec!(1_200_000_000);
pub const COMPREHENSIVE_DEDUCTION_GENERAL: Money = dec!(900_000_000);

/// Owners of at most two homes.
pub const COMPREHENSIVE_STANDARD: BracketTable = BracketTable::new(&[
    Bracket {
        upper_limit: Some(dec!(300_000_000)),
        rate: dec!(0.005),
        subtracted_amount: dec!(0),
        label: "3억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(600_000_000)),
        rate: dec!(0.007),
        subtracted_amount: dec!(600_000),
        label: "6억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(1_200_000_000)),
        rate: dec!(0.01),
        subtracted_amount: dec!(2_400_000),
        label: "12억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(2_500_000_000)),
        rate: dec!(0.013),
        subtracted_amount: dec!(6_000_000),
        label: "25억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(5_000_000_000)),
        rate: dec!(0.015),
        subtracted_amount: dec!(11_000_000),
        label: "50억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(9_400_000_000)),
        rate: dec!(0.02),
        subtracted_amount: dec!(36_000_000),
        label: "94억원 이하",
    },
    Bracket {
        upper_limit: None,
        rate: dec!(0.027),
        subtracted_amount: dec!(101_800_000),
        label: "94억원 초과",
    },
]);

/// Owners of three or more homes.
pub const COMPREHENSIVE_MULTI_HOME: BracketTable = BracketTable::new(&[
    Bracket {
        upper_limit: Some(dec!(300_000_000)),
        rate: dec!(0.005),
        subtracted_amount: dec!(0),
        label: "3억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(600_000_000)),
        rate: dec!(0.007),
        subtracted_amount: dec!(600_000),
        label: "6억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(1_200_000_000)),
        rate: dec!(0.01),
        subtracted_amount: dec!(2_400_000),
        label: "12억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(2_500_000_000)),
        rate: dec!(0.02),
        subtracted_amount: dec!(14_400_000),
        label: "25억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(5_000_000_000)),
        rate: dec!(0.03),
        subtracted_amount: dec!(39_400_000),
        label: "50억원 이하",
    },
    Bracket {
        upper_limit: Some(dec!(9_400_000_000)),
        rate: dec!(0.04),
        subtracted_amount: dec!(89_400_000),
        label: "94억원 이하",
    },
    Bracket {
        upper_limit: None,
        rate: dec!(0.05),
        subtracted_amount: dec!(183_400_000),
        label: "94억원 초과",
    },
]);

/// Combined age and holding credit never exceeds this.
pub const MAX_COMBINED_CREDIT: Rate = dec!(0.8);

/// Senior credit for a single-home owner.
pub fn age_credit_rate(age: u32) -> Rate {
    match age {
        70.. => dec!(0.4),
        65..=69 => dec!(0.3),
        60..=64 => dec!(0.2),
        _ => Decimal::ZERO,
    }
}

/// Long-holding credit for a single-home owner.
pub fn holding_credit_rate(holding_years: Decimal) -> Rate {
    if holding_years >= dec!(15) {
        dec!(0.5)
    } else if holding_years >= dec!(10) {
        dec!(0.4)
    } else if holding_years >= dec!(5) {
        dec!(0.2)
    } else {
        Decimal::ZERO
    }
}

/// Fire-safety portion of the regional resource facility tax.
pub const FIRE_SAFETY: StepSchedule = StepSchedule::new(&[
    Step {
        upper_limit: Some(dec!(6_000_000)),
        base: dec!(0),
        floor: dec!(0),
        rate: dec!(0.0004),
    },
    Step {
        upper_limit: Some(dec!(13_000_000)),
        base: dec!(2_400),
        floor: dec!(6_000_000),
        rate: dec!(0.0005),
    },
    Step {
        upper_limit: Some(dec!(26_000_000)),
        base: dec!(5_900),
        floor: dec!(13_000_000),
        rate: dec!(0.0006),
    },
    Step {
        upper_limit: Some(dec!(39_000_000)),
        base: dec!(13_700),
        floor: dec!(26_000_000),
        rate: dec!(0.0008),
    },
    Step {
        upper_limit: Some(dec!(64_000_000)),
        base: dec!(24_100),
        floor: dec!(39_000_000),
        rate: dec!(0.001),
    },
    Step {
        upper_limit: None,
        base: dec!(49_100),
        floor: dec!(64_000_000),
        rate: dec!(0.0012),
    },
]);
