//! Fee schedules: brokerage commissions, judicial-scrivener and appraisal
//! fees, revenue and stamp duty, housing bonds, eviction costs and the
//! flat assumptions of the auction cost estimate.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::schedule::{Boundary, Step, StepSchedule, Tiered};
use crate::types::{Money, Percent, Rate};

// ---------------------------------------------------------------------------
// Brokerage
// ---------------------------------------------------------------------------

/// Statutory commission ceiling: percent of the effective amount, with an
/// optional won cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommissionRate {
    pub percent: Percent,
    pub cap: Option<Money>,
}

const fn rate(percent: Percent, cap: Option<Money>) -> CommissionRate {
    CommissionRate { percent, cap }
}

pub const HOUSING_SALE: Tiered<CommissionRate> = Tiered::new(
    &[
        (Some(dec!(50_000_000)), rate(dec!(0.6), Some(dec!(250_000)))),
        (Some(dec!(200_000_000)), rate(dec!(0.5), Some(dec!(800_000)))),
        (Some(dec!(900_000_000)), rate(dec!(0.4), None)),
        (Some(dec!(1_200_000_000)), rate(dec!(0.5), None)),
        (Some(dec!(1_500_000_000)), rate(dec!(0.6), None)),
        (None, rate(dec!(0.7), None)),
    ],
    Boundary::Exclusive,
);

pub const HOUSING_LEASE: Tiered<CommissionRate> = Tiered::new(
    &[
        (Some(dec!(50_000_000)), rate(dec!(0.5), Some(dec!(200_000)))),
        (Some(dec!(100_000_000)), rate(dec!(0.4), Some(dec!(300_000)))),
        (Some(dec!(600_000_000)), rate(dec!(0.3), None)),
        (Some(dec!(1_200_000_000)), rate(dec!(0.4), None)),
        (Some(dec!(1_500_000_000)), rate(dec!(0.5), None)),
        (None, rate(dec!(0.6), None)),
    ],
    Boundary::Exclusive,
);

pub const OFFICETEL_SALE: CommissionRate = rate(dec!(0.5), None);
pub const OFFICETEL_LEASE: CommissionRate = rate(dec!(0.4), None);
pub const OTHER_PROPERTY: CommissionRate = rate(dec!(0.9), None);

/// Monthly-rent deals are priced as deposit + rent x 100, or x 70 when the
/// x 100 figure is below the threshold.
pub const MONTHLY_RENT_MULTIPLIER: u32 = 100;
pub const MONTHLY_RENT_SMALL_MULTIPLIER: u32 = 70;
pub const MONTHLY_RENT_SMALL_THRESHOLD: Money = dec!(50_000_000);

pub const VAT_RATE: Rate = dec!(0.1);

// ---------------------------------------------------------------------------
// Judicial scrivener (registration attorney)
// ---------------------------------------------------------------------------

pub const ATTORNEY_BASE_FEE: StepSchedule = StepSchedule::new(&[
    Step {
        upper_limit: Some(dec!(10_000_000)),
        base: dec!(60_000),
        floor: dec!(0),
        rate: dec!(0),
    },
    Step {
        upper_limit: Some(dec!(50_000_000)),
        base: dec!(60_000),
        floor: dec!(10_000_000),
        rate: dec!(0.0012),
    },
    Step {
        upper_limit: Some(dec!(100_000_000)),
        base: dec!(108_000),
        floor: dec!(50_000_000),
        rate: dec!(0.0009),
    },
    Step {
        upper_limit: Some(dec!(300_000_000)),
        base: dec!(153_000),
        floor: dec!(100_000_000),
        rate: dec!(0.0006),
    },
    Step {
        upper_limit: Some(dec!(500_000_000)),
        base: dec!(273_000),
        floor: dec!(300_000_000),
        rate: dec!(0.0005),
    },
    Step {
        upper_limit: Some(dec!(1_000_000_000)),
        base: dec!(373_000),
        floor: dec!(500_000_000),
        rate: dec!(0.0004),
    },
    Step {
        upper_limit: None,
        base: dec!(573_000),
        floor: dec!(1_000_000_000),
        rate: dec!(0.0002),
    },
]);

/// Revenue seal on a registration, by property price.
pub const REVENUE_SEAL: Tiered<Money> = Tiered::new(
    &[
        (Some(dec!(10_000_000)), dec!(0)),
        (Some(dec!(30_000_000)), dec!(20_000)),
        (Some(dec!(50_000_000)), dec!(40_000)),
        (Some(dec!(100_000_000)), dec!(70_000)),
        (Some(dec!(1_000_000_000)), dec!(150_000)),
        (None, dec!(350_000)),
    ],
    Boundary::Exclusive,
);

/// Stamp duty on a contract. Same amounts as the revenue seal, but a
/// threshold amount stays in the lower tier.
pub const STAMP_DUTY: Tiered<Money> = Tiered::new(
    &[
        (Some(dec!(10_000_000)), dec!(0)),
        (Some(dec!(30_000_000)), dec!(20_000)),
        (Some(dec!(50_000_000)), dec!(40_000)),
        (Some(dec!(100_000_000)), dec!(70_000)),
        (Some(dec!(1_000_000_000)), dec!(150_000)),
        (None, dec!(350_000)),
    ],
    Boundary::Inclusive,
);

pub const REGISTRATION_SEAL: Money = dec!(15_000);
pub const ATTORNEY_MISC_COSTS: Money = dec!(100_000);

// ---------------------------------------------------------------------------
// Appraisal
// ---------------------------------------------------------------------------

pub const APPRAISAL_BASE_FEE: StepSchedule = StepSchedule::new(&[
    Step {
        upper_limit: Some(dec!(5_000_000)),
        base: dec!(110_000),
        floor: dec!(0),
        rate: dec!(0),
    },
    Step {
        upper_limit: Some(dec!(20_000_000)),
        base: dec!(110_000),
        floor: dec!(5_000_000),
        rate: dec!(0.0033),
    },
    Step {
        upper_limit: Some(dec!(50_000_000)),
        base: dec!(159_500),
        floor: dec!(20_000_000),
        rate: dec!(0.0025),
    },
    Step {
        upper_limit: Some(dec!(100_000_000)),
        base: dec!(234_500),
        floor: dec!(50_000_000),
        rate: dec!(0.0021),
    },
    Step {
        upper_limit: Some(dec!(200_000_000)),
        base: dec!(339_500),
        floor: dec!(100_000_000),
        rate: dec!(0.0017),
    },
    Step {
        upper_limit: Some(dec!(500_000_000)),
        base: dec!(509_500),
        floor: dec!(200_000_000),
        rate: dec!(0.0011),
    },
    Step {
        upper_limit: Some(dec!(1_000_000_000)),
        base: dec!(839_500),
        floor: dec!(500_000_000),
        rate: dec!(0.0009),
    },
    Step {
        upper_limit: Some(dec!(5_000_000_000)),
        base: dec!(1_289_500),
        floor: dec!(1_000_000_000),
        rate: dec!(0.0006),
    },
    Step {
        upper_limit: Some(dec!(10_000_000_000)),
        base: dec!(3_689_500),
        floor: dec!(5_000_000_000),
        rate: dec!(0.0005),
    },
    Step {
        upper_limit: None,
        base: dec!(6_189_500),
        floor: dec!(10_000_000_000),
        rate: dec!(0.0004),
    },
]);

// ---------------------------------------------------------------------------
// Housing bonds
// ---------------------------------------------------------------------------

/// Share of the bond face value lost when it is sold back immediately.
pub const BOND_DISCOUNT_RATE: Rate = dec!(0.06);

/// Registration-cost bond rates, keyed by price in 만원.
pub const SEOUL_BOND_RATE: Tiered<Rate> = Tiered::new(
    &[
        (Some(dec!(5_000)), dec!(0.013)),
        (Some(dec!(10_000)), dec!(0.017)),
        (Some(dec!(16_000)), dec!(0.021)),
        (Some(dec!(26_000)), dec!(0.025)),
        (Some(dec!(60_000)), dec!(0.031)),
        (None, dec!(0.035)),
    ],
    Boundary::Inclusive,
);

pub const OTHER_BOND_RATE: Tiered<Rate> = Tiered::new(
    &[
        (Some(dec!(5_000)), dec!(0.01)),
        (Some(dec!(10_000)), dec!(0.014)),
        (Some(dec!(16_000)), dec!(0.018)),
        (Some(dec!(26_000)), dec!(0.022)),
        (Some(dec!(60_000)), dec!(0.028)),
        (None, dec!(0.032)),
    ],
    Boundary::Inclusive,
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BondRegion {
    #[serde(rename = "서울")]
    Seoul,
    #[serde(rename = "광역시")]
    Metropolitan,
    #[serde(rename = "시지역")]
    City,
    #[serde(rename = "기타")]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AreaBand {
    #[serde(rename = "60㎡이하")]
    Small,
    #[serde(rename = "60~85㎡")]
    Medium,
    #[serde(rename = "85㎡초과")]
    Large,
}

/// Bond purchase rate in per mille of the sale price.
pub fn bond_per_mille(region: BondRegion, band: AreaBand) -> u32 {
    use AreaBand::*;
    use BondRegion::*;
    match (region, band) {
        (Seoul, Small) => 13,
        (Seoul, Medium) => 21,
        (Seoul, Large) => 31,
        (Metropolitan, Small) => 8,
        (Metropolitan, Medium) => 16,
        (Metropolitan, Large) => 24,
        (City, Small) => 6,
        (City, Medium) => 13,
        (City, Large) => 21,
        (Other, Small) => 5,
        (Other, Medium) => 10,
        (Other, Large) => 16,
    }
}

// ---------------------------------------------------------------------------
// Eviction and auction
// ---------------------------------------------------------------------------

pub const EVICTION_APPLICATION_FEE: Money = dec!(3_000);
pub const EVICTION_DELIVERY_FEE: Money = dec!(44_800);
pub const EVICTION_EXECUTOR_FEE: Money = dec!(40_000);
pub const EVICTION_STORAGE_FEE: Money = dec!(200_000);

/// Labour cost of the forced execution, by floor area in m2.
pub const EVICTION_EXECUTION_COST: Tiered<Money> = Tiered::new(
    &[
        (Some(dec!(33)), dec!(500_000)),
        (Some(dec!(66)), dec!(800_000)),
        (Some(dec!(99)), dec!(1_200_000)),
        (Some(dec!(132)), dec!(1_500_000)),
        (None, dec!(2_000_000)),
    ],
    Boundary::Inclusive,
);

pub const AUCTION_ACQUISITION_TAX_RATE: Rate = dec!(0.046);
pub const AUCTION_EVICTION_ALLOWANCE: Money = dec!(2_000_000);
pub const AUCTION_MOVING_ALLOWANCE: Money = dec!(500_000);
pub const AUCTION_REPAIR_RATE: Rate = dec!(0.03);
pub const AUCTION_LAWYER_FEE: Money = dec!(500_000);

/// Flat fee quoted for a scrivener-handled registration.
pub const REGISTRATION_ATTORNEY_FEE: Money = dec!(500_000);
