//! Lending regulation matrices: LTV by borrower and region, auction-loan
//! LTV by lender tier, DSR tiers and stress add-ons, RTI thresholds and
//! income reference tables.
//!
//! Every matrix is an exhaustive `match`, so adding a variant forces every
//! cell to be filled in.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Percent, Rate};

// ---------------------------------------------------------------------------
// Mortgage LTV
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BorrowerType {
    #[serde(rename = "생애최초")]
    FirstTimeBuyer,
    #[serde(rename = "무주택자")]
    Homeless,
    #[serde(rename = "1주택자")]
    OneHome,
    #[serde(rename = "다주택자")]
    MultiHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LtvRegion {
    #[serde(rename = "투기지역")]
    Speculation,
    #[serde(rename = "조정지역")]
    Adjusted,
    #[serde(rename = "수도권")]
    Capital,
    #[serde(rename = "비수도권")]
    NonCapital,
}

pub fn ltv_rate(borrower: BorrowerType, region: LtvRegion) -> Rate {
    use BorrowerType::*;
    use LtvRegion::*;
    match (borrower, region) {
        (FirstTimeBuyer, Speculation | Adjusted | Capital) => dec!(0.7),
        (FirstTimeBuyer, NonCapital) => dec!(0.8),
        (Homeless, Speculation) => dec!(0.4),
        (Homeless, Adjusted) => dec!(0.5),
        (Homeless, Capital | NonCapital) => dec!(0.7),
        (OneHome, Speculation) => dec!(0.4),
        (OneHome, Adjusted) => dec!(0.5),
        (OneHome, Capital | NonCapital) => dec!(0.6),
        (MultiHome, Speculation | Adjusted | Capital) => Decimal::ZERO,
        (MultiHome, NonCapital) => dec!(0.6),
    }
}

/// Flat DSR cap used by the quick maximum-loan estimate.
pub const QUICK_DSR_RATE: Rate = dec!(0.4);

// ---------------------------------------------------------------------------
// Auction (court sale) loans
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuctionBorrower {
    #[serde(rename = "무주택자")]
    Homeless,
    #[serde(rename = "1주택자")]
    OneHome,
    #[serde(rename = "다주택자")]
    MultiHome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetroArea {
    #[serde(rename = "수도권")]
    Capital,
    #[serde(rename = "비수도권")]
    NonCapital,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LenderTier {
    #[serde(rename = "1금융권")]
    Bank,
    #[serde(rename = "2금융권")]
    NonBank,
}

pub fn auction_ltv_rate(tier: LenderTier, borrower: AuctionBorrower, area: MetroArea) -> Rate {
    use AuctionBorrower::*;
    use LenderTier::*;
    use MetroArea::*;
    match (tier, borrower, area) {
        (Bank, Homeless, _) => dec!(0.7),
        (Bank, OneHome, _) => dec!(0.6),
        (Bank, MultiHome, _) => Decimal::ZERO,
        (NonBank, Homeless, Capital) => dec!(0.8),
        (NonBank, Homeless, NonCapital) => dec!(0.85),
        (NonBank, OneHome, Capital) => dec!(0.7),
        (NonBank, OneHome, NonCapital) => dec!(0.75),
        (NonBank, MultiHome, _) => dec!(0.6),
    }
}

// ---------------------------------------------------------------------------
// Regulatory limit (LTV + stress DSR)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StressRegion {
    Capital,
    NonCapital,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FinancialInstitution {
    First,
    Second,
}

pub const REGULATORY_LTV_FIRST_TIME: Rate = dec!(0.8);
pub const REGULATORY_LTV_GENERAL: Rate = dec!(0.7);

pub fn dsr_limit(institution: FinancialInstitution) -> Rate {
    match institution {
        FinancialInstitution::First => dec!(0.4),
        FinancialInstitution::Second => dec!(0.5),
    }
}

/// Stress add-on to the contract rate, as a fraction.
pub fn stress_add_on(region: StressRegion) -> Rate {
    match region {
        StressRegion::Capital => dec!(0.015),
        StressRegion::NonCapital => dec!(0.0075),
    }
}

// ---------------------------------------------------------------------------
// RTI
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RentalPropertyKind {
    #[serde(rename = "주거용")]
    Residential,
    #[serde(rename = "비주거용")]
    NonResidential,
}

pub fn required_rti(kind: RentalPropertyKind) -> Decimal {
    match kind {
        RentalPropertyKind::Residential => dec!(1.25),
        RentalPropertyKind::NonResidential => dec!(1.5),
    }
}

// ---------------------------------------------------------------------------
// Income reference data
// ---------------------------------------------------------------------------

/// Recognised loan terms for projected-income screening.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum ProjectionTerm {
    Ten,
    Fifteen,
    Twenty,
    Thirty,
}

impl TryFrom<u32> for ProjectionTerm {
    type Error = String;

    fn try_from(years: u32) -> Result<Self, Self::Error> {
        match years {
            10 => Ok(ProjectionTerm::Ten),
            15 => Ok(ProjectionTerm::Fifteen),
            20 => Ok(ProjectionTerm::Twenty),
            30 => Ok(ProjectionTerm::Thirty),
            other => Err(format!("대출기간은 10, 15, 20, 30년 중 하나여야 합니다: {other}")),
        }
    }
}

impl From<ProjectionTerm> for u32 {
    fn from(term: ProjectionTerm) -> Self {
        match term {
            ProjectionTerm::Ten => 10,
            ProjectionTerm::Fifteen => 15,
            ProjectionTerm::Twenty => 20,
            ProjectionTerm::Thirty => 30,
        }
    }
}

/// Expected income growth (percent) over the loan term for young borrowers.
/// Ages 35 and above get no uplift.
pub fn income_growth_percent(age: u32, term: ProjectionTerm) -> Percent {
    use ProjectionTerm::*;
    match (age, term) {
        (20..=24, Ten) => dec!(20.6),
        (20..=24, Fifteen) => dec!(31.1),
        (20..=24, Twenty) => dec!(39.7),
        (20..=24, Thirty) => dec!(50.7),
        (25..=29, Ten) => dec!(16.8),
        (25..=29, Fifteen) => dec!(23.5),
        (25..=29, Twenty) => dec!(28.4),
        (25..=29, Thirty) => dec!(31.6),
        (30..=34, Ten) => dec!(13.0),
        (30..=34, Fifteen) => dec!(16.6),
        (30..=34, Twenty) => dec!(18.4),
        (30..=34, Thirty) => dec!(13.5),
        _ => Decimal::ZERO,
    }
}

/// Average wage by age band, in 만원.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AverageIncome {
    pub age_band: &'static str,
    pub monthly: Decimal,
    pub yearly: Decimal,
}

pub const AVERAGE_INCOME_BY_AGE: [AverageIncome; 4] = [
    AverageIncome {
        age_band: "20-24",
        monthly: dec!(253.6),
        yearly: dec!(3043.2),
    },
    AverageIncome {
        age_band: "25-29",
        monthly: dec!(307.2),
        yearly: dec!(3686.4),
    },
    AverageIncome {
        age_band: "30-34",
        monthly: dec!(357.1),
        yearly: dec!(4285.2),
    },
    AverageIncome {
        age_band: "35-39",
        monthly: dec!(412.3),
        yearly: dec!(4947.6),
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeProof {
    #[serde(rename = "국민연금")]
    NationalPension,
    #[serde(rename = "건강보험")]
    HealthInsurance,
}

/// Contribution rate used to back out income from a monthly premium.
pub fn contribution_rate(proof: IncomeProof) -> Rate {
    match proof {
        IncomeProof::NationalPension => dec!(0.045),
        IncomeProof::HealthInsurance => dec!(0.0709),
    }
}

impl IncomeProof {
    pub fn label(self) -> &'static str {
        match self {
            IncomeProof::NationalPension => "국민연금",
            IncomeProof::HealthInsurance => "건강보험",
        }
    }
}

/// Longest term the amortization schedule accepts.
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// [`MAX_LOAN_TERM_YEARS`] in months, for the income-ratio screens.
pub const MAX_LOAN_TERM_MONTHS: u32 = MAX_LOAN_TERM_YEARS * 12;
