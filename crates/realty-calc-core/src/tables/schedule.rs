use rust_decimal::Decimal;

use crate::types::{Money, Rate};

/// Whether a tier's upper limit belongs to that tier (`<=`) or to the next (`<`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Inclusive,
    Exclusive,
}

impl Boundary {
    fn admits(self, value: Decimal, limit: Decimal) -> bool {
        match self {
            Boundary::Inclusive => value <= limit,
            Boundary::Exclusive => value < limit,
        }
    }
}

/// Flat lookup table: the first tier whose limit admits the value wins.
/// `None` marks the open top tier.
#[derive(Debug, Clone, Copy)]
pub struct Tiered<T: 'static> {
    pub tiers: &'static [(Option<Decimal>, T)],
    pub boundary: Boundary,
}

impl<T: 'static> Tiered<T> {
    pub const fn new(tiers: &'static [(Option<Decimal>, T)], boundary: Boundary) -> Self {
        Self { tiers, boundary }
    }

    pub fn lookup(&self, value: Decimal) -> &'static T {
        let tiers = self.tiers;
        let (_, entry) = tiers
            .iter()
            .find(|(limit, _)| match limit {
                Some(limit) => self.boundary.admits(value, *limit),
                None => true,
            })
            .unwrap_or(&tiers[tiers.len() - 1]);
        entry
    }
}

/// One segment of a piecewise-linear fee: `base + (x - floor) x rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub upper_limit: Option<Money>,
    pub base: Money,
    pub floor: Money,
    pub rate: Rate,
}

/// Piecewise-linear schedule with inclusive upper limits.
#[derive(Debug, Clone, Copy)]
pub struct StepSchedule {
    pub steps: &'static [Step],
}

impl StepSchedule {
    pub const fn new(steps: &'static [Step]) -> Self {
        Self { steps }
    }

    /// Unrounded amount for `x`.
    pub fn amount(&self, x: Money) -> Money {
        let steps = self.steps;
        let step = steps
            .iter()
            .find(|s| s.upper_limit.map_or(true, |limit| x <= limit))
            .unwrap_or(&steps[steps.len() - 1]);
        step.base + (x - step.floor) * step.rate
    }
}
