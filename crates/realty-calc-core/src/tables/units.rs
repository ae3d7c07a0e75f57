use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Area, Money};

/// Square metres per pyeong.
pub const SQM_PER_PYEONG: Area = dec!(3.305785);
/// Pyeong per m2 on building and land ledgers. Not the exact inverse of
/// [`SQM_PER_PYEONG`].
pub const PYEONG_PER_SQM: Area = dec!(0.3025);
pub const SQM_PER_SQFT: Area = dec!(0.09290304);
pub const SQM_PER_ACRE: Area = dec!(4046.86);

/// Won in one 만원, the unit some price inputs are quoted in.
pub const WON_PER_MANWON: Money = dec!(10_000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaUnit {
    Pyeong,
    Sqm,
    Sqft,
    Acre,
}

impl AreaUnit {
    pub fn sqm_factor(self) -> Area {
        match self {
            AreaUnit::Pyeong => SQM_PER_PYEONG,
            AreaUnit::Sqm => dec!(1),
            AreaUnit::Sqft => SQM_PER_SQFT,
            AreaUnit::Acre => SQM_PER_ACRE,
        }
    }
}
