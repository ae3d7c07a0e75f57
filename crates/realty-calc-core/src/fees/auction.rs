//! Cost estimates around a court auction: forced eviction of an occupant
//! and the incidental costs on top of a winning bid.

use serde::{Deserialize, Serialize};

use crate::numeric::round_to_won;
use crate::tables::fees::{
    AUCTION_ACQUISITION_TAX_RATE, AUCTION_EVICTION_ALLOWANCE, AUCTION_LAWYER_FEE,
    AUCTION_MOVING_ALLOWANCE, AUCTION_REPAIR_RATE, EVICTION_APPLICATION_FEE,
    EVICTION_DELIVERY_FEE, EVICTION_EXECUTION_COST, EVICTION_EXECUTOR_FEE, EVICTION_STORAGE_FEE,
};
use crate::types::{with_metadata, Area, ComputationOutput, Money};
use crate::validation::require_positive;
use crate::CalcResult;

// ---------------------------------------------------------------------------
// Eviction
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EvictionRegion {
    #[serde(rename = "서울")]
    Seoul,
    #[serde(rename = "경기")]
    Gyeonggi,
    #[serde(rename = "기타")]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvictionCostInput {
    pub area: Area,
    /// Accepted for the record; court fees do not vary by region.
    pub region: EvictionRegion,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvictionCostOutput {
    pub application_fee: Money,
    pub delivery_fee: Money,
    pub executor_fee: Money,
    pub execution_cost: Money,
    pub storage_fee: Money,
    pub total_cost: Money,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_eviction_cost(
    input: &EvictionCostInput,
) -> CalcResult<ComputationOutput<EvictionCostOutput>> {
    require_positive("area", input.area, "부동산 면적은 0보다 커야 합니다.")?;

    let execution_cost = *EVICTION_EXECUTION_COST.lookup(input.area);
    let total_cost = EVICTION_APPLICATION_FEE
        + EVICTION_DELIVERY_FEE
        + EVICTION_EXECUTOR_FEE
        + execution_cost
        + EVICTION_STORAGE_FEE;

    let output = EvictionCostOutput {
        application_fee: EVICTION_APPLICATION_FEE,
        delivery_fee: EVICTION_DELIVERY_FEE,
        executor_fee: EVICTION_EXECUTOR_FEE,
        execution_cost,
        storage_fee: EVICTION_STORAGE_FEE,
        total_cost,
    };

    Ok(with_metadata(
        "Forced eviction: court fees plus execution cost by floor area",
        &serde_json::json!({ "region": input.region }),
        Vec::new(),
        output,
    ))
}

// ---------------------------------------------------------------------------
// Auction incidentals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionCostInput {
    pub bid_price: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuctionCostOutput {
    pub acquisition_tax: Money,
    pub eviction_cost: Money,
    pub moving_cost: Money,
    pub repair_cost: Money,
    pub lawyer_fee: Money,
    pub total_incidental_cost: Money,
    pub total_investment: Money,
}

#[tracing::instrument(level = "debug", skip_all)]
pub fn calculate_auction_cost(
    input: &AuctionCostInput,
) -> CalcResult<ComputationOutput<AuctionCostOutput>> {
    require_positive("bid_price", input.bid_price, "매각대금은 0보다 커야 합니다.")?;

    let acquisition_tax = round_to_won(input.bid_price * AUCTION_ACQUISITION_TAX_RATE);
    let repair_cost = round_to_won(input.bid_price * AUCTION_REPAIR_RATE);
    let total_incidental_cost = acquisition_tax
        + AUCTION_EVICTION_ALLOWANCE
        + AUCTION_MOVING_ALLOWANCE
        + repair_cost
        + AUCTION_LAWYER_FEE;

    let output = AuctionCostOutput {
        acquisition_tax,
        eviction_cost: AUCTION_EVICTION_ALLOWANCE,
        moving_cost: AUCTION_MOVING_ALLOWANCE,
        repair_cost,
        lawyer_fee: AUCTION_LAWYER_FEE,
        total_incidental_cost,
        total_investment: input.bid_price + total_incidental_cost,
    };

    Ok(with_metadata(
        "Auction bid plus flat incidental allowances",
        &serde_json::json!({
            "acquisition_tax_rate": AUCTION_ACQUISITION_TAX_RATE.to_string(),
            "repair_rate": AUCTION_REPAIR_RATE.to_string(),
        }),
        Vec::new(),
        output,
    ))
}
