pub mod appraisal;
pub mod auction;
pub mod bond;
pub mod brokerage;
pub mod scrivener;

pub use appraisal::{calculate_appraisal_fee, AppraisalFeeInput, AppraisalFeeOutput};
pub use auction::{
    calculate_auction_cost, calculate_eviction_cost, AuctionCostInput, AuctionCostOutput,
    EvictionCostInput, EvictionCostOutput, EvictionRegion,
};
pub use bond::{calculate_housing_bond, HousingBondInput, HousingBondOutput};
pub use brokerage::{
    calculate_brokerage, BrokerageInput, BrokerageOutput, BrokeragePropertyType, ContractType,
};
pub use scrivener::{
    calculate_attorney_fee, calculate_registration_cost, AttorneyFeeInput, AttorneyFeeOutput,
    AttorneyPropertyType, HousingCount, RegistrationCostInput, RegistrationCostOutput,
    RegistrationPropertyType, RegistrationRegion,
};
pub use crate::tables::fees::{AreaBand, BondRegion};
