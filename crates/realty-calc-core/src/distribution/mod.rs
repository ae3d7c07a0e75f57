pub mod inheritance;
pub mod waterfall;

pub use inheritance::{
    calculate_inheritance_share, HeirShare, InheritanceShareInput, InheritanceShareOutput,
};
pub use waterfall::{
    calculate_auction_distribution, waterfall, AuctionDistributionInput,
    AuctionDistributionOutput, ClaimPriority, DistributionItem,
};
