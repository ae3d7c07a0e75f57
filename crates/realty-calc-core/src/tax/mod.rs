//! Korean real-estate taxes: acquisition, holding, transfer, income and
//! wealth-transfer.

pub mod acquisition;
pub mod comprehensive;
pub mod holding;
pub mod income;
pub mod local;
pub mod property;
pub mod rental;
pub mod transfer;
pub mod wealth_transfer;

pub use acquisition::{
    acquisition_tax_rate, calculate_acquisition_tax, AcquisitionTaxInput, AcquisitionTaxOutput,
};
pub use comprehensive::{calculate_comprehensive_tax, ComprehensiveTaxInput, ComprehensiveTaxOutput};
pub use holding::{calculate_holding_tax, HoldingTaxInput, HoldingTaxOutput};
pub use income::{
    calculate_income_tax, calculate_progressive_tax, BracketLine, IncomeTaxInput, IncomeTaxOutput,
    ProgressiveTaxInput, ProgressiveTaxOutput,
};
pub use local::{
    calculate_regional_tax, calculate_stamp_tax, BuildingKind, RegionalTaxInput, RegionalTaxOutput,
    StampTaxInput, StampTaxOutput,
};
pub use property::{calculate_property_tax, PropertyTaxInput, PropertyTaxOutput};
pub use rental::{
    calculate_deemed_rental, calculate_good_landlord, calculate_rental_income_tax,
    DeemedRentalInput, DeemedRentalOutput, DepositPropertyType, GoodLandlordInput,
    GoodLandlordOutput, RentalIncomeTaxInput, RentalIncomeTaxOutput,
};
pub use transfer::{calculate_transfer_tax, TransferTaxInput, TransferTaxOutput};
pub use wealth_transfer::{
    calculate_gift_tax, calculate_inheritance_tax, DonorRelation, GiftTaxInput, GiftTaxOutput,
    InheritanceTaxInput, InheritanceTaxOutput,
};
