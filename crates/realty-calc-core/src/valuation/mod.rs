pub mod area;
pub mod building;
pub mod dates;
pub mod rental_yield;
pub mod savings;

pub use area::{
    calculate_area_convert, calculate_building_ratio, calculate_land_share, calculate_unit_price,
    AreaConvertInput, AreaConvertOutput, BuildingRatioInput, BuildingRatioOutput, LandShareInput,
    LandShareOutput, UnitPriceInput, UnitPriceOutput,
};
pub use building::{
    calculate_building_price, calculate_building_vat, calculate_reconstruction,
    calculate_remaining_value, BuildingPriceInput, BuildingPriceOutput, BuildingVatInput,
    BuildingVatOutput, ReconstructionInput, ReconstructionOutput, RemainingValueInput,
    RemainingValueOutput,
};
pub use dates::{calculate_date_diff, parse_calendar_date, DateCalcInput, DateCalcOutput};
pub use rental_yield::{calculate_rental_yield, RentalYieldInput, RentalYieldOutput};
pub use savings::{
    calculate_savings_interest, InterestTaxType, InterestType, SavingsInterestInput,
    SavingsInterestOutput,
};
pub use crate::tables::building::{DepreciationStructure, ReconstructionStructure};
pub use crate::tables::units::AreaUnit;
