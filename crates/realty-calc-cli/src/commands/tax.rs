use clap::Args;
use rust_decimal::Decimal;

use realty_calc_core::tax::{calculate_acquisition_tax, AcquisitionTaxInput};

use super::CommandResult;
use crate::input::{self, InputArgs};

/// Arguments for the acquisition tax
#[derive(Args)]
pub struct AcquisitionTaxArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Purchase price in won
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Homes held after this purchase (3 means three or more)
    #[arg(long, default_value_t = 1)]
    pub housing_count: u32,

    /// The property lies in a regulated area
    #[arg(long)]
    pub regulated: bool,

    /// Apply the first-time buyer discount
    #[arg(long)]
    pub first_time_buyer: bool,
}

pub fn run_acquisition_tax(args: AcquisitionTaxArgs) -> CommandResult {
    let acquisition_input: AcquisitionTaxInput = match input::load(&args.source)? {
        Some(input) => input,
        None => AcquisitionTaxInput {
            purchase_price: args
                .price
                .ok_or("--price is required (or provide --input)")?,
            housing_count: args.housing_count,
            is_regulated: args.regulated,
            is_first_time_buyer: args.first_time_buyer,
        },
    };

    let result = calculate_acquisition_tax(&acquisition_input)?;
    Ok(serde_json::to_value(result)?)
}
