use clap::{Args, ValueEnum};
use rust_decimal::Decimal;

use realty_calc_core::rent::{
    convert_jeonse_to_monthly, convert_monthly_to_jeonse, RentConvertInput,
};

use super::CommandResult;
use crate::input::{self, InputArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Direction {
    /// Jeonse deposit to monthly rent
    ToMonthly,
    /// Monthly rent to a jeonse equivalent
    ToJeonse,
}

/// Arguments for jeonse / monthly-rent conversion
#[derive(Args)]
pub struct RentConvertArgs {
    #[command(flatten)]
    pub source: InputArgs,

    #[arg(long, value_enum, default_value = "to-monthly")]
    pub direction: Direction,

    /// Jeonse deposit in won (to-monthly)
    #[arg(long)]
    pub jeonse: Option<Decimal>,

    /// Deposit kept under the monthly lease, in won
    #[arg(long, default_value_t = Decimal::ZERO)]
    pub deposit: Decimal,

    /// Monthly rent in won (to-jeonse)
    #[arg(long)]
    pub rent: Option<Decimal>,

    /// Annual conversion rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,
}

pub fn run_rent_convert(args: RentConvertArgs) -> CommandResult {
    let convert_input: RentConvertInput = match input::load(&args.source)? {
        Some(input) => input,
        None => RentConvertInput {
            jeonse_deposit: args.jeonse,
            monthly_deposit: args.deposit,
            monthly_rent: args.rent,
            conversion_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
        },
    };

    let result = match args.direction {
        Direction::ToMonthly => convert_jeonse_to_monthly(&convert_input)?,
        Direction::ToJeonse => convert_monthly_to_jeonse(&convert_input)?,
    };
    Ok(serde_json::to_value(result)?)
}
