use clap::Args;
use rust_decimal::Decimal;

use realty_calc_core::fees::{
    calculate_brokerage, BrokerageInput, BrokeragePropertyType, ContractType,
};

use super::{parse_enum, CommandResult};
use crate::input::{self, InputArgs};

/// Arguments for the brokerage commission
#[derive(Args)]
pub struct BrokerageArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// 매매, 전세 or 월세
    #[arg(long, default_value = "매매")]
    pub contract: String,

    /// 주택, 오피스텔 or 그외
    #[arg(long, default_value = "주택")]
    pub property_type: String,

    /// Sale price, or the deposit for leases, in won
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Monthly rent in won (월세 only)
    #[arg(long)]
    pub monthly_rent: Option<Decimal>,
}

pub fn run_brokerage(args: BrokerageArgs) -> CommandResult {
    let brokerage_input: BrokerageInput = match input::load(&args.source)? {
        Some(input) => input,
        None => {
            let contract_type: ContractType = parse_enum("contract", &args.contract)?;
            let property_type: BrokeragePropertyType =
                parse_enum("property-type", &args.property_type)?;
            BrokerageInput {
                contract_type,
                property_type,
                transaction_amount: args
                    .amount
                    .ok_or("--amount is required (or provide --input)")?,
                monthly_rent: args.monthly_rent,
            }
        }
    };

    let result = calculate_brokerage(&brokerage_input)?;
    Ok(serde_json::to_value(result)?)
}
