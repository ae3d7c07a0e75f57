use clap::Args;
use rust_decimal::Decimal;

use realty_calc_core::loan::{calculate_loan_repayment, LoanRepaymentInput, RepaymentMethod};

use super::{parse_enum, CommandResult};
use crate::input::{self, InputArgs};

/// Arguments for the amortization schedule
#[derive(Args)]
pub struct LoanRepaymentArgs {
    #[command(flatten)]
    pub source: InputArgs,

    /// Loan amount in won
    #[arg(long)]
    pub amount: Option<Decimal>,

    /// Annual interest rate in percent (4.5 = 4.5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// equal-principal-interest, equal-principal or bullet (Korean names accepted)
    #[arg(long, default_value = "equal-principal-interest")]
    pub method: String,
}

pub fn run_loan_repayment(args: LoanRepaymentArgs) -> CommandResult {
    let loan_input: LoanRepaymentInput = match input::load(&args.source)? {
        Some(input) => input,
        None => {
            let method: RepaymentMethod = parse_enum("method", &args.method)?;
            LoanRepaymentInput {
                loan_amount: args
                    .amount
                    .ok_or("--amount is required (or provide --input)")?,
                annual_rate: args.rate.ok_or("--rate is required (or provide --input)")?,
                loan_term_years: args.years.ok_or("--years is required (or provide --input)")?,
                repayment_method: method,
            }
        }
    };

    let result = calculate_loan_repayment(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
