mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use realty_calc_core::{distribution, fees, investment, loan, rent, tax, valuation, CalcError};

use commands::fees::BrokerageArgs;
use commands::loan::LoanRepaymentArgs;
use commands::regions::RegionsArgs;
use commands::rent::RentConvertArgs;
use commands::run;
use commands::tax::AcquisitionTaxArgs;
use input::InputArgs;

/// Korean real-estate tax, loan, rent and fee calculations
#[derive(Parser)]
#[command(
    name = "rcalc",
    version,
    about = "Korean real-estate tax, loan, rent and fee calculations",
    long_about = "A CLI over the real-estate calculators, with decimal precision. \
                  Every calculator reads JSON from --input or stdin; .yaml and .yml \
                  input files are accepted too. The most common calculators also \
                  take their fields as flags."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log calculator spans to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    // -- tax --
    /// Acquisition tax with local education and rural special taxes
    AcquisitionTax(AcquisitionTaxArgs),
    /// Capital gains tax on a property transfer
    TransferTax(InputArgs),
    /// Property tax on the published price
    PropertyTax(InputArgs),
    /// Comprehensive real-estate holding tax
    ComprehensiveTax(InputArgs),
    /// Yearly holding tax on one home: property plus comprehensive tax
    HoldingTax(InputArgs),
    /// Inheritance tax
    InheritanceTax(InputArgs),
    /// Gift tax by donor relation
    GiftTax(InputArgs),
    /// Comprehensive income tax
    IncomeTax(InputArgs),
    /// Progressive income tax with a per-bracket breakdown
    ProgressiveTax(InputArgs),
    /// Regional resource facility (fire safety) tax on buildings
    RegionalTax(InputArgs),
    /// Stamp tax on a contract amount
    StampTax(InputArgs),
    /// Separate taxation of residential rental income
    RentalIncomeTax(InputArgs),
    /// Deemed rent on lease deposits
    DeemedRental(InputArgs),
    /// Good-landlord rent-reduction credit
    GoodLandlord(InputArgs),

    // -- loan --
    /// Monthly amortization schedule
    LoanRepayment(LoanRepaymentArgs),
    /// LTV ceiling by borrower type and region
    Ltv(InputArgs),
    /// Debt-to-income ratio
    Dti(InputArgs),
    /// Debt-service ratio with a stress rate
    Dsr(InputArgs),
    /// Rent-to-interest ratio for rental business loans
    Rti(InputArgs),
    /// Binding loan limit of LTV and DSR
    MaxLoan(InputArgs),
    /// LTV and stressed-DSR limits for a mortgage application
    RegulatoryLimit(InputArgs),
    /// Auction loan by lender tier
    ForeclosureLoan(InputArgs),
    /// Early repayment fee
    EarlyRepayment(InputArgs),
    /// Overdue interest
    OverdueInterest(InputArgs),
    /// Income projected to the end of the loan term
    FutureIncome(InputArgs),
    /// Income implied by a pension or health-insurance premium
    EstimatedIncome(InputArgs),

    // -- rent --
    /// Jeonse / monthly-rent conversion
    RentConvert(RentConvertArgs),
    /// Rent after a deposit change
    DepositToRent(InputArgs),
    /// Deposit after a rent change
    RentToDeposit(InputArgs),
    /// Renewal increase under the 5% cap
    RentIncrease(InputArgs),

    // -- fees --
    /// Brokerage commission
    Brokerage(BrokerageArgs),
    /// Judicial scrivener fee
    AttorneyFee(InputArgs),
    /// Registration cost quote: taxes, bond and scrivener fee
    RegistrationCost(InputArgs),
    /// Appraisal fee
    AppraisalFee(InputArgs),
    /// Housing bond purchase and discount cost
    HousingBond(InputArgs),
    /// Eviction execution cost by area
    EvictionCost(InputArgs),
    /// Incidental costs of an auction purchase
    AuctionCost(InputArgs),

    // -- distribution --
    /// Priority distribution of auction proceeds
    AuctionDistribution(InputArgs),
    /// Statutory inheritance shares
    InheritanceShare(InputArgs),

    // -- valuation --
    /// Area unit conversion
    AreaConvert(InputArgs),
    /// Price per pyeong and per square metre
    UnitPrice(InputArgs),
    /// Land share of a unit
    LandShare(InputArgs),
    /// Building coverage and floor-area ratios
    BuildingRatio(InputArgs),
    /// Standard building price
    BuildingPrice(InputArgs),
    /// VAT on the building portion of a sale
    BuildingVat(InputArgs),
    /// Straight-line remaining value of a building
    RemainingValue(InputArgs),
    /// Reconstruction eligibility year
    Reconstruction(InputArgs),
    /// Rental yield on equity
    RentalYield(InputArgs),
    /// Deposit interest after tax
    SavingsInterest(InputArgs),
    /// Days, months and years between two dates
    DateDiff(InputArgs),

    // -- investment --
    /// Return on a held property
    InvestmentReturn(InputArgs),
    /// Leveraged investment analysis
    InvestmentAnalysis(InputArgs),

    /// List regulated regions
    Regions(RegionsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "realty_calc_core=debug,rcalc=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: commands::CommandResult = match cli.command {
        Commands::AcquisitionTax(args) => commands::tax::run_acquisition_tax(args),
        Commands::TransferTax(a) => run(&a, "transfer-tax", tax::calculate_transfer_tax),
        Commands::PropertyTax(a) => run(&a, "property-tax", tax::calculate_property_tax),
        Commands::ComprehensiveTax(a) => {
            run(&a, "comprehensive-tax", tax::calculate_comprehensive_tax)
        }
        Commands::HoldingTax(a) => run(&a, "holding-tax", tax::calculate_holding_tax),
        Commands::InheritanceTax(a) => run(&a, "inheritance-tax", tax::calculate_inheritance_tax),
        Commands::GiftTax(a) => run(&a, "gift-tax", tax::calculate_gift_tax),
        Commands::IncomeTax(a) => run(&a, "income-tax", tax::calculate_income_tax),
        Commands::ProgressiveTax(a) => run(&a, "progressive-tax", tax::calculate_progressive_tax),
        Commands::RegionalTax(a) => run(&a, "regional-tax", tax::calculate_regional_tax),
        Commands::StampTax(a) => run(&a, "stamp-tax", tax::calculate_stamp_tax),
        Commands::RentalIncomeTax(a) => {
            run(&a, "rental-income-tax", tax::calculate_rental_income_tax)
        }
        Commands::DeemedRental(a) => run(&a, "deemed-rental", tax::calculate_deemed_rental),
        Commands::GoodLandlord(a) => run(&a, "good-landlord", tax::calculate_good_landlord),

        Commands::LoanRepayment(args) => commands::loan::run_loan_repayment(args),
        Commands::Ltv(a) => run(&a, "ltv", loan::calculate_ltv),
        Commands::Dti(a) => run(&a, "dti", loan::calculate_dti),
        Commands::Dsr(a) => run(&a, "dsr", loan::calculate_dsr),
        Commands::Rti(a) => run(&a, "rti", loan::calculate_rti),
        Commands::MaxLoan(a) => run(&a, "max-loan", loan::calculate_max_loan),
        Commands::RegulatoryLimit(a) => {
            run(&a, "regulatory-limit", loan::calculate_regulatory_limit)
        }
        Commands::ForeclosureLoan(a) => {
            run(&a, "foreclosure-loan", loan::calculate_foreclosure_loan)
        }
        Commands::EarlyRepayment(a) => run(&a, "early-repayment", loan::calculate_early_repayment),
        Commands::OverdueInterest(a) => {
            run(&a, "overdue-interest", loan::calculate_overdue_interest)
        }
        Commands::FutureIncome(a) => run(&a, "future-income", loan::calculate_future_income),
        Commands::EstimatedIncome(a) => {
            run(&a, "estimated-income", loan::calculate_estimated_income)
        }

        Commands::RentConvert(args) => commands::rent::run_rent_convert(args),
        Commands::DepositToRent(a) => run(&a, "deposit-to-rent", rent::adjust_deposit_to_rent),
        Commands::RentToDeposit(a) => run(&a, "rent-to-deposit", rent::adjust_rent_to_deposit),
        Commands::RentIncrease(a) => run(&a, "rent-increase", rent::calculate_rent_increase),

        Commands::Brokerage(args) => commands::fees::run_brokerage(args),
        Commands::AttorneyFee(a) => run(&a, "attorney-fee", fees::calculate_attorney_fee),
        Commands::RegistrationCost(a) => {
            run(&a, "registration-cost", fees::calculate_registration_cost)
        }
        Commands::AppraisalFee(a) => run(&a, "appraisal-fee", fees::calculate_appraisal_fee),
        Commands::HousingBond(a) => run(&a, "housing-bond", fees::calculate_housing_bond),
        Commands::EvictionCost(a) => run(&a, "eviction-cost", fees::calculate_eviction_cost),
        Commands::AuctionCost(a) => run(&a, "auction-cost", fees::calculate_auction_cost),

        Commands::AuctionDistribution(a) => run(
            &a,
            "auction-distribution",
            distribution::calculate_auction_distribution,
        ),
        Commands::InheritanceShare(a) => {
            run(&a, "inheritance-share", distribution::calculate_inheritance_share)
        }

        Commands::AreaConvert(a) => run(&a, "area-convert", valuation::calculate_area_convert),
        Commands::UnitPrice(a) => run(&a, "unit-price", valuation::calculate_unit_price),
        Commands::LandShare(a) => run(&a, "land-share", valuation::calculate_land_share),
        Commands::BuildingRatio(a) => {
            run(&a, "building-ratio", valuation::calculate_building_ratio)
        }
        Commands::BuildingPrice(a) => {
            run(&a, "building-price", valuation::calculate_building_price)
        }
        Commands::BuildingVat(a) => run(&a, "building-vat", valuation::calculate_building_vat),
        Commands::RemainingValue(a) => {
            run(&a, "remaining-value", valuation::calculate_remaining_value)
        }
        Commands::Reconstruction(a) => {
            run(&a, "reconstruction", valuation::calculate_reconstruction)
        }
        Commands::RentalYield(a) => run(&a, "rental-yield", valuation::calculate_rental_yield),
        Commands::SavingsInterest(a) => {
            run(&a, "savings-interest", valuation::calculate_savings_interest)
        }
        Commands::DateDiff(a) => run(&a, "date-diff", valuation::calculate_date_diff),

        Commands::InvestmentReturn(a) => {
            run(&a, "investment-return", investment::calculate_investment_return)
        }
        Commands::InvestmentAnalysis(a) => {
            run(&a, "investment-analysis", investment::analyze_investment)
        }

        Commands::Regions(args) => commands::regions::run_regions(args),
        Commands::Version => {
            println!(
                "rcalc {} (tax law {})",
                env!("CARGO_PKG_VERSION"),
                realty_calc_core::TAX_LAW_SNAPSHOT
            );
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            // calculator errors show only their user-facing reason
            let message = match e.downcast_ref::<CalcError>() {
                Some(calc) => calc.reason(),
                None => e.to_string(),
            };
            eprintln!("{}: {}", "error".red().bold(), message);
            process::exit(1);
        }
    }
}
