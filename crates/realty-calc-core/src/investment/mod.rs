pub mod analysis;
pub mod returns;

pub use analysis::{
    analyze_investment, capital_gain_leverage, leveraged_return, property_value_from_cap_rate,
    InvestmentAnalysisInput, InvestmentAnalysisOutput,
};
pub use returns::{calculate_investment_return, InvestmentReturnInput, InvestmentReturnOutput};
