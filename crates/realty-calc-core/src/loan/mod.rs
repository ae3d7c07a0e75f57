//! Mortgage amortization, regulatory loan limits and borrower income screens.

pub mod borrower_income;
pub mod charges;
pub mod income_ratio;
pub mod regulatory;
pub mod repayment;

pub use borrower_income::{
    average_income_by_age, calculate_estimated_income, calculate_future_income,
    EstimatedIncomeInput, EstimatedIncomeOutput, FutureIncomeInput, FutureIncomeOutput,
};
pub use charges::{
    calculate_early_repayment, calculate_overdue_interest, EarlyRepaymentInput,
    EarlyRepaymentOutput, OverdueInterestInput, OverdueInterestOutput,
};
pub use income_ratio::{
    calculate_dsr, calculate_dti, calculate_rti, DsrInput, DsrOutput, DtiInput, DtiOutput,
    RtiInput, RtiOutput,
};
pub use regulatory::{
    calculate_foreclosure_loan, calculate_ltv, calculate_max_loan, calculate_regulatory_limit,
    ForeclosureLoanInput, ForeclosureLoanOutput, LtvInput, LtvOutput, MaxLoanInput,
    MaxLoanOutput, RegulatoryLimitInput, RegulatoryLimitOutput,
};
pub use repayment::{
    calculate_loan_repayment, first_monthly_payment, AmortizationRow, LoanRepaymentInput,
    LoanRepaymentOutput, RepaymentMethod,
};
