//! Statutory tables and reference data, fixed at [`crate::TAX_LAW_SNAPSHOT`].

pub mod acquisition;
pub mod brackets;
pub mod building;
pub mod fees;
pub mod lending;
pub mod long_term_deduction;
pub mod personal_income;
pub mod property;
pub mod regions;
pub mod schedule;
pub mod units;
pub mod wealth_transfer;

pub use brackets::{Bracket, BracketTable, MarginalSlice};
pub use schedule::{Boundary, Step, StepSchedule, Tiered};
