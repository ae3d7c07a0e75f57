pub mod error;
pub mod numeric;
pub mod tables;
pub mod time_value;
pub mod types;
pub mod validation;

#[cfg(feature = "tax")]
pub mod tax;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "rent")]
pub mod rent;

#[cfg(feature = "fees")]
pub mod fees;

#[cfg(feature = "distribution")]
pub mod distribution;

#[cfg(feature = "valuation")]
pub mod valuation;

#[cfg(feature = "investment")]
pub mod investment;

pub use error::CalcError;
pub use types::*;

/// Standard result type for all real-estate calculators
pub type CalcResult<T> = Result<T, CalcError>;
