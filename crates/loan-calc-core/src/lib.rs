pub mod display;
pub mod error;
pub mod payment;
pub mod types;

#[cfg(feature = "schedule")]
pub mod schedule;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
