pub mod amortization;
pub mod costs;
pub mod eligibility;
pub mod error;
pub mod policy;
pub mod types;

pub use error::MortgageError;
pub use types::*;

/// Standard result type for all engine operations
pub type MortgageResult<T> = Result<T, MortgageError>;
