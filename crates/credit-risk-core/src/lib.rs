pub mod analyzer;
pub mod error;
pub mod provider;
pub mod ratios;
pub mod structural;
pub mod types;
pub mod volatility;

mod math;

pub use error::CreditRiskError;
pub use types::*;

/// Standard result type for all credit-risk operations
pub type CreditRiskResult<T> = Result<T, CreditRiskError>;
