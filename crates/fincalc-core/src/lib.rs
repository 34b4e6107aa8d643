pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loans")]
pub mod loans;

#[cfg(feature = "deposits")]
pub mod deposits;

#[cfg(feature = "currency")]
pub mod currency;

#[cfg(feature = "limits")]
pub mod limits;

pub use error::{Degenerate, FinCalcError};
pub use types::*;

/// Standard result type for the non-engine surfaces (formatting, limits, I/O)
pub type FinCalcResult<T> = Result<T, FinCalcError>;
