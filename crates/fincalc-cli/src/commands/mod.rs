pub mod deposits;
pub mod format;
pub mod limits;
pub mod loans;
