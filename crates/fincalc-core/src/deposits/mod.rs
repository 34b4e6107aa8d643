//! Savings calculators: SIP, fixed deposit and recurring deposit.
pub mod fd;
pub mod rd;
pub mod sip;
