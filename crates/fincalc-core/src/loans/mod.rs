//! Loan calculators: EMI, eligibility and prepayment.
pub mod eligibility;
pub mod emi;
pub mod prepayment;
