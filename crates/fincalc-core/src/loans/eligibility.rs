//! Maximum loan a borrower qualifies for, from income and existing
//! obligations, by running the EMI formula in reverse.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::Degenerate;
use crate::time_value::{annuity_present_value, monthly_rate, months_in, round_currency};
use crate::types::{ComputationOutput, Money, Percent, Rate};

/// Fixed Obligations to Income Ratio: share of monthly income lenders
/// allow for all EMIs combined.
pub const FOIR: Rate = dec!(0.50);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    pub monthly_income: Money,
    /// EMIs already being serviced.
    #[serde(default)]
    pub existing_emi: Money,
    pub annual_rate_pct: Percent,
    pub tenure_years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub monthly_income: Money,
    pub existing_emi: Money,
    /// Income headroom for a new EMI: max(0, income × FOIR − existing).
    pub affordable_emi: Money,
    pub max_loan_amount: Money,
    pub annual_rate_pct: Percent,
    pub tenure_years: u32,
    pub total_payment: Money,
    pub total_interest: Money,
}

impl EligibilityResult {
    pub fn zero() -> Self {
        EligibilityResult {
            monthly_income: Decimal::ZERO,
            existing_emi: Decimal::ZERO,
            affordable_emi: Decimal::ZERO,
            max_loan_amount: Decimal::ZERO,
            annual_rate_pct: Decimal::ZERO,
            tenure_years: 0,
            total_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Largest principal whose EMI fits inside the FOIR headroom.
pub fn compute_eligibility(
    monthly_income: Money,
    existing_emi: Money,
    annual_rate_pct: Percent,
    tenure_years: u32,
) -> EligibilityResult {
    let input = EligibilityInput {
        monthly_income,
        existing_emi,
        annual_rate_pct,
        tenure_years,
    };
    solve(&input).unwrap_or_else(|reason| {
        reason.trace("eligibility");
        EligibilityResult::zero()
    })
}

pub fn calculate_eligibility(input: &EligibilityInput) -> ComputationOutput<EligibilityResult> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let result = match solve(input) {
        Ok(result) => {
            if result.affordable_emi.is_zero() {
                warnings.push(format!(
                    "Existing EMIs use the full {}% FOIR allowance; no new loan is possible",
                    (FOIR * dec!(100)).normalize()
                ));
            }
            result
        }
        Err(reason) => {
            reason.trace("eligibility");
            warnings.push(reason.to_string());
            EligibilityResult::zero()
        }
    };

    ComputationOutput::new(
        start,
        "Reverse EMI at FOIR 50%: A·((1+r)^n − 1) / (r·(1+r)^n)",
        input,
        warnings,
        result,
    )
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn solve(input: &EligibilityInput) -> Result<EligibilityResult, Degenerate> {
    if input.monthly_income <= Decimal::ZERO {
        return Err(Degenerate::NonPositive("monthly_income"));
    }
    if input.tenure_years == 0 {
        return Err(Degenerate::NonPositive("tenure_years"));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(Degenerate::Negative("annual_rate_pct"));
    }
    if input.existing_emi < Decimal::ZERO {
        return Err(Degenerate::Negative("existing_emi"));
    }

    let ceiling = input
        .monthly_income
        .checked_mul(FOIR)
        .ok_or(Degenerate::Overflow)?;
    let affordable = (ceiling - input.existing_emi).max(Decimal::ZERO);

    let mut result = EligibilityResult {
        monthly_income: input.monthly_income,
        existing_emi: input.existing_emi,
        affordable_emi: Decimal::ZERO,
        max_loan_amount: Decimal::ZERO,
        annual_rate_pct: input.annual_rate_pct,
        tenure_years: input.tenure_years,
        total_payment: Decimal::ZERO,
        total_interest: Decimal::ZERO,
    };
    if affordable.is_zero() {
        return Ok(result);
    }

    let months = months_in(input.tenure_years);
    let rate = monthly_rate(input.annual_rate_pct);
    let max_loan = annuity_present_value(affordable, rate, months).ok_or(Degenerate::Overflow)?;
    let total_payment = affordable
        .checked_mul(Decimal::from(months))
        .ok_or(Degenerate::Overflow)?;

    tracing::debug!(%affordable, %max_loan, "eligibility computed");
    result.affordable_emi = round_currency(affordable);
    result.max_loan_amount = round_currency(max_loan);
    result.total_payment = round_currency(total_payment);
    result.total_interest = if rate.is_zero() {
        Decimal::ZERO
    } else {
        round_currency(total_payment - max_loan)
    };
    Ok(result)
}
