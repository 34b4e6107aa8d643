//! Systematic Investment Plan: future value of a fixed monthly investment
//! with monthly compounding, each instalment invested at the start of its
//! month.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::Degenerate;
use crate::time_value::{annuity_due_future_value, monthly_rate, months_in, round_currency};
use crate::types::{ComputationOutput, Money, Percent};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SipInput {
    pub monthly_investment: Money,
    /// Expected annual return in percent.
    pub annual_return_pct: Percent,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SipResult {
    pub monthly_investment: Money,
    pub total_invested: Money,
    pub future_value: Money,
    pub wealth_gain: Money,
    pub annual_return_pct: Percent,
    pub years: u32,
}

impl SipResult {
    pub fn zero() -> Self {
        SipResult {
            monthly_investment: Decimal::ZERO,
            total_invested: Decimal::ZERO,
            future_value: Decimal::ZERO,
            wealth_gain: Decimal::ZERO,
            annual_return_pct: Decimal::ZERO,
            years: 0,
        }
    }
}

/// Maturity value of a monthly SIP:
/// FV = M · ((1+r)^n − 1) / r · (1+r).
pub fn compute_sip(monthly_investment: Money, annual_return_pct: Percent, years: u32) -> SipResult {
    let input = SipInput {
        monthly_investment,
        annual_return_pct,
        years,
    };
    solve(&input).unwrap_or_else(|reason| {
        reason.trace("sip");
        SipResult::zero()
    })
}

pub fn calculate_sip(input: &SipInput) -> ComputationOutput<SipResult> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let result = match solve(input) {
        Ok(result) => result,
        Err(reason) => {
            reason.trace("sip");
            warnings.push(reason.to_string());
            SipResult::zero()
        }
    };

    ComputationOutput::new(
        start,
        "SIP future value (annuity due, monthly compounding)",
        input,
        warnings,
        result,
    )
}

fn solve(input: &SipInput) -> Result<SipResult, Degenerate> {
    if input.monthly_investment <= Decimal::ZERO {
        return Err(Degenerate::NonPositive("monthly_investment"));
    }
    if input.years == 0 {
        return Err(Degenerate::NonPositive("years"));
    }
    if input.annual_return_pct < Decimal::ZERO {
        return Err(Degenerate::Negative("annual_return_pct"));
    }

    let months = months_in(input.years);
    let total_invested = input
        .monthly_investment
        .checked_mul(Decimal::from(months))
        .ok_or(Degenerate::Overflow)?;
    let rate = monthly_rate(input.annual_return_pct);
    let future_value = annuity_due_future_value(input.monthly_investment, rate, months)
        .ok_or(Degenerate::Overflow)?;
    tracing::debug!(months, %future_value, "sip computed");

    Ok(SipResult {
        monthly_investment: input.monthly_investment,
        total_invested: round_currency(total_invested),
        future_value: round_currency(future_value),
        wealth_gain: round_currency(future_value - total_invested),
        annual_return_pct: input.annual_return_pct,
        years: input.years,
    })
}
