//! Recurring Deposit maturity.
//!
//! Same annuity-due shape as a SIP (monthly deposit, monthly rate), kept
//! as its own operation because the inputs describe a bank deposit rather
//! than a market investment.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::Degenerate;
use crate::time_value::{annuity_due_future_value, monthly_rate, months_in, round_currency};
use crate::types::{ComputationOutput, Money, Percent};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RdInput {
    pub monthly_deposit: Money,
    pub annual_rate_pct: Percent,
    pub years: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RdResult {
    pub monthly_deposit: Money,
    pub total_deposits: Money,
    pub maturity_amount: Money,
    pub interest_earned: Money,
    pub annual_rate_pct: Percent,
    pub years: u32,
}

impl RdResult {
    pub fn zero() -> Self {
        RdResult {
            monthly_deposit: Decimal::ZERO,
            total_deposits: Decimal::ZERO,
            maturity_amount: Decimal::ZERO,
            interest_earned: Decimal::ZERO,
            annual_rate_pct: Decimal::ZERO,
            years: 0,
        }
    }
}

pub fn compute_rd(monthly_deposit: Money, annual_rate_pct: Percent, years: u32) -> RdResult {
    let input = RdInput {
        monthly_deposit,
        annual_rate_pct,
        years,
    };
    solve(&input).unwrap_or_else(|reason| {
        reason.trace("rd");
        RdResult::zero()
    })
}

pub fn calculate_rd(input: &RdInput) -> ComputationOutput<RdResult> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let result = match solve(input) {
        Ok(result) => result,
        Err(reason) => {
            reason.trace("rd");
            warnings.push(reason.to_string());
            RdResult::zero()
        }
    };

    ComputationOutput::new(
        start,
        "Recurring deposit maturity: P·((1+r)^n − 1)/r·(1+r), monthly rate",
        input,
        warnings,
        result,
    )
}

fn solve(input: &RdInput) -> Result<RdResult, Degenerate> {
    if input.monthly_deposit <= Decimal::ZERO {
        return Err(Degenerate::NonPositive("monthly_deposit"));
    }
    if input.years == 0 {
        return Err(Degenerate::NonPositive("years"));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(Degenerate::Negative("annual_rate_pct"));
    }

    let months = months_in(input.years);
    let total_deposits = input
        .monthly_deposit
        .checked_mul(Decimal::from(months))
        .ok_or(Degenerate::Overflow)?;
    let maturity = annuity_due_future_value(
        input.monthly_deposit,
        monthly_rate(input.annual_rate_pct),
        months,
    )
    .ok_or(Degenerate::Overflow)?;
    tracing::debug!(months, %maturity, "rd computed");

    Ok(RdResult {
        monthly_deposit: input.monthly_deposit,
        total_deposits: round_currency(total_deposits),
        maturity_amount: round_currency(maturity),
        interest_earned: round_currency(maturity - total_deposits),
        annual_rate_pct: input.annual_rate_pct,
        years: input.years,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deposits::sip::compute_sip;
    use rust_decimal_macros::dec;

    #[test]
    fn test_five_year_rd() {
        let r = compute_rd(dec!(5000), dec!(6.5), 5);
        assert_eq!(r.total_deposits, dec!(300_000));
        assert_eq!(r.maturity_amount, dec!(355_284));
        assert_eq!(r.interest_earned, dec!(55_284));
    }

    #[test]
    fn test_matches_sip_arithmetic() {
        let rd = compute_rd(dec!(3000), dec!(7.25), 8);
        let sip = compute_sip(dec!(3000), dec!(7.25), 8);
        assert_eq!(rd.maturity_amount, sip.future_value);
        assert_eq!(rd.total_deposits, sip.total_invested);
    }

    #[test]
    fn test_zero_rate() {
        let r = compute_rd(dec!(1000), Decimal::ZERO, 2);
        assert_eq!(r.maturity_amount, dec!(24_000));
        assert_eq!(r.interest_earned, Decimal::ZERO);
    }

    #[test]
    fn test_degenerate_inputs() {
        assert_eq!(compute_rd(dec!(-1), dec!(6), 5), RdResult::zero());
        assert_eq!(compute_rd(dec!(500), dec!(6), 0), RdResult::zero());
    }
}
