//! Equated Monthly Installment (EMI) on a reducing-balance loan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::Degenerate;
use crate::time_value::{amortizing_payment, monthly_rate, round_currency};
use crate::types::{ComputationOutput, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Input parameters for an EMI calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiInput {
    pub principal: Money,
    /// Annual interest rate in percent (8.5 = 8.5%).
    pub annual_rate_pct: Percent,
    pub tenure_months: u32,
}

/// EMI schedule summary. Currency fields are rounded to whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiResult {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub principal: Money,
}

impl EmiResult {
    pub fn zero() -> Self {
        EmiResult {
            monthly_payment: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            principal: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly installment, total payment and total interest for a loan.
///
/// Non-positive principal or a zero tenure yields [`EmiResult::zero`].
/// A zero rate amortizes linearly (`principal / tenure_months`).
pub fn compute_emi(principal: Money, annual_rate_pct: Percent, tenure_months: u32) -> EmiResult {
    let input = EmiInput {
        principal,
        annual_rate_pct,
        tenure_months,
    };
    solve(&input).unwrap_or_else(|reason| {
        reason.trace("emi");
        EmiResult::zero()
    })
}

/// [`compute_emi`] wrapped in the standard computation envelope.
pub fn calculate_emi(input: &EmiInput) -> ComputationOutput<EmiResult> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    let result = match solve(input) {
        Ok(result) => result,
        Err(reason) => {
            reason.trace("emi");
            warnings.push(reason.to_string());
            EmiResult::zero()
        }
    };

    ComputationOutput::new(
        start,
        "Reducing-balance EMI: P·r·(1+r)^n / ((1+r)^n − 1)",
        input,
        warnings,
        result,
    )
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn solve(input: &EmiInput) -> Result<EmiResult, Degenerate> {
    if input.principal <= Decimal::ZERO {
        return Err(Degenerate::NonPositive("principal"));
    }
    if input.tenure_months == 0 {
        return Err(Degenerate::NonPositive("tenure_months"));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(Degenerate::Negative("annual_rate_pct"));
    }

    let rate = monthly_rate(input.annual_rate_pct);
    let payment = amortizing_payment(input.principal, rate, input.tenure_months)
        .ok_or(Degenerate::Overflow)?;

    if rate.is_zero() {
        return Ok(EmiResult {
            monthly_payment: round_currency(payment),
            total_payment: round_currency(input.principal),
            total_interest: Decimal::ZERO,
            principal: input.principal,
        });
    }

    let total_payment = payment
        .checked_mul(Decimal::from(input.tenure_months))
        .ok_or(Degenerate::Overflow)?;
    let total_interest = total_payment - input.principal;

    tracing::debug!(%payment, %total_payment, "emi computed");

    Ok(EmiResult {
        monthly_payment: round_currency(payment),
        total_payment: round_currency(total_payment),
        total_interest: round_currency(total_interest),
        principal: input.principal,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_home_loan_reference_values() {
        let r = compute_emi(dec!(1_000_000), dec!(8.5), 240);
        assert_eq!(r.monthly_payment, dec!(8678));
        assert_eq!(r.total_payment, dec!(2_082_776));
        assert_eq!(r.total_interest, dec!(1_082_776));
        assert_eq!(r.principal, dec!(1_000_000));
    }

    #[test]
    fn test_one_year_personal_loan() {
        let r = compute_emi(dec!(100_000), dec!(12), 12);
        assert_eq!(r.monthly_payment, dec!(8885));
        assert_eq!(r.total_payment, dec!(106_619));
        assert_eq!(r.total_interest, dec!(6_619));
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let r = compute_emi(dec!(120_000), Decimal::ZERO, 24);
        assert_eq!(r.monthly_payment, dec!(5000));
        assert_eq!(r.total_payment, dec!(120_000));
        assert_eq!(r.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_degenerate_inputs_return_zero() {
        assert_eq!(compute_emi(Decimal::ZERO, dec!(5), 12), EmiResult::zero());
        assert_eq!(compute_emi(dec!(-100), dec!(5), 12), EmiResult::zero());
        assert_eq!(compute_emi(dec!(100_000), dec!(5), 0), EmiResult::zero());
        assert_eq!(compute_emi(dec!(100_000), dec!(-1), 12), EmiResult::zero());
    }

    #[test]
    fn test_overflow_degrades_to_zero() {
        let r = compute_emi(dec!(1_000_000), dec!(100_000), 600);
        assert_eq!(r, EmiResult::zero());
    }

    #[test]
    fn test_envelope_reports_degenerate_warning() {
        let input = EmiInput {
            principal: Decimal::ZERO,
            annual_rate_pct: dec!(5),
            tenure_months: 12,
        };
        let out = calculate_emi(&input);
        assert_eq!(out.result, EmiResult::zero());
        assert_eq!(out.warnings.len(), 1);
        assert!(out.warnings[0].contains("principal"));
    }

    #[test]
    fn test_envelope_clean_run_has_no_warnings() {
        let input = EmiInput {
            principal: dec!(500_000),
            annual_rate_pct: dec!(9),
            tenure_months: 60,
        };
        let out = calculate_emi(&input);
        assert!(out.warnings.is_empty());
        assert_eq!(out.result, compute_emi(dec!(500_000), dec!(9), 60));
        assert_eq!(out.metadata.precision, "rust_decimal_128bit");
    }
}
