//! Part-prepayment and foreclosure analysis.
//!
//! A lump sum paid at the start of `prepayment_year` reduces the
//! outstanding principal. The EMI is held fixed and the remaining tenure is
//! re-solved, which is how most lenders apply a prepayment by default.
//! Savings are measured against the original schedule and never reported
//! as negative.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::Degenerate;
use crate::time_value::{
    amortizing_payment, monthly_rate, months_in, outstanding_balance, payoff_months,
    round_currency, Payoff, MONTHS_PER_YEAR,
};
use crate::types::{ComputationOutput, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrepaymentInput {
    pub loan_amount: Money,
    pub annual_rate_pct: Percent,
    pub tenure_years: u32,
    pub prepayment_amount: Money,
    /// Policy year (1-based) at whose start the lump sum is paid.
    pub prepayment_year: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepaymentResult {
    // Original schedule
    pub original_loan_amount: Money,
    pub original_tenure_years: u32,
    pub original_emi: Money,
    pub original_total_payment: Money,
    pub original_total_interest: Money,

    // After prepayment
    /// Amount actually applied, capped at the outstanding balance.
    pub prepayment_amount: Money,
    pub prepayment_year: u32,
    pub outstanding_before_prepayment: Money,
    pub new_outstanding: Money,
    /// Months still to pay after the prepayment, at the original EMI.
    pub new_tenure_months: u32,
    pub new_total_payment: Money,
    pub new_total_interest: Money,

    // Savings
    pub interest_saved: Money,
    pub tenure_reduced_months: u32,

    pub annual_rate_pct: Percent,
    /// False when the EMI no longer covers the interest on the reduced
    /// balance; `new_tenure_months` then falls back to the remaining
    /// original tenure.
    pub amortizable: bool,
}

impl PrepaymentResult {
    /// Zero-valued result that still echoes the loan being described,
    /// with a negative loan amount shown as zero.
    pub fn zero(input: &PrepaymentInput) -> Self {
        PrepaymentResult {
            original_loan_amount: input.loan_amount.max(Decimal::ZERO),
            original_tenure_years: input.tenure_years,
            original_emi: Decimal::ZERO,
            original_total_payment: Decimal::ZERO,
            original_total_interest: Decimal::ZERO,
            prepayment_amount: Decimal::ZERO,
            prepayment_year: 0,
            outstanding_before_prepayment: Decimal::ZERO,
            new_outstanding: Decimal::ZERO,
            new_tenure_months: 0,
            new_total_payment: Decimal::ZERO,
            new_total_interest: Decimal::ZERO,
            interest_saved: Decimal::ZERO,
            tenure_reduced_months: 0,
            annual_rate_pct: input.annual_rate_pct,
            amortizable: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Interest and tenure saved by a part-prepayment.
pub fn compute_prepayment(
    loan_amount: Money,
    annual_rate_pct: Percent,
    tenure_years: u32,
    prepayment_amount: Money,
    prepayment_year: u32,
) -> PrepaymentResult {
    let input = PrepaymentInput {
        loan_amount,
        annual_rate_pct,
        tenure_years,
        prepayment_amount,
        prepayment_year,
    };
    match solve(&input) {
        Ok((result, _)) => result,
        Err(reason) => {
            reason.trace("prepayment");
            PrepaymentResult::zero(&input)
        }
    }
}

pub fn calculate_prepayment(input: &PrepaymentInput) -> ComputationOutput<PrepaymentResult> {
    let start = Instant::now();

    let (result, warnings) = match solve(input) {
        Ok(solved) => solved,
        Err(reason) => {
            reason.trace("prepayment");
            (PrepaymentResult::zero(input), vec![reason.to_string()])
        }
    };

    ComputationOutput::new(
        start,
        "Outstanding-balance projection with EMI held fixed and tenure re-solved",
        input,
        warnings,
        result,
    )
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn solve(input: &PrepaymentInput) -> Result<(PrepaymentResult, Vec<String>), Degenerate> {
    validate(input)?;
    let mut warnings = Vec::new();
    let overflow = || Degenerate::Overflow;

    let rate = monthly_rate(input.annual_rate_pct);
    let total_months = months_in(input.tenure_years);

    // --- Original schedule ---
    let emi = amortizing_payment(input.loan_amount, rate, total_months).ok_or_else(overflow)?;
    let original_total = emi
        .checked_mul(Decimal::from(total_months))
        .ok_or_else(overflow)?;
    let original_interest = original_total
        .checked_sub(input.loan_amount)
        .ok_or_else(overflow)?;

    // --- Balance at the start of the prepayment year ---
    let elapsed_months = (input.prepayment_year - 1).saturating_mul(MONTHS_PER_YEAR);
    let paid_months = elapsed_months.min(total_months);
    if elapsed_months >= total_months {
        warnings.push(format!(
            "Loan is fully repaid before year {}; prepayment has no effect",
            input.prepayment_year
        ));
    }
    let paid_before = emi
        .checked_mul(Decimal::from(paid_months))
        .ok_or_else(overflow)?;
    let outstanding = outstanding_balance(input.loan_amount, rate, total_months, paid_months)
        .ok_or_else(overflow)?;

    // --- Apply the prepayment ---
    let applied = input.prepayment_amount.min(outstanding);
    if applied < input.prepayment_amount && !outstanding.is_zero() {
        warnings.push(format!(
            "Prepayment capped at the outstanding balance of {}",
            round_currency(outstanding)
        ));
    }
    let new_outstanding = (outstanding - applied).max(Decimal::ZERO);

    // --- Re-solve the remaining tenure at the same EMI ---
    let remaining_months = total_months - paid_months;
    let mut amortizable = true;
    let new_months = if new_outstanding > Decimal::ZERO {
        match payoff_months(new_outstanding, emi, rate).ok_or_else(overflow)? {
            Payoff::Months(months) => months,
            Payoff::Never => {
                amortizable = false;
                warnings.push(
                    "EMI does not cover interest on the reduced balance; \
                     showing the remaining original tenure"
                        .to_string(),
                );
                remaining_months
            }
        }
    } else {
        0
    };
    let paid_after = emi
        .checked_mul(Decimal::from(new_months))
        .ok_or_else(overflow)?;

    // --- Savings ---
    // The rounded-up new tenure can push this past the original total
    let new_total = paid_before
        .checked_add(applied)
        .and_then(|total| total.checked_add(paid_after))
        .ok_or_else(overflow)?;
    let new_interest = new_total
        .checked_sub(input.loan_amount)
        .ok_or_else(overflow)?;
    let interest_saved = original_interest
        .checked_sub(new_interest)
        .ok_or_else(overflow)?
        .max(Decimal::ZERO);
    let tenure_reduced = remaining_months.saturating_sub(new_months);

    tracing::debug!(
        %outstanding,
        %applied,
        new_months,
        tenure_reduced,
        "prepayment computed"
    );

    let result = PrepaymentResult {
        original_loan_amount: round_currency(input.loan_amount),
        original_tenure_years: input.tenure_years,
        original_emi: round_currency(emi),
        original_total_payment: round_currency(original_total),
        original_total_interest: round_currency(original_interest),
        prepayment_amount: round_currency(applied),
        prepayment_year: input.prepayment_year,
        outstanding_before_prepayment: round_currency(outstanding),
        new_outstanding: round_currency(new_outstanding),
        new_tenure_months: new_months,
        new_total_payment: round_currency(new_total),
        new_total_interest: round_currency(new_interest),
        interest_saved: round_currency(interest_saved),
        tenure_reduced_months: tenure_reduced,
        annual_rate_pct: input.annual_rate_pct,
        amortizable,
    };
    Ok((result, warnings))
}

fn validate(input: &PrepaymentInput) -> Result<(), Degenerate> {
    if input.loan_amount <= Decimal::ZERO {
        return Err(Degenerate::NonPositive("loan_amount"));
    }
    if input.tenure_years == 0 {
        return Err(Degenerate::NonPositive("tenure_years"));
    }
    if input.prepayment_amount <= Decimal::ZERO {
        return Err(Degenerate::NonPositive("prepayment_amount"));
    }
    if input.prepayment_year == 0 {
        return Err(Degenerate::NonPositive("prepayment_year"));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(Degenerate::Negative("annual_rate_pct"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_input() -> PrepaymentInput {
        PrepaymentInput {
            loan_amount: dec!(2_000_000),
            annual_rate_pct: dec!(9),
            tenure_years: 20,
            prepayment_amount: dec!(200_000),
            prepayment_year: 3,
        }
    }

    #[test]
    fn test_standard_prepayment() {
        let out = calculate_prepayment(&standard_input());
        let r = &out.result;
        assert_eq!(r.original_emi, dec!(17_995));
        assert_eq!(r.original_total_payment, dec!(4_318_685));
        assert_eq!(r.original_total_interest, dec!(2_318_685));
        assert_eq!(r.outstanding_before_prepayment, dec!(1_921_578));
        assert_eq!(r.prepayment_amount, dec!(200_000));
        assert_eq!(r.new_outstanding, dec!(1_721_578));
        assert_eq!(r.new_tenure_months, 170);
        assert_eq!(r.tenure_reduced_months, 46);
        assert_eq!(r.new_total_payment, dec!(3_690_937));
        assert_eq!(r.interest_saved, dec!(627_748));
        assert!(r.amortizable);
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_prepayment_capped_at_outstanding() {
        let r = compute_prepayment(dec!(1_000_000), dec!(10), 10, dec!(100_000_000), 2);
        assert_eq!(r.prepayment_amount, r.outstanding_before_prepayment);
        assert_eq!(r.prepayment_amount, dec!(938_658));
        assert_eq!(r.new_outstanding, Decimal::ZERO);
        assert_eq!(r.new_tenure_months, 0);
        assert_eq!(r.tenure_reduced_months, 108);
        assert_eq!(r.interest_saved, dec!(488_570));
    }

    #[test]
    fn test_cap_is_reported_as_warning() {
        let mut input = standard_input();
        input.prepayment_amount = dec!(50_000_000);
        let out = calculate_prepayment(&input);
        assert!(out.warnings.iter().any(|w| w.contains("capped")));
    }

    #[test]
    fn test_zero_rate_prepayment() {
        let r = compute_prepayment(dec!(1_200_000), Decimal::ZERO, 10, dec!(120_000), 2);
        assert_eq!(r.original_emi, dec!(10_000));
        assert_eq!(r.outstanding_before_prepayment, dec!(1_080_000));
        assert_eq!(r.new_tenure_months, 96);
        assert_eq!(r.tenure_reduced_months, 12);
        assert_eq!(r.new_total_payment, dec!(1_200_000));
        assert_eq!(r.interest_saved, Decimal::ZERO);
    }

    #[test]
    fn test_prepayment_after_maturity_has_no_effect() {
        let mut input = standard_input();
        input.prepayment_year = 25;
        let out = calculate_prepayment(&input);
        let r = &out.result;
        assert_eq!(r.outstanding_before_prepayment, Decimal::ZERO);
        assert_eq!(r.prepayment_amount, Decimal::ZERO);
        assert_eq!(r.interest_saved, Decimal::ZERO);
        assert_eq!(r.tenure_reduced_months, 0);
        assert_eq!(r.new_total_payment, r.original_total_payment);
        assert!(out.warnings[0].contains("fully repaid"));
    }

    #[test]
    fn test_degenerate_inputs_echo_loan() {
        let r = compute_prepayment(dec!(500_000), dec!(9), 10, Decimal::ZERO, 2);
        assert_eq!(r.original_loan_amount, dec!(500_000));
        assert_eq!(r.original_tenure_years, 10);
        assert_eq!(r.original_emi, Decimal::ZERO);
        assert_eq!(r.interest_saved, Decimal::ZERO);

        let r = compute_prepayment(dec!(500_000), dec!(9), 10, dec!(10_000), 0);
        assert_eq!(r.original_emi, Decimal::ZERO);
        assert_eq!(r.prepayment_year, 0);
    }

    #[test]
    fn test_negative_loan_echoes_zero_amount() {
        let r = compute_prepayment(dec!(-500_000), dec!(9), 10, dec!(10_000), 2);
        assert_eq!(r.original_loan_amount, Decimal::ZERO);
        assert_eq!(r.original_emi, Decimal::ZERO);
    }

    #[test]
    fn test_near_max_loan_overflows_to_zero_result() {
        // Fits the original schedule, but the rounded-up new tenure does not
        let loan = (Decimal::MAX / dec!(1.01)).trunc();
        let emi = amortizing_payment(loan, monthly_rate(dec!(1)), 12).unwrap();
        let input = PrepaymentInput {
            loan_amount: loan,
            annual_rate_pct: dec!(1),
            tenure_years: 1,
            prepayment_amount: (emi / dec!(2)).trunc(),
            prepayment_year: 1,
        };

        let r = compute_prepayment(
            input.loan_amount,
            input.annual_rate_pct,
            input.tenure_years,
            input.prepayment_amount,
            input.prepayment_year,
        );
        assert_eq!(r, PrepaymentResult::zero(&input));

        let out = calculate_prepayment(&input);
        assert_eq!(out.result.new_total_payment, Decimal::ZERO);
        assert!(out.warnings[0].contains("overflow"));
    }

    #[test]
    fn test_first_year_prepayment_uses_full_principal() {
        let r = compute_prepayment(dec!(1_000_000), dec!(8), 15, dec!(100_000), 1);
        assert_eq!(r.outstanding_before_prepayment, dec!(1_000_000));
        assert_eq!(r.new_outstanding, dec!(900_000));
        assert!(r.tenure_reduced_months > 0);
        assert!(r.interest_saved > Decimal::ZERO);
    }
}
