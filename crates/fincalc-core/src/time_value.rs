//! Shared amortization and compounding helpers used by every engine.
//!
//! Every helper works on checked `Decimal` arithmetic and returns `None`
//! when an intermediate value overflows, so callers can degrade to their
//! zero result instead of panicking.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

pub const MONTHS_PER_YEAR: u32 = 12;

/// Slack subtracted before rounding a solved tenure up, so that `ln`
/// noise on an exact month count does not add a phantom month.
const TENURE_EPSILON: Decimal = dec!(0.000001);

/// Outcome of solving for the number of payments that retire a balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payoff {
    Months(u32),
    /// The payment does not cover the interest accruing on the balance.
    Never,
}

/// Annual percentage to a monthly decimal rate (8.5 -> 0.0070833..).
pub fn monthly_rate(annual_pct: Percent) -> Rate {
    annual_pct / dec!(12) / dec!(100)
}

pub fn months_in(years: u32) -> u32 {
    years.saturating_mul(MONTHS_PER_YEAR)
}

/// (1 + rate)^periods by binary exponentiation on checked multiplies.
pub fn compound(rate: Rate, periods: u32) -> Option<Decimal> {
    let mut base = Decimal::ONE.checked_add(rate)?;
    let mut result = Decimal::ONE;
    let mut n = periods;
    while n > 0 {
        if n & 1 == 1 {
            result = result.checked_mul(base)?;
        }
        n >>= 1;
        if n > 0 {
            base = base.checked_mul(base)?;
        }
    }
    Some(result)
}

/// Level payment that fully amortizes `principal` over `periods`
/// (reducing-balance annuity: P·r·g / (g − 1), g = (1+r)^n).
pub fn amortizing_payment(principal: Money, rate: Rate, periods: u32) -> Option<Money> {
    if periods == 0 {
        return None;
    }
    let n = Decimal::from(periods);
    if rate.is_zero() {
        return principal.checked_div(n);
    }
    let growth = compound(rate, periods)?;
    principal
        .checked_mul(rate)?
        .checked_mul(growth)?
        .checked_div(growth.checked_sub(Decimal::ONE)?)
}

/// Principal that a level `payment` retires over `periods`
/// (inverse of [`amortizing_payment`]: A·(g − 1) / (r·g)).
pub fn annuity_present_value(payment: Money, rate: Rate, periods: u32) -> Option<Money> {
    let n = Decimal::from(periods);
    if rate.is_zero() {
        return payment.checked_mul(n);
    }
    let growth = compound(rate, periods)?;
    payment
        .checked_mul(growth.checked_sub(Decimal::ONE)?)?
        .checked_div(rate.checked_mul(growth)?)
}

/// Future value of `periods` payments made at the start of each period.
pub fn annuity_due_future_value(payment: Money, rate: Rate, periods: u32) -> Option<Money> {
    let n = Decimal::from(periods);
    if rate.is_zero() {
        return payment.checked_mul(n);
    }
    let growth = compound(rate, periods)?;
    let accumulation = growth.checked_sub(Decimal::ONE)?.checked_div(rate)?;
    payment
        .checked_mul(accumulation)?
        .checked_mul(Decimal::ONE.checked_add(rate)?)
}

/// Remaining principal on an amortizing loan after `paid` of `total`
/// scheduled payments.
pub fn outstanding_balance(principal: Money, rate: Rate, total: u32, paid: u32) -> Option<Money> {
    if paid >= total {
        return Some(Decimal::ZERO);
    }
    if rate.is_zero() {
        let remaining = Decimal::from(total - paid);
        return principal
            .checked_mul(remaining)?
            .checked_div(Decimal::from(total));
    }
    let growth_total = compound(rate, total)?;
    let growth_paid = compound(rate, paid)?;
    principal
        .checked_mul(growth_total.checked_sub(growth_paid)?)?
        .checked_div(growth_total.checked_sub(Decimal::ONE)?)
}

/// Number of whole payments of `payment` needed to retire `balance`:
/// n = ln(E / (E − B·r)) / ln(1 + r), rounded up.
pub fn payoff_months(balance: Money, payment: Money, rate: Rate) -> Option<Payoff> {
    if balance <= Decimal::ZERO {
        return Some(Payoff::Months(0));
    }
    if payment <= Decimal::ZERO {
        return Some(Payoff::Never);
    }
    if rate.is_zero() {
        let months = balance.checked_div(payment)?.ceil();
        return months.to_u32().map(Payoff::Months);
    }

    let monthly_interest = balance.checked_mul(rate)?;
    if payment <= monthly_interest {
        return Some(Payoff::Never);
    }

    let ratio = payment.checked_div(payment - monthly_interest)?;
    let numerator = ratio.checked_ln()?;
    let denominator = Decimal::ONE.checked_add(rate)?.checked_ln()?;
    let months = numerator.checked_div(denominator)?;
    (months - TENURE_EPSILON).ceil().to_u32().map(Payoff::Months)
}

/// Whole currency units, half away from zero.
pub fn round_currency(value: Money) -> Money {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Two-decimal percentage, half away from zero.
pub fn round_percent(value: Percent) -> Percent {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_compound_matches_repeated_multiplication() {
        let mut expected = Decimal::ONE;
        for _ in 0..37 {
            expected *= dec!(1.01);
        }
        let result = compound(dec!(0.01), 37).unwrap();
        assert!((result - expected).abs() < dec!(0.0000000001));
        assert_eq!(compound(dec!(0.05), 0), Some(Decimal::ONE));
    }

    #[test]
    fn test_compound_overflow_is_none() {
        assert_eq!(compound(dec!(10), 1_000), None);
    }

    #[test]
    fn test_amortizing_payment_basic() {
        // 100k at 1% per month over 12 months ≈ 8,884.88
        let pmt = amortizing_payment(dec!(100_000), dec!(0.01), 12).unwrap();
        assert!((pmt - dec!(8884.88)).abs() < dec!(0.01));
    }

    #[test]
    fn test_present_value_inverts_payment() {
        let rate = monthly_rate(dec!(9));
        let pmt = amortizing_payment(dec!(500_000), rate, 120).unwrap();
        let pv = annuity_present_value(pmt, rate, 120).unwrap();
        assert!((pv - dec!(500_000)).abs() < dec!(0.0001));
    }

    #[test]
    fn test_annuity_due_zero_rate() {
        assert_eq!(
            annuity_due_future_value(dec!(1000), Decimal::ZERO, 24),
            Some(dec!(24000))
        );
    }

    #[test]
    fn test_outstanding_balance_endpoints() {
        let rate = monthly_rate(dec!(10));
        let start = outstanding_balance(dec!(1_000_000), rate, 120, 0).unwrap();
        assert!((start - dec!(1_000_000)).abs() < dec!(0.0001));
        assert_eq!(
            outstanding_balance(dec!(1_000_000), rate, 120, 120),
            Some(Decimal::ZERO)
        );
        assert_eq!(
            outstanding_balance(dec!(1_200), Decimal::ZERO, 12, 3),
            Some(dec!(900))
        );
    }

    #[test]
    fn test_payoff_months_recovers_schedule() {
        let rate = monthly_rate(dec!(8));
        let pmt = amortizing_payment(dec!(250_000), rate, 60).unwrap();
        assert_eq!(payoff_months(dec!(250_000), pmt, rate), Some(Payoff::Months(60)));
    }

    #[test]
    fn test_payoff_never_when_interest_not_covered() {
        let rate = monthly_rate(dec!(12));
        // Interest on 100k at 1%/month is 1,000
        assert_eq!(payoff_months(dec!(100_000), dec!(1_000), rate), Some(Payoff::Never));
    }

    #[test]
    fn test_payoff_zero_rate_rounds_up() {
        assert_eq!(
            payoff_months(dec!(1_001), dec!(100), Decimal::ZERO),
            Some(Payoff::Months(11))
        );
    }

    #[test]
    fn test_rounding_half_away_from_zero() {
        assert_eq!(round_currency(dec!(2.5)), dec!(3));
        assert_eq!(round_currency(dec!(8678.2323)), dec!(8678));
        assert_eq!(round_percent(dec!(7.18590)), dec!(7.19));
    }
}
