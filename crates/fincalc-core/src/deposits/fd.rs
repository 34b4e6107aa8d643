//! Fixed Deposit maturity with a selectable compounding frequency.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::Degenerate;
use crate::time_value::{compound, round_currency, round_percent};
use crate::types::{ComputationOutput, Money, Percent};

/// Label reported when no maturity could be computed.
pub const NOT_APPLICABLE: &str = "N/A";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Supported interest compounding conventions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compounding {
    Monthly,
    #[default]
    Quarterly,
    HalfYearly,
    Yearly,
}

impl Compounding {
    pub const ALL: [Compounding; 4] = [
        Compounding::Monthly,
        Compounding::Quarterly,
        Compounding::HalfYearly,
        Compounding::Yearly,
    ];

    pub fn periods_per_year(self) -> u32 {
        match self {
            Compounding::Monthly => 12,
            Compounding::Quarterly => 4,
            Compounding::HalfYearly => 2,
            Compounding::Yearly => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Compounding::Monthly => "Monthly",
            Compounding::Quarterly => "Quarterly",
            Compounding::HalfYearly => "Half-Yearly",
            Compounding::Yearly => "Yearly",
        }
    }

    pub fn from_periods(periods: u32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.periods_per_year() == periods)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub years: u32,
    /// Compounding periods per year: 12, 4, 2 or 1.
    #[serde(default = "default_periods")]
    pub compounding_periods_per_year: u32,
}

fn default_periods() -> u32 {
    Compounding::default().periods_per_year()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FdResult {
    pub principal: Money,
    pub maturity_amount: Money,
    pub interest_earned: Money,
    pub annual_rate_pct: Percent,
    pub years: u32,
    /// Convention actually used; `None` when no maturity was computed.
    pub compounding: Option<Compounding>,
    pub compounding_label: String,
    /// (1 + rate/n)^n − 1, in percent to two decimals.
    pub effective_annual_rate_pct: Percent,
}

impl FdResult {
    pub fn zero() -> Self {
        FdResult {
            principal: Decimal::ZERO,
            maturity_amount: Decimal::ZERO,
            interest_earned: Decimal::ZERO,
            annual_rate_pct: Decimal::ZERO,
            years: 0,
            compounding: None,
            compounding_label: NOT_APPLICABLE.to_string(),
            effective_annual_rate_pct: Decimal::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Maturity of a lump-sum deposit: A = P·(1 + rate/n)^(n·years).
///
/// An unsupported `compounding_periods_per_year` falls back to quarterly
/// compounding, and the returned label always names the convention the
/// arithmetic used.
pub fn compute_fd(
    principal: Money,
    annual_rate_pct: Percent,
    years: u32,
    compounding_periods_per_year: u32,
) -> FdResult {
    let input = FdInput {
        principal,
        annual_rate_pct,
        years,
        compounding_periods_per_year,
    };
    solve(&input).unwrap_or_else(|reason| {
        reason.trace("fd");
        FdResult::zero()
    })
}

pub fn calculate_fd(input: &FdInput) -> ComputationOutput<FdResult> {
    let start = Instant::now();
    let mut warnings = Vec::new();

    if Compounding::from_periods(input.compounding_periods_per_year).is_none() {
        warnings.push(format!(
            "Unsupported compounding frequency {}; using quarterly",
            input.compounding_periods_per_year
        ));
    }

    let result = match solve(input) {
        Ok(result) => result,
        Err(reason) => {
            reason.trace("fd");
            warnings.push(reason.to_string());
            FdResult::zero()
        }
    };

    ComputationOutput::new(
        start,
        "Compound interest: P·(1 + r/n)^(n·t)",
        input,
        warnings,
        result,
    )
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn solve(input: &FdInput) -> Result<FdResult, Degenerate> {
    if input.principal <= Decimal::ZERO {
        return Err(Degenerate::NonPositive("principal"));
    }
    if input.years == 0 {
        return Err(Degenerate::NonPositive("years"));
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(Degenerate::Negative("annual_rate_pct"));
    }

    let compounding =
        Compounding::from_periods(input.compounding_periods_per_year).unwrap_or_default();

    if input.annual_rate_pct.is_zero() {
        return Ok(FdResult {
            principal: input.principal,
            maturity_amount: input.principal,
            interest_earned: Decimal::ZERO,
            annual_rate_pct: Decimal::ZERO,
            years: input.years,
            compounding: Some(compounding),
            compounding_label: compounding.label().to_string(),
            effective_annual_rate_pct: Decimal::ZERO,
        });
    }

    let periods = compounding.periods_per_year();
    let periodic_rate = input.annual_rate_pct / dec!(100) / Decimal::from(periods);
    let growth = compound(periodic_rate, periods.saturating_mul(input.years))
        .ok_or(Degenerate::Overflow)?;
    let maturity = input
        .principal
        .checked_mul(growth)
        .ok_or(Degenerate::Overflow)?;
    let effective = (compound(periodic_rate, periods).ok_or(Degenerate::Overflow)? - Decimal::ONE)
        .checked_mul(dec!(100))
        .ok_or(Degenerate::Overflow)?;
    tracing::debug!(periods, %maturity, %effective, "fd computed");

    Ok(FdResult {
        principal: input.principal,
        maturity_amount: round_currency(maturity),
        interest_earned: round_currency(maturity - input.principal),
        annual_rate_pct: input.annual_rate_pct,
        years: input.years,
        compounding: Some(compounding),
        compounding_label: compounding.label().to_string(),
        effective_annual_rate_pct: round_percent(effective),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quarterly_fd() {
        let r = compute_fd(dec!(100_000), dec!(7), 5, 4);
        assert_eq!(r.maturity_amount, dec!(141_478));
        assert_eq!(r.interest_earned, dec!(41_478));
        assert_eq!(r.effective_annual_rate_pct, dec!(7.19));
        assert_eq!(r.compounding_label, "Quarterly");
    }

    #[test]
    fn test_more_frequent_compounding_earns_more() {
        let monthly = compute_fd(dec!(100_000), dec!(7), 5, 12);
        let yearly = compute_fd(dec!(100_000), dec!(7), 5, 1);
        assert_eq!(monthly.maturity_amount, dec!(141_763));
        assert_eq!(yearly.maturity_amount, dec!(140_255));
        assert_eq!(monthly.effective_annual_rate_pct, dec!(7.23));
        assert_eq!(yearly.effective_annual_rate_pct, dec!(7.00));
    }

    #[test]
    fn test_unsupported_frequency_keeps_label_and_math_in_sync() {
        let odd = compute_fd(dec!(100_000), dec!(7), 5, 7);
        let quarterly = compute_fd(dec!(100_000), dec!(7), 5, 4);
        assert_eq!(odd.compounding, Some(Compounding::Quarterly));
        assert_eq!(odd.maturity_amount, quarterly.maturity_amount);

        let out = calculate_fd(&FdInput {
            principal: dec!(100_000),
            annual_rate_pct: dec!(7),
            years: 5,
            compounding_periods_per_year: 0,
        });
        assert_eq!(out.result.compounding_label, "Quarterly");
        assert!(out.warnings[0].contains("Unsupported compounding"));
    }

    #[test]
    fn test_zero_rate_returns_principal() {
        let r = compute_fd(dec!(50_000), Decimal::ZERO, 3, 12);
        assert_eq!(r.maturity_amount, dec!(50_000));
        assert_eq!(r.effective_annual_rate_pct, Decimal::ZERO);
        assert_eq!(r.compounding_label, "Monthly");
    }

    #[test]
    fn test_degenerate_inputs_label_na() {
        let r = compute_fd(dec!(-5), dec!(5), 5, 4);
        assert_eq!(r, FdResult::zero());
        assert_eq!(r.compounding_label, "N/A");
        assert_eq!(compute_fd(dec!(10_000), dec!(5), 0, 4).compounding, None);
    }

    #[test]
    fn test_compounding_round_trip() {
        for c in Compounding::ALL {
            assert_eq!(Compounding::from_periods(c.periods_per_year()), Some(c));
        }
        assert_eq!(Compounding::from_periods(3), None);
    }
}
