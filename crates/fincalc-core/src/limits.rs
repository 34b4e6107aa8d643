//! Static input ranges for every calculator and loan type.
//!
//! These tables constrain what a front end offers (slider bounds, defaults
//! and steps). The engines never read them; they guard their own inputs.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::FinCalcError;
use crate::FinCalcResult;

/// Bounds, default and step for one numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    pub min: Decimal,
    pub max: Decimal,
    pub default: Decimal,
    pub step: Decimal,
}

impl SliderRange {
    pub const fn new(min: Decimal, max: Decimal, default: Decimal, step: Decimal) -> Self {
        SliderRange {
            min,
            max,
            default,
            step,
        }
    }

    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.max(self.min).min(self.max)
    }

    /// Nearest step position from `min`, clamped to the range.
    pub fn snap(&self, value: Decimal) -> Decimal {
        if self.step <= Decimal::ZERO {
            return self.clamp(value);
        }
        let steps = ((value - self.min) / self.step)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        self.clamp(self.min + steps * self.step)
    }

    /// `value` unchanged when inside the range, otherwise an
    /// [`FinCalcError::InvalidInput`] naming `field`.
    pub fn check(&self, field: &str, value: Decimal) -> FinCalcResult<Decimal> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(FinCalcError::InvalidInput {
                field: field.to_string(),
                reason: format!("must be between {} and {}", self.min, self.max),
            })
        }
    }
}

// ---------------------------------------------------------------------------
// Loan types (EMI calculator)
// ---------------------------------------------------------------------------

pub const GLOBAL_AMOUNT: SliderRange =
    SliderRange::new(dec!(50_000), dec!(5_000_000), dec!(100_000), dec!(1_000));
pub const GLOBAL_RATE: SliderRange = SliderRange::new(dec!(1.0), dec!(30.0), dec!(6.5), dec!(0.1));
pub const GLOBAL_TENURE_YEARS: SliderRange = SliderRange::new(dec!(1), dec!(30), dec!(5), dec!(1));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoanType {
    Personal,
    Home,
    Car,
    Education,
}

/// Per-loan-type ranges; bounds are shared, defaults differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanTypeLimits {
    pub loan_type: LoanType,
    pub name: &'static str,
    pub icon: &'static str,
    pub amount: SliderRange,
    pub rate_pct: SliderRange,
    pub tenure_years: SliderRange,
}

impl LoanType {
    pub const ALL: [LoanType; 4] = [
        LoanType::Personal,
        LoanType::Home,
        LoanType::Car,
        LoanType::Education,
    ];

    pub fn limits(self) -> LoanTypeLimits {
        let (name, icon, amount, rate, tenure) = match self {
            LoanType::Personal => ("Personal Loan", "👤", dec!(50_000), dec!(12.0), dec!(2)),
            LoanType::Home => ("Home Loan", "🏠", dec!(2_000_000), dec!(8.5), dec!(20)),
            LoanType::Car => ("Car Loan", "🚗", dec!(500_000), dec!(9.0), dec!(5)),
            LoanType::Education => ("Education Loan", "🎓", dec!(200_000), dec!(6.5), dec!(7)),
        };
        LoanTypeLimits {
            loan_type: self,
            name,
            icon,
            amount: SliderRange {
                default: amount,
                ..GLOBAL_AMOUNT
            },
            rate_pct: SliderRange {
                default: rate,
                ..GLOBAL_RATE
            },
            tenure_years: SliderRange {
                default: tenure,
                ..GLOBAL_TENURE_YEARS
            },
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = match self {
            LoanType::Personal => "personal",
            LoanType::Home => "home",
            LoanType::Car => "car",
            LoanType::Education => "education",
        };
        f.write_str(id)
    }
}

impl FromStr for LoanType {
    type Err = FinCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        LoanType::ALL
            .into_iter()
            .find(|t| t.to_string() == wanted)
            .ok_or_else(|| FinCalcError::UnknownLoanType(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Other calculators
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SipLimits {
    pub monthly_investment: SliderRange,
    pub annual_return_pct: SliderRange,
    pub years: SliderRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FdLimits {
    pub principal: SliderRange,
    pub annual_rate_pct: SliderRange,
    pub years: SliderRange,
    pub default_compounding_periods: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RdLimits {
    pub monthly_deposit: SliderRange,
    pub annual_rate_pct: SliderRange,
    pub years: SliderRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EligibilityLimits {
    pub monthly_income: SliderRange,
    pub existing_emi: SliderRange,
    pub annual_rate_pct: SliderRange,
    pub tenure_years: SliderRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PrepaymentLimits {
    pub loan_amount: SliderRange,
    pub annual_rate_pct: SliderRange,
    pub tenure_years: SliderRange,
    pub prepayment_amount: SliderRange,
    pub prepayment_year: SliderRange,
}

pub const SIP_LIMITS: SipLimits = SipLimits {
    monthly_investment: SliderRange::new(dec!(500), dec!(100_000), dec!(5_000), dec!(500)),
    annual_return_pct: SliderRange::new(dec!(1), dec!(30), dec!(12), dec!(0.5)),
    years: SliderRange::new(dec!(1), dec!(40), dec!(10), dec!(1)),
};

pub const FD_LIMITS: FdLimits = FdLimits {
    principal: SliderRange::new(dec!(10_000), dec!(10_000_000), dec!(100_000), dec!(10_000)),
    annual_rate_pct: SliderRange::new(dec!(1), dec!(15), dec!(7), dec!(0.1)),
    years: SliderRange::new(dec!(1), dec!(10), dec!(5), dec!(1)),
    default_compounding_periods: 4,
};

pub const RD_LIMITS: RdLimits = RdLimits {
    monthly_deposit: SliderRange::new(dec!(500), dec!(100_000), dec!(5_000), dec!(500)),
    annual_rate_pct: SliderRange::new(dec!(1), dec!(10), dec!(6.5), dec!(0.1)),
    years: SliderRange::new(dec!(1), dec!(10), dec!(5), dec!(1)),
};

pub const ELIGIBILITY_LIMITS: EligibilityLimits = EligibilityLimits {
    monthly_income: SliderRange::new(dec!(10_000), dec!(1_000_000), dec!(50_000), dec!(5_000)),
    existing_emi: SliderRange::new(dec!(0), dec!(200_000), dec!(0), dec!(1_000)),
    annual_rate_pct: SliderRange::new(dec!(5), dec!(20), dec!(9), dec!(0.5)),
    tenure_years: SliderRange::new(dec!(1), dec!(30), dec!(20), dec!(1)),
};

pub const PREPAYMENT_LIMITS: PrepaymentLimits = PrepaymentLimits {
    loan_amount: SliderRange::new(dec!(100_000), dec!(10_000_000), dec!(2_000_000), dec!(50_000)),
    annual_rate_pct: SliderRange::new(dec!(5), dec!(20), dec!(9), dec!(0.5)),
    tenure_years: SliderRange::new(dec!(1), dec!(30), dec!(20), dec!(1)),
    prepayment_amount: SliderRange::new(dec!(10_000), dec!(5_000_000), dec!(200_000), dec!(10_000)),
    prepayment_year: SliderRange::new(dec!(1), dec!(30), dec!(3), dec!(1)),
};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_loan_types_share_global_bounds() {
        for t in LoanType::ALL {
            let l = t.limits();
            assert_eq!(l.amount.min, GLOBAL_AMOUNT.min);
            assert_eq!(l.rate_pct.max, GLOBAL_RATE.max);
            assert!(l.amount.contains(l.amount.default));
            assert!(l.tenure_years.contains(l.tenure_years.default));
        }
        assert_eq!(LoanType::Home.limits().rate_pct.default, dec!(8.5));
        assert_eq!(LoanType::Home.limits().tenure_years.default, dec!(20));
    }

    #[test]
    fn test_loan_type_parse() {
        assert_eq!("Home".parse::<LoanType>().unwrap(), LoanType::Home);
        assert!(matches!(
            "boat".parse::<LoanType>(),
            Err(FinCalcError::UnknownLoanType(_))
        ));
    }

    #[test]
    fn test_snap_and_clamp() {
        let r = SIP_LIMITS.monthly_investment;
        assert_eq!(r.snap(dec!(5_240)), dec!(5_000));
        assert_eq!(r.snap(dec!(5_250)), dec!(5_500));
        assert_eq!(r.snap(dec!(10)), dec!(500));
        assert_eq!(r.clamp(dec!(1_000_000)), dec!(100_000));
    }

    #[test]
    fn test_check_reports_field() {
        let err = FD_LIMITS.years.check("years", dec!(25)).unwrap_err();
        assert!(err.to_string().contains("years"));
        assert_eq!(FD_LIMITS.years.check("years", dec!(5)).unwrap(), dec!(5));
    }
}
