use clap::Args;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;

use fincalc_core::limits::{LoanType, SliderRange};
use fincalc_core::loans::eligibility::{self, EligibilityInput};
use fincalc_core::loans::emi::{self, EmiInput};
use fincalc_core::loans::prepayment::{self, PrepaymentInput};

use crate::input::{self, required};

/// Arguments for an EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long, alias = "annual-rate-pct")]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long, conflicts_with = "tenure_years")]
    pub tenure_months: Option<u32>,

    /// Tenure in years
    #[arg(long)]
    pub tenure_years: Option<u32>,

    /// Loan type (personal, home, car, education): fills missing flags with
    /// its defaults and checks values against its ranges
    #[arg(long)]
    pub loan_type: Option<LoanType>,

    /// With --loan-type, snap out-of-range values into range instead of
    /// rejecting them
    #[arg(long, requires = "loan_type")]
    pub clamp: bool,
}

/// Arguments for loan eligibility
#[derive(Args)]
pub struct EligibilityArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Net monthly income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// EMIs already being paid each month
    #[arg(long, default_value = "0")]
    pub existing_emi: Decimal,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in years
    #[arg(long)]
    pub tenure_years: Option<u32>,
}

/// Arguments for prepayment analysis
#[derive(Args)]
pub struct PrepaymentArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Original loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Original tenure in years
    #[arg(long)]
    pub tenure_years: Option<u32>,

    /// Lump sum prepaid
    #[arg(long, alias = "prepayment")]
    pub amount: Option<Decimal>,

    /// Year (1-based) at whose start the lump sum is paid
    #[arg(long, alias = "prepayment-year")]
    pub year: Option<u32>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let emi_input: EmiInput = match input::resolve(args.input.as_deref())? {
        Some(record) => record,
        None => match args.loan_type {
            Some(loan_type) => emi_input_for_loan_type(&args, loan_type)?,
            None => EmiInput {
                principal: required(args.principal, "principal")?,
                annual_rate_pct: required(args.rate, "rate")?,
                tenure_months: match (args.tenure_months, args.tenure_years) {
                    (Some(months), _) => months,
                    (None, Some(years)) => years.saturating_mul(12),
                    (None, None) => {
                        return Err("--tenure-months or --tenure-years is required".into())
                    }
                },
            },
        },
    };

    let output = emi::calculate_emi(&emi_input);
    Ok(serde_json::to_value(output)?)
}

/// Build EMI input from a loan type's defaults, overridden by any flags.
fn emi_input_for_loan_type(
    args: &EmiArgs,
    loan_type: LoanType,
) -> Result<EmiInput, Box<dyn std::error::Error>> {
    let limits = loan_type.limits();
    let fit = |range: &SliderRange, field: &str, value: Decimal| {
        if args.clamp {
            Ok(range.snap(value))
        } else {
            range.check(field, value)
        }
    };

    let principal = fit(
        &limits.amount,
        "principal",
        args.principal.unwrap_or(limits.amount.default),
    )?;
    let rate = fit(
        &limits.rate_pct,
        "rate",
        args.rate.unwrap_or(limits.rate_pct.default),
    )?;
    let tenure_years = match (args.tenure_months, args.tenure_years) {
        (Some(months), _) => Decimal::from(months) / dec!(12),
        (None, Some(years)) => Decimal::from(years),
        (None, None) => limits.tenure_years.default,
    };
    let tenure_years = fit(&limits.tenure_years, "tenure", tenure_years)?;
    let tenure_months = (tenure_years * dec!(12))
        .round()
        .to_u32()
        .ok_or("tenure out of range")?;

    tracing::debug!(%loan_type, %principal, %rate, tenure_months, "loan type applied");
    Ok(EmiInput {
        principal,
        annual_rate_pct: rate,
        tenure_months,
    })
}

pub fn run_eligibility(args: EligibilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let elig_input: EligibilityInput = match input::resolve(args.input.as_deref())? {
        Some(record) => record,
        None => EligibilityInput {
            monthly_income: required(args.income, "income")?,
            existing_emi: args.existing_emi,
            annual_rate_pct: required(args.rate, "rate")?,
            tenure_years: required(args.tenure_years, "tenure-years")?,
        },
    };

    let output = eligibility::calculate_eligibility(&elig_input);
    Ok(serde_json::to_value(output)?)
}

pub fn run_prepayment(args: PrepaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let prepay_input: PrepaymentInput = match input::resolve(args.input.as_deref())? {
        Some(record) => record,
        None => PrepaymentInput {
            loan_amount: required(args.loan_amount, "loan-amount")?,
            annual_rate_pct: required(args.rate, "rate")?,
            tenure_years: required(args.tenure_years, "tenure-years")?,
            prepayment_amount: required(args.amount, "amount")?,
            prepayment_year: required(args.year, "year")?,
        },
    };

    let output = prepayment::calculate_prepayment(&prepay_input);
    Ok(serde_json::to_value(output)?)
}
