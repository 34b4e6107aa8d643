use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use fincalc_core::deposits::fd::{self, Compounding, FdInput};
use fincalc_core::deposits::rd::{self, RdInput};
use fincalc_core::deposits::sip::{self, SipInput};

use crate::input::{self, required};

/// Arguments for a SIP projection
#[derive(Args)]
pub struct SipArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount invested every month
    #[arg(long, alias = "amount")]
    pub monthly: Option<Decimal>,

    /// Expected annual return in percent
    #[arg(long, alias = "rate")]
    pub return_pct: Option<Decimal>,

    /// Investment period in years
    #[arg(long)]
    pub years: Option<u32>,
}

/// Arguments for a fixed deposit
#[derive(Args)]
pub struct FdArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount deposited
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Deposit period in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Compounding frequency
    #[arg(long, value_enum, default_value = "quarterly", conflicts_with = "periods")]
    pub compounding: CompoundingArg,

    /// Compounding periods per year (12, 4, 2 or 1; others fall back to quarterly)
    #[arg(long)]
    pub periods: Option<u32>,
}

/// Arguments for a recurring deposit
#[derive(Args)]
pub struct RdArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount deposited every month
    #[arg(long, alias = "amount")]
    pub monthly: Option<Decimal>,

    /// Annual interest rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Deposit period in years
    #[arg(long)]
    pub years: Option<u32>,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CompoundingArg {
    Monthly,
    Quarterly,
    HalfYearly,
    Yearly,
}

impl From<CompoundingArg> for Compounding {
    fn from(arg: CompoundingArg) -> Self {
        match arg {
            CompoundingArg::Monthly => Compounding::Monthly,
            CompoundingArg::Quarterly => Compounding::Quarterly,
            CompoundingArg::HalfYearly => Compounding::HalfYearly,
            CompoundingArg::Yearly => Compounding::Yearly,
        }
    }
}

pub fn run_sip(args: SipArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sip_input: SipInput = match input::resolve(args.input.as_deref())? {
        Some(record) => record,
        None => SipInput {
            monthly_investment: required(args.monthly, "monthly")?,
            annual_return_pct: required(args.return_pct, "return-pct")?,
            years: required(args.years, "years")?,
        },
    };

    let output = sip::calculate_sip(&sip_input);
    Ok(serde_json::to_value(output)?)
}

pub fn run_fd(args: FdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let fd_input: FdInput = match input::resolve(args.input.as_deref())? {
        Some(record) => record,
        None => FdInput {
            principal: required(args.principal, "principal")?,
            annual_rate_pct: required(args.rate, "rate")?,
            years: required(args.years, "years")?,
            compounding_periods_per_year: args
                .periods
                .unwrap_or_else(|| Compounding::from(args.compounding).periods_per_year()),
        },
    };

    let output = fd::calculate_fd(&fd_input);
    Ok(serde_json::to_value(output)?)
}

pub fn run_rd(args: RdArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rd_input: RdInput = match input::resolve(args.input.as_deref())? {
        Some(record) => record,
        None => RdInput {
            monthly_deposit: required(args.monthly, "monthly")?,
            annual_rate_pct: required(args.rate, "rate")?,
            years: required(args.years, "years")?,
        },
    };

    let output = rd::calculate_rd(&rd_input);
    Ok(serde_json::to_value(output)?)
}
