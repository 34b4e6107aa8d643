use clap::{Args, ValueEnum};
use serde_json::{json, Value};

use fincalc_core::limits::{
    LoanType, ELIGIBILITY_LIMITS, FD_LIMITS, PREPAYMENT_LIMITS, RD_LIMITS, SIP_LIMITS,
};

/// Arguments for listing input limits
#[derive(Args)]
pub struct LimitsArgs {
    /// Only this loan type's EMI ranges
    #[arg(long, conflicts_with = "calculator")]
    pub loan_type: Option<LoanType>,

    /// Only this calculator's ranges
    #[arg(long, value_enum)]
    pub calculator: Option<Calculator>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Calculator {
    Sip,
    Fd,
    Rd,
    Eligibility,
    Prepayment,
}

pub fn run_limits(args: LimitsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(loan_type) = args.loan_type {
        return Ok(serde_json::to_value(loan_type.limits())?);
    }

    let value = match args.calculator {
        Some(Calculator::Sip) => serde_json::to_value(SIP_LIMITS)?,
        Some(Calculator::Fd) => serde_json::to_value(FD_LIMITS)?,
        Some(Calculator::Rd) => serde_json::to_value(RD_LIMITS)?,
        Some(Calculator::Eligibility) => serde_json::to_value(ELIGIBILITY_LIMITS)?,
        Some(Calculator::Prepayment) => serde_json::to_value(PREPAYMENT_LIMITS)?,
        None => {
            let loan_types: Vec<_> = LoanType::ALL.iter().map(|t| t.limits()).collect();
            json!({
                "loan_types": loan_types,
                "sip": SIP_LIMITS,
                "fd": FD_LIMITS,
                "rd": RD_LIMITS,
                "eligibility": ELIGIBILITY_LIMITS,
                "prepayment": PREPAYMENT_LIMITS,
            })
        }
    };
    Ok(value)
}
