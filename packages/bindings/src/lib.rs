use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Serialize;

use fincalc_core::currency::{self, CurrencyCode};
use fincalc_core::deposits::{fd, rd, sip};
use fincalc_core::limits::{
    LoanType, ELIGIBILITY_LIMITS, FD_LIMITS, PREPAYMENT_LIMITS, RD_LIMITS, SIP_LIMITS,
};
use fincalc_core::loans::{eligibility, emi, prepayment};
use fincalc_core::{FinCalcError, FinCalcResult};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Decode a JSON input record, run `calculate`, and encode its envelope.
fn run_json<I, O>(input_json: &str, calculate: impl FnOnce(&I) -> O) -> FinCalcResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json)?;
    Ok(serde_json::to_string(&calculate(&input))?)
}

fn parse_amount(amount: &str) -> FinCalcResult<Decimal> {
    amount
        .trim()
        .parse()
        .map_err(|e: rust_decimal::Error| FinCalcError::InvalidInput {
            field: "amount".into(),
            reason: e.to_string(),
        })
}

// ---------------------------------------------------------------------------
// Loans
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    run_json(&input_json, emi::calculate_emi).map_err(to_napi_error)
}

#[napi]
pub fn calculate_eligibility(input_json: String) -> NapiResult<String> {
    run_json(&input_json, eligibility::calculate_eligibility).map_err(to_napi_error)
}

#[napi]
pub fn calculate_prepayment(input_json: String) -> NapiResult<String> {
    run_json(&input_json, prepayment::calculate_prepayment).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Deposits & investments
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_sip(input_json: String) -> NapiResult<String> {
    run_json(&input_json, sip::calculate_sip).map_err(to_napi_error)
}

#[napi]
pub fn calculate_fd(input_json: String) -> NapiResult<String> {
    run_json(&input_json, fd::calculate_fd).map_err(to_napi_error)
}

#[napi]
pub fn calculate_rd(input_json: String) -> NapiResult<String> {
    run_json(&input_json, rd::calculate_rd).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// Amounts cross the boundary as decimal strings to keep full precision.
#[napi]
pub fn format_currency(amount: String, code: String) -> NapiResult<String> {
    let code: CurrencyCode = code.parse().map_err(to_napi_error)?;
    let amount = parse_amount(&amount).map_err(to_napi_error)?;
    Ok(currency::format_currency(amount, code))
}

#[napi]
pub fn format_compact_inr(amount: String) -> NapiResult<String> {
    let amount = parse_amount(&amount).map_err(to_napi_error)?;
    Ok(currency::format_compact_inr(amount))
}

/// `code` picks the locale for text that carries no currency symbol.
#[napi]
pub fn parse_currency(text: String, code: Option<String>) -> NapiResult<String> {
    let amount = match code {
        Some(code) => {
            let fallback: CurrencyCode = code.parse().map_err(to_napi_error)?;
            let code = CurrencyCode::detect(&text).unwrap_or(fallback);
            currency::parse_currency_in(&text, code)
        }
        None => currency::parse_currency(&text),
    };
    Ok(amount.to_string())
}

#[napi]
pub fn currencies() -> NapiResult<String> {
    serde_json::to_string(&currency::currencies()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_type_limits(loan_type: String) -> NapiResult<String> {
    let loan_type: LoanType = loan_type.parse().map_err(to_napi_error)?;
    serde_json::to_string(&loan_type.limits()).map_err(to_napi_error)
}

#[napi]
pub fn calculator_limits() -> NapiResult<String> {
    let loan_types: Vec<_> = LoanType::ALL.iter().map(|t| t.limits()).collect();
    serde_json::to_string(&serde_json::json!({
        "loan_types": loan_types,
        "sip": SIP_LIMITS,
        "fd": FD_LIMITS,
        "rd": RD_LIMITS,
        "eligibility": ELIGIBILITY_LIMITS,
        "prepayment": PREPAYMENT_LIMITS,
    }))
    .map_err(to_napi_error)
}
