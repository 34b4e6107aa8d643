use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use fincalc_core::currency::{self, CurrencyCode};
use fincalc_core::FinCalcError;

/// Arguments for currency formatting
#[derive(Args)]
pub struct FormatArgs {
    /// Amount to format
    #[arg(required_unless_present = "parse", allow_negative_numbers = true)]
    pub amount: Option<Decimal>,

    /// Abbreviate rupee amounts to lakhs and crores
    #[arg(long)]
    pub compact: bool,

    /// Parse a formatted amount back to a number instead (text without a
    /// symbol is read in --currency)
    #[arg(long, conflicts_with = "amount")]
    pub parse: Option<String>,
}

/// Format in the global `--currency`.
pub fn run_format(
    args: FormatArgs,
    code: CurrencyCode,
) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(text) = args.parse {
        // A symbol in the text wins over --currency
        let code = CurrencyCode::detect(&text).unwrap_or(code);
        let amount = currency::parse_currency_in(&text, code);
        return Ok(json!({ "text": text, "amount": amount }));
    }

    let amount = args.amount.ok_or("an amount or --parse is required")?;
    if args.compact && code != CurrencyCode::INR {
        return Err(FinCalcError::InvalidInput {
            field: "compact".into(),
            reason: "lakh/crore abbreviation is only defined for INR".into(),
        }
        .into());
    }

    let formatted = if args.compact {
        currency::format_compact_inr(amount)
    } else {
        currency::format_currency(amount, code)
    };
    Ok(json!({
        "amount": amount,
        "currency": code,
        "formatted": formatted,
    }))
}

pub fn run_currencies() -> Result<Value, Box<dyn std::error::Error>> {
    Ok(serde_json::to_value(currency::currencies())?)
}
