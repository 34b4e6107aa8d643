use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// The record piped on stdin as JSON. An interactive terminal or an empty
/// pipe yields `None`.
pub fn read_piped<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(text: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let record = serde_json::from_str(trimmed)
        .map_err(|e| format!("Failed to parse stdin as JSON: {e}"))?;
    tracing::debug!(bytes = trimmed.len(), "read input from stdin");
    Ok(Some(record))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincalc_core::deposits::sip::SipInput;
    use rust_decimal_macros::dec;

    #[test]
    fn blank_pipe_means_no_record() {
        assert!(parse_piped::<SipInput>("  \n").unwrap().is_none());
    }

    #[test]
    fn piped_json_becomes_the_record() {
        let record: SipInput = parse_piped(
            r#"{"monthly_investment": 5000, "annual_return_pct": "12", "years": 10}"#,
        )
        .unwrap()
        .unwrap();
        assert_eq!(record.monthly_investment, dec!(5000));
        assert_eq!(record.years, 10);
    }

    #[test]
    fn malformed_pipe_names_stdin() {
        let err = parse_piped::<SipInput>("{not json").unwrap_err();
        assert!(err.to_string().contains("stdin"));
    }
}
