use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinCalcError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    #[error("Unknown loan type: {0}")]
    UnknownLoanType(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for FinCalcError {
    fn from(e: serde_json::Error) -> Self {
        FinCalcError::SerializationError(e.to_string())
    }
}

/// Why an engine fell back to its zero-valued result.
///
/// Engines never surface this as an error; it only feeds the warnings of
/// the enveloped entry points and the trace log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degenerate {
    #[error("{0} must be positive; returning zero result")]
    NonPositive(&'static str),

    #[error("{0} must not be negative; returning zero result")]
    Negative(&'static str),

    #[error("arithmetic overflow; returning zero result")]
    Overflow,
}

impl Degenerate {
    pub(crate) fn trace(&self, engine: &'static str) {
        tracing::warn!(engine, reason = %self, "degenerate input");
    }
}
