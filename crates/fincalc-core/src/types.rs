use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Currency amounts. Always `Decimal`, never `f64`.
pub type Money = Decimal;

/// Annual rates as entered by users, in percent (8.5 = 8.5%).
pub type Percent = Decimal;

/// Periodic rates expressed as decimals (0.005 = 0.5% per period).
pub type Rate = Decimal;

const PRECISION: &str = "rust_decimal_128bit";

/// Envelope returned by every `calculate_*` entry point: the result plus
/// the inputs it was computed from and anything the caller should know.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    /// The input record, echoed as JSON.
    pub assumptions: serde_json::Value,
    /// Degenerate input, fallbacks and clamps, in the order they occurred.
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

impl ComputationMetadata {
    /// Metadata for a computation that began at `started`.
    pub fn since(started: Instant) -> Self {
        ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX),
            precision: PRECISION.to_string(),
        }
    }
}

impl<T: Serialize> ComputationOutput<T> {
    /// Wrap a finished `result`, echoing `input` as the assumptions.
    pub fn new(
        started: Instant,
        methodology: &str,
        input: &impl Serialize,
        warnings: Vec<String>,
        result: T,
    ) -> Self {
        ComputationOutput {
            result,
            methodology: methodology.to_string(),
            assumptions: serde_json::to_value(input).unwrap_or_default(),
            warnings,
            metadata: ComputationMetadata::since(started),
        }
    }
}
