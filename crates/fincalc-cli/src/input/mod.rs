//! Where a command's input record comes from.
//!
//! Precedence: an `--input` file, then JSON piped on stdin, then the
//! command's own flags.

pub mod file;
pub mod stdin;

use serde::de::DeserializeOwned;

/// The record from `--input` or stdin, or `None` when the caller should
/// build it from flags.
pub fn resolve<T: DeserializeOwned>(
    path: Option<&str>,
) -> Result<Option<T>, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        return file::read_record(path).map(Some);
    }
    stdin::read_piped()
}

/// Value of a flag that must be present when no input record was given.
pub fn required<T>(value: Option<T>, flag: &str) -> Result<T, String> {
    value.ok_or_else(|| format!("--{flag} is required (or provide --input)"))
}
