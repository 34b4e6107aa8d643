use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read an input record from a `.json`, `.yaml` or `.yml` file.
pub fn read_record<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let path = existing_file(path)?;
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;

    let parsed = match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&contents).map_err(|e| e.to_string()),
        _ => serde_json::from_str(&contents).map_err(|e| e.to_string()),
    };
    tracing::debug!(path = %path.display(), "read input file");
    parsed.map_err(|e| format!("Failed to parse '{}': {}", path.display(), e).into())
}

fn existing_file(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let full = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !full.exists() {
        return Err(format!("File not found: {}", full.display()).into());
    }
    if !full.is_file() {
        return Err(format!("Not a file: {}", full.display()).into());
    }
    Ok(full)
}
