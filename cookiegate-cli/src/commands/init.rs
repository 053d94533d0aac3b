use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::templates;

/// Validate that the endpoint id is usable as a TOML string without escaping.
fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() {
        bail!("Endpoint id cannot be empty");
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.') {
        bail!("invalid endpoint id: \"{}\"", id);
    }
    Ok(())
}

/// Write a starter configuration into `dir`.
pub fn run(dir: &Path, endpoint_id: &str, session_cookie: &str) -> Result<()> {
    validate_id(endpoint_id)?;

    let files = templates::starter_config(endpoint_id, session_cookie);
    for file in &files {
        if dir.join(file.path).exists() {
            bail!("\"{}\" already exists", dir.join(file.path).display());
        }
    }

    fs::create_dir_all(dir).with_context(|| format!("failed to create directory {}", dir.display()))?;
    for file in &files {
        let dest = dir.join(file.path);
        fs::write(&dest, &file.content).with_context(|| format!("failed to write {}", dest.display()))?;
    }

    println!("Wrote {} files to {}.", files.len(), dir.display());
    println!();
    println!("  cookiegate check --config {}", dir.join("cookiegate.toml").display());

    Ok(())
}
