use std::path::Path;

use anyhow::{Context, Result};

use crate::models::{ReportEnvelope, ResultSet};

pub mod check;
pub mod details;
pub mod schema;
pub mod table;

pub(crate) fn print_envelope(envelope: &ReportEnvelope) -> Result<()> {
    let encoded = serde_json::to_string(envelope).context("failed to encode report envelope")?;
    println!("{encoded}");
    Ok(())
}

pub(crate) fn load_result_set(path: &Path) -> Result<ResultSet> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read result set file: {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse result set JSON: {}", path.display()))
}
