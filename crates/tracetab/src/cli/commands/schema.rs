use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::models::{RESULT_SET_SCHEMA_VERSION, ReportEnvelope, json_schema};

use super::print_envelope;

#[derive(Debug, Clone, Args)]
pub struct SchemaArgs {}

pub fn run(_args: &SchemaArgs) -> Result<()> {
    let envelope = ReportEnvelope::ok("schema", json_schema())
        .with_meta("result_set_schema_version", json!(RESULT_SET_SCHEMA_VERSION));

    print_envelope(&envelope)
}
