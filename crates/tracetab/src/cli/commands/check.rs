use anyhow::{Error, Result};
use clap::Args;
use serde_json::json;

use crate::guard;
use crate::models::{ReportCommandFailure, ReportEnvelope};

use super::print_envelope;

#[derive(Debug, Clone, Args)]
pub struct CheckArgs {
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Row bound appended when the query carries no take/limit stage.
    #[arg(long, default_value_t = 100)]
    pub max_rows: i64,
}

pub fn run(args: &CheckArgs) -> Result<()> {
    if let Err(error) = guard::validate(&args.query) {
        let envelope = ReportEnvelope::error("check", error.code(), error.to_string())
            .with_meta("query_length_bytes", json!(args.query.len()))
            .with_meta("max_rows", json!(args.max_rows));
        return Err(Error::new(ReportCommandFailure::validation(envelope)));
    }

    let outcome = guard::apply_fetch_limit(&args.query, args.max_rows);
    let envelope = ReportEnvelope::ok(
        "check",
        json!({
            "query": outcome.query,
            "applied": outcome.applied,
            "reason_code": outcome.reason.as_str(),
        }),
    )
    .with_meta("query_length_bytes", json!(args.query.len()))
    .with_meta("max_rows", json!(args.max_rows));

    print_envelope(&envelope)
}
