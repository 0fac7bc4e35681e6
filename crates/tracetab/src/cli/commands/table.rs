use std::path::PathBuf;

use anyhow::{Error, Result};
use clap::Args;
use serde_json::json;

use crate::flatten::FlattenConfig;
use crate::models::{ReportCommandFailure, ReportEnvelope};
use crate::pipeline;
use crate::rank::RankConfig;

use super::{load_result_set, print_envelope};

#[derive(Debug, Clone, Args)]
pub struct TableArgs {
    #[arg(value_name = "RESULTS_JSON")]
    pub results: PathBuf,

    /// Visible-row bound; rows past it are not flattened or displayed.
    #[arg(long)]
    pub max_rows_shown: Option<usize>,

    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    #[arg(long, default_value_t = 200)]
    pub max_entries: usize,
}

pub fn run(args: &TableArgs) -> Result<()> {
    let mut result_set = load_result_set(&args.results).map_err(|error| {
        let envelope = ReportEnvelope::error(
            "table",
            "result_set_unreadable",
            "failed to load result set",
        )
        .with_meta("results_path", json!(args.results.display().to_string()))
        .with_error_details(json!({ "cause": format!("{error:#}") }));
        Error::new(ReportCommandFailure::runtime(envelope))
    })?;

    let total_rows = result_set.rows.len();
    if let Some(limit) = args.max_rows_shown {
        result_set.rows.truncate(limit);
    }

    let flatten_config = FlattenConfig {
        max_depth: args.max_depth,
        max_entries: args.max_entries,
    };
    let table = pipeline::build_table(&result_set, &flatten_config, &RankConfig::default());

    let header_count = table.headers.len();
    let row_count = table.rows.len();
    let data = serde_json::to_value(&table).map_err(|error| {
        let envelope = ReportEnvelope::error(
            "table",
            "response_encode_failed",
            "failed to encode table view",
        )
        .with_error_details(json!({ "cause": format!("{error:#}") }));
        Error::new(ReportCommandFailure::runtime(envelope))
    })?;

    let envelope = ReportEnvelope::ok("table", data)
        .with_meta("results_path", json!(args.results.display().to_string()))
        .with_meta("row_count", json!(row_count))
        .with_meta("total_row_count", json!(total_rows))
        .with_meta("header_count", json!(header_count))
        .with_meta("max_depth", json!(args.max_depth))
        .with_meta("max_entries", json!(args.max_entries));

    print_envelope(&envelope)
}
