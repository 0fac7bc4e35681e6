use std::path::PathBuf;

use anyhow::{Error, Result};
use clap::Args;
use serde_json::json;

use crate::flatten::{self, FlattenConfig, PARSE_WARNING_KEY};
use crate::models::{DetailField, ReportCommandFailure, ReportEnvelope};
use crate::pipeline;

use super::{load_result_set, print_envelope};

#[derive(Debug, Clone, Args)]
pub struct DetailsArgs {
    #[arg(value_name = "RESULTS_JSON")]
    pub results: PathBuf,

    /// Zero-based row index within the result set.
    #[arg(long)]
    pub row: usize,

    #[arg(long, default_value_t = 2)]
    pub max_depth: usize,

    #[arg(long, default_value_t = 200)]
    pub max_entries: usize,
}

pub fn run(args: &DetailsArgs) -> Result<()> {
    let result_set = load_result_set(&args.results).map_err(|error| {
        let envelope = ReportEnvelope::error(
            "details",
            "result_set_unreadable",
            "failed to load result set",
        )
        .with_meta("results_path", json!(args.results.display().to_string()))
        .with_error_details(json!({ "cause": format!("{error:#}") }));
        Error::new(ReportCommandFailure::runtime(envelope))
    })?;

    let Some(row) = result_set.rows.get(args.row) else {
        let envelope = ReportEnvelope::error(
            "details",
            "row_out_of_range",
            format!("row index {} is out of range", args.row),
        )
        .with_meta("results_path", json!(args.results.display().to_string()))
        .with_meta("row_count", json!(result_set.rows.len()));
        return Err(Error::new(ReportCommandFailure::runtime(envelope)));
    };

    let flatten_config = FlattenConfig {
        max_depth: args.max_depth,
        max_entries: args.max_entries,
    };
    let row_details = flatten::build_details(&result_set.columns, row, &flatten_config);
    let fields = pipeline::detail_fields(&row_details);

    let field_count = fields.len();
    let data = serde_json::to_value(&fields).map_err(|error| {
        let envelope = ReportEnvelope::error(
            "details",
            "response_encode_failed",
            "failed to encode detail fields",
        )
        .with_error_details(json!({ "cause": format!("{error:#}") }));
        Error::new(ReportCommandFailure::runtime(envelope))
    })?;

    let mut envelope = ReportEnvelope::ok("details", json!({ "fields": data }))
        .with_meta("results_path", json!(args.results.display().to_string()))
        .with_meta("row", json!(args.row))
        .with_meta("field_count", json!(field_count))
        .with_meta("max_depth", json!(args.max_depth))
        .with_meta("max_entries", json!(args.max_entries));
    if let Some(warning) = payload_parse_warning(&row_details.fields) {
        envelope = envelope.with_warning("payload_not_structured", warning.value.clone());
    }

    print_envelope(&envelope)
}

/// The flattening engine marks a degraded payload with a reserved warning
/// field; that field also surfaces in the envelope's warnings array.
fn payload_parse_warning(fields: &[DetailField]) -> Option<&DetailField> {
    fields.iter().find(|field| field.key == PARSE_WARNING_KEY)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::flatten::{FlattenConfig, flatten_payload};

    use super::payload_parse_warning;

    #[test]
    fn degraded_payload_surfaces_a_warning() {
        let fields = flatten_payload(&json!("not json"), &FlattenConfig::default());
        let warning = payload_parse_warning(&fields).expect("warning field should exist");
        assert!(warning.value.contains("not valid JSON"));
    }

    #[test]
    fn structured_payload_surfaces_no_warning() {
        let fields = flatten_payload(&json!({"zone": "eu"}), &FlattenConfig::default());
        assert!(payload_parse_warning(&fields).is_none());
    }
}
