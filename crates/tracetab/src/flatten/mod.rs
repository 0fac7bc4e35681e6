use serde_json::Value;

use crate::models::{Column, DetailField, result_set::column_index};

/// Well-known result columns. Primary name first, fallback second; lookup is
/// case-insensitive either way.
pub const TIMESTAMP_COLUMN: &str = "timestamp";
pub const TIMESTAMP_COLUMN_FALLBACK: &str = "time";
pub const MESSAGE_COLUMN: &str = "message";
pub const MESSAGE_COLUMN_FALLBACK: &str = "msg";
pub const PAYLOAD_COLUMN: &str = "customDimensions";
pub const PAYLOAD_COLUMN_FALLBACK: &str = "properties";

/// Reserved keys used when the payload cannot be flattened structurally.
pub const RAW_VALUE_KEY: &str = "raw";
pub const PARSE_WARNING_KEY: &str = "warning";

pub const PARSE_WARNING_PRIORITY: u8 = 0;
pub const FLATTENED_FIELD_PRIORITY: u8 = 10;

/// Bounds for one row's flattening pass. Explicit so tests can exercise the
/// boundary values directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlattenConfig {
    /// Nesting levels flattened into dotted/indexed keys; deeper compound
    /// values are serialized compactly instead of recursed.
    pub max_depth: usize,
    /// Hard cap on flattened entries per row.
    pub max_entries: usize,
}

impl Default for FlattenConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_entries: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RowDetails {
    pub timestamp: String,
    pub message: String,
    pub fields: Vec<DetailField>,
}

/// Turns one row into display-ready detail fields. Never fails: malformed
/// payloads degrade to a raw value plus a warning field.
#[must_use]
pub fn build_details(columns: &[Column], row: &[Value], config: &FlattenConfig) -> RowDetails {
    let timestamp = scalar_column_text(columns, row, TIMESTAMP_COLUMN, TIMESTAMP_COLUMN_FALLBACK);
    let message = scalar_column_text(columns, row, MESSAGE_COLUMN, MESSAGE_COLUMN_FALLBACK);
    let payload = column_value(columns, row, PAYLOAD_COLUMN, PAYLOAD_COLUMN_FALLBACK);

    let fields = match payload {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => flatten_payload(value, config),
    };

    RowDetails {
        timestamp,
        message,
        fields,
    }
}

/// Flattens one payload value into sorted, bounded detail fields.
#[must_use]
pub fn flatten_payload(payload: &Value, config: &FlattenConfig) -> Vec<DetailField> {
    let parsed;
    let root = match payload {
        Value::Object(_) | Value::Array(_) => payload,
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(value) => {
                parsed = value;
                &parsed
            }
            Err(_) => {
                return degraded_fields(
                    text.clone(),
                    "payload is not valid JSON; showing raw value",
                    config,
                );
            }
        },
        scalar => {
            return degraded_fields(
                scalar_text(scalar),
                "payload is not structured; showing raw value",
                config,
            );
        }
    };

    let mut entries = Vec::new();
    let mut budget = config.max_entries;
    collect_entries(root, String::new(), config.max_depth, &mut budget, &mut entries);

    sort_entries(&mut entries);

    entries
        .into_iter()
        .map(|(key, value)| DetailField::custom(key, value, FLATTENED_FIELD_PRIORITY))
        .collect()
}

fn degraded_fields(raw: String, warning: &'static str, config: &FlattenConfig) -> Vec<DetailField> {
    let mut fields = Vec::with_capacity(2);
    fields.push(DetailField::custom(
        PARSE_WARNING_KEY,
        warning,
        PARSE_WARNING_PRIORITY,
    ));
    if config.max_entries > 0 {
        fields.push(DetailField::custom(
            RAW_VALUE_KEY,
            raw,
            FLATTENED_FIELD_PRIORITY,
        ));
    }
    fields
}

/// Structural recursion with depth and entry budgets threaded through every
/// call. The budget is checked before descending into a collection and again
/// per child, so a huge sibling list cannot overshoot the cap.
fn collect_entries(
    value: &Value,
    prefix: String,
    depth_remaining: usize,
    budget: &mut usize,
    entries: &mut Vec<(String, String)>,
) {
    if *budget == 0 {
        return;
    }

    match value {
        Value::Object(map) => {
            if map.is_empty() {
                push_entry(entries, budget, prefix, "{}".to_string());
                return;
            }
            if depth_remaining == 0 {
                push_entry(entries, budget, prefix, compact_text(value));
                return;
            }
            for (key, child) in map {
                if *budget == 0 {
                    return;
                }
                let child_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                collect_entries(child, child_prefix, depth_remaining - 1, budget, entries);
            }
        }
        Value::Array(items) => {
            if items.is_empty() {
                push_entry(entries, budget, prefix, "[]".to_string());
                return;
            }
            if depth_remaining == 0 {
                push_entry(entries, budget, prefix, compact_text(value));
                return;
            }
            for (index, child) in items.iter().enumerate() {
                if *budget == 0 {
                    return;
                }
                collect_entries(
                    child,
                    format!("{prefix}[{index}]"),
                    depth_remaining - 1,
                    budget,
                    entries,
                );
            }
        }
        scalar => push_entry(entries, budget, prefix, scalar_text(scalar)),
    }
}

fn push_entry(entries: &mut Vec<(String, String)>, budget: &mut usize, prefix: String, text: String) {
    if *budget == 0 {
        return;
    }
    *budget -= 1;

    let key = if prefix.is_empty() {
        RAW_VALUE_KEY.to_string()
    } else {
        prefix
    };
    entries.push((key, text));
}

/// Case-insensitive key order with a case-sensitive ordinal tie-break, so
/// structurally identical payloads always render identically.
fn sort_entries(entries: &mut [(String, String)]) {
    entries.sort_by(|left, right| {
        left.0
            .to_lowercase()
            .cmp(&right.0.to_lowercase())
            .then_with(|| left.0.cmp(&right.0))
    });
}

fn scalar_column_text(
    columns: &[Column],
    row: &[Value],
    primary: &str,
    fallback: &str,
) -> String {
    column_value(columns, row, primary, fallback)
        .map(scalar_text)
        .unwrap_or_default()
}

fn column_value<'a>(
    columns: &[Column],
    row: &'a [Value],
    primary: &str,
    fallback: &str,
) -> Option<&'a Value> {
    let index = column_index(columns, primary).or_else(|| column_index(columns, fallback))?;
    row.get(index)
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        Value::String(text) => text.clone(),
        Value::Array(_) | Value::Object(_) => compact_text(value),
    }
}

fn compact_text(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}
