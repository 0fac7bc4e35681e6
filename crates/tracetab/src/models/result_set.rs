use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const RESULT_SET_SCHEMA_VERSION: &str = "tracetab.result-set.v1";

/// One field of a tabular query result. The declared type is whatever the
/// telemetry backend reported; it is carried through for display only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,

    #[serde(default)]
    pub declared_type: String,
}

/// One record, index-aligned with the column list. Values are untyped JSON
/// because the payload shape differs per event identifier.
pub type Row = Vec<Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResultSet {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl ResultSet {
    /// Column lookup is case-insensitive; backends disagree on casing.
    #[must_use]
    pub fn column_index(&self, name: &str) -> Option<usize> {
        column_index(&self.columns, name)
    }
}

#[must_use]
pub fn column_index(columns: &[Column], name: &str) -> Option<usize> {
    columns
        .iter()
        .position(|column| column.name.eq_ignore_ascii_case(name))
}

#[must_use]
pub fn json_schema() -> Value {
    let schema = schemars::schema_for!(ResultSet);
    serde_json::to_value(schema).unwrap_or(Value::Null)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Column, ResultSet, json_schema};

    fn columns() -> Vec<Column> {
        vec![
            Column {
                name: "Timestamp".to_string(),
                declared_type: "datetime".to_string(),
            },
            Column {
                name: "customDimensions".to_string(),
                declared_type: "dynamic".to_string(),
            },
        ]
    }

    #[test]
    fn column_lookup_ignores_case() {
        let result_set = ResultSet {
            columns: columns(),
            rows: Vec::new(),
        };

        assert_eq!(result_set.column_index("timestamp"), Some(0));
        assert_eq!(result_set.column_index("CUSTOMDIMENSIONS"), Some(1));
        assert_eq!(result_set.column_index("message"), None);
    }

    #[test]
    fn decodes_camel_case_input() {
        let decoded: ResultSet = serde_json::from_value(json!({
            "columns": [
                {"name": "timestamp", "declaredType": "datetime"},
                {"name": "message"}
            ],
            "rows": [["2026-02-05T07:00:03Z", "started"]]
        }))
        .expect("result set should decode");

        assert_eq!(decoded.columns[0].declared_type, "datetime");
        assert_eq!(decoded.columns[1].declared_type, "");
        assert_eq!(decoded.rows.len(), 1);
    }

    #[test]
    fn schema_document_declares_columns_and_rows() {
        let schema = json_schema();
        let properties = schema
            .get("properties")
            .and_then(|value| value.as_object())
            .expect("schema should expose properties");

        assert!(properties.contains_key("columns"));
        assert!(properties.contains_key("rows"));
    }
}
