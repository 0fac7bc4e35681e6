use std::collections::BTreeMap;

use serde::Serialize;

use crate::flatten::{self, FlattenConfig, MESSAGE_COLUMN, RowDetails, TIMESTAMP_COLUMN};
use crate::models::{
    DetailField, ResultSet, STANDARD_MESSAGE_PRIORITY, STANDARD_TIMESTAMP_PRIORITY,
};
use crate::rank::{self, RankConfig};

/// Display-ready table: ranked headers plus one string cell per header per
/// row. Missing cells render as empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableView {
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, String>>,
}

/// Runs the display side of the pipeline: flatten every row, rank the
/// observed keys, project each row onto the ranked headers.
#[must_use]
pub fn build_table(
    result_set: &ResultSet,
    flatten_config: &FlattenConfig,
    rank_config: &RankConfig,
) -> TableView {
    let details: Vec<RowDetails> = result_set
        .rows
        .iter()
        .map(|row| flatten::build_details(&result_set.columns, row, flatten_config))
        .collect();

    let stats = rank::collect_key_stats(&details);
    let headers = rank::rank_headers([TIMESTAMP_COLUMN, MESSAGE_COLUMN], &stats, rank_config);

    let rows = details
        .iter()
        .map(|row_details| project_row(row_details, &headers))
        .collect();

    TableView { headers, rows }
}

/// Detail-view fields for one row: the fixed standard fields first, then the
/// payload-derived fields in their flattened order.
#[must_use]
pub fn detail_fields(row_details: &RowDetails) -> Vec<DetailField> {
    let mut fields = Vec::with_capacity(row_details.fields.len() + 2);
    fields.push(DetailField::standard(
        TIMESTAMP_COLUMN,
        row_details.timestamp.clone(),
        STANDARD_TIMESTAMP_PRIORITY,
    ));
    fields.push(DetailField::standard(
        MESSAGE_COLUMN,
        row_details.message.clone(),
        STANDARD_MESSAGE_PRIORITY,
    ));
    fields.extend(row_details.fields.iter().cloned());
    fields
}

fn project_row(row_details: &RowDetails, headers: &[String]) -> BTreeMap<String, String> {
    let mut cells = BTreeMap::new();
    for header in headers {
        let text = match header.as_str() {
            TIMESTAMP_COLUMN => row_details.timestamp.clone(),
            MESSAGE_COLUMN => row_details.message.clone(),
            key => row_details
                .fields
                .iter()
                .find(|field| field.key == key)
                .map(|field| field.value.clone())
                .unwrap_or_default(),
        };
        cells.insert(header.clone(), text);
    }
    cells
}
