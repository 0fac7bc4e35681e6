pub mod detail;
pub mod envelope;
pub mod result_set;

pub use detail::{
    DetailField, FieldGroup, STANDARD_MESSAGE_PRIORITY, STANDARD_TIMESTAMP_PRIORITY,
};
pub use envelope::{
    REPORT_ENVELOPE_SCHEMA_VERSION, ReportCommandFailure, ReportEnvelope, ReportError, ReportMeta,
    ReportWarning,
};
pub use result_set::{Column, RESULT_SET_SCHEMA_VERSION, ResultSet, Row, json_schema};
