use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::utils::time::utc_now_rfc3339;

pub const REPORT_ENVELOPE_SCHEMA_VERSION: &str = "tracetab.report-envelope.v1";

pub type ReportMeta = BTreeMap<String, Value>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportWarning {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportError {
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

/// Single-line JSON report printed by every CLI command, success or failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEnvelope {
    pub ok: bool,
    pub command: String,
    pub generated_at_utc: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    pub meta: ReportMeta,
    pub warnings: Vec<ReportWarning>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ReportError>,
}

impl ReportEnvelope {
    #[must_use]
    pub fn ok(command: impl Into<String>, data: Value) -> Self {
        let mut envelope = Self::base(command, true);
        envelope.data = Some(data);
        envelope
    }

    #[must_use]
    pub fn error(
        command: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        let mut envelope = Self::base(command, false);
        envelope.error = Some(ReportError {
            code: code.into(),
            message: message.into(),
            details: None,
        });
        envelope
    }

    fn base(command: impl Into<String>, ok: bool) -> Self {
        let mut meta = ReportMeta::new();
        meta.insert(
            "schema_version".to_string(),
            json!(REPORT_ENVELOPE_SCHEMA_VERSION),
        );

        Self {
            ok,
            command: command.into(),
            generated_at_utc: utc_now_rfc3339(),
            data: None,
            meta,
            warnings: Vec::new(),
            error: None,
        }
    }

    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    #[must_use]
    pub fn with_warning(mut self, code: impl Into<String>, message: impl Into<String>) -> Self {
        self.warnings.push(ReportWarning {
            code: code.into(),
            message: message.into(),
        });
        self
    }

    #[must_use]
    pub fn with_error_details(mut self, details: Value) -> Self {
        if let Some(error) = self.error.as_mut() {
            error.details = Some(details);
        }
        self
    }
}

/// Command failure carrying its envelope so `main` can print it and pick the
/// right exit code.
#[derive(Debug, Clone)]
pub struct ReportCommandFailure {
    envelope: ReportEnvelope,
    validation: bool,
}

impl ReportCommandFailure {
    #[must_use]
    pub fn runtime(envelope: ReportEnvelope) -> Self {
        Self {
            envelope,
            validation: false,
        }
    }

    #[must_use]
    pub fn validation(envelope: ReportEnvelope) -> Self {
        Self {
            envelope,
            validation: true,
        }
    }

    #[must_use]
    pub fn envelope(&self) -> &ReportEnvelope {
        &self.envelope
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        self.validation
    }
}

impl Display for ReportCommandFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(&self.envelope) {
            Ok(encoded) => f.write_str(&encoded),
            Err(_) => f.write_str("report envelope serialization failure"),
        }
    }
}

impl std::error::Error for ReportCommandFailure {}
