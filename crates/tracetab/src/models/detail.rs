use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Priority slots for the fixed standard fields in a detail view. Payload
/// fields use the flattening engine's own priorities and sort after these.
pub const STANDARD_TIMESTAMP_PRIORITY: u8 = 1;
pub const STANDARD_MESSAGE_PRIORITY: u8 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldGroup {
    Standard,
    Custom,
}

impl FieldGroup {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Custom => "custom",
        }
    }
}

/// One display line derived from a row. Created fresh per row and never
/// mutated afterwards; lower priority renders earlier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DetailField {
    pub key: String,
    pub value: String,
    pub group: FieldGroup,
    pub priority: u8,
}

impl DetailField {
    #[must_use]
    pub fn standard(key: impl Into<String>, value: impl Into<String>, priority: u8) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            group: FieldGroup::Standard,
            priority,
        }
    }

    #[must_use]
    pub fn custom(key: impl Into<String>, value: impl Into<String>, priority: u8) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            group: FieldGroup::Custom,
            priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{DetailField, FieldGroup};

    #[test]
    fn group_tags_serialize_snake_case() {
        assert_eq!(FieldGroup::Standard.as_str(), "standard");
        assert_eq!(FieldGroup::Custom.as_str(), "custom");

        let field = DetailField::custom("error.code", "timeout", 10);
        let encoded = serde_json::to_string(&field).expect("field should encode");
        assert!(encoded.contains("\"group\":\"custom\""));
    }
}
