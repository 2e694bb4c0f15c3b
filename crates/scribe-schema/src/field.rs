//! Field declarations
//!
//! A schema is a flat list of [`FieldDef`]s. Each field has a wire type and
//! an optional owning section, used to narrow the schema for section-scoped
//! updates.

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire type of a schema field
///
/// Candidate data is JSON-shaped; each variant names the JSON values it
/// accepts. `String` is single-line (no embedded newlines), `Text` is
/// free-form multi-line content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Single-line string
    String,
    /// Multi-line text block
    Text,
    /// Integer or float
    Number,
    /// Boolean flag
    Boolean,
    /// Array of values
    List,
}

impl FieldType {
    /// Check whether a JSON value inhabits this type
    #[must_use]
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::String => matches!(value, Value::String(s) if !s.contains('\n')),
            Self::Text => value.is_string(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::List => value.is_array(),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::String => "string",
            Self::Text => "text",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::List => "list",
        };
        write!(f, "{name}")
    }
}

/// One field declaration within a [`Schema`](crate::Schema)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as it appears in candidate data
    pub name: String,
    /// Wire type
    #[serde(rename = "type")]
    pub ty: FieldType,
    /// Whether the field must be present
    #[serde(default)]
    pub required: bool,
    /// Owning section key, if this field belongs to one section's content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl FieldDef {
    /// Create an optional field
    #[must_use]
    pub fn new(name: impl Into<String>, ty: FieldType) -> Self {
        Self {
            name: name.into(),
            ty,
            required: false,
            section: None,
        }
    }

    /// Mark the field required
    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attach the field to a section key
    #[must_use]
    pub fn in_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// Describe the JSON shape of a value for error messages
#[must_use]
pub(crate) fn value_shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
