//! Schema definition and validation
//!
//! A [`Schema`] is the resolved declaration for one artifact kind: its
//! fields plus zero or more dependency groups. Validation collects every
//! violation in a single pass.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ValidationError, Violation};
use crate::field::{value_shape, FieldDef};

/// Fields that must be supplied together or not at all
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGroup {
    /// Group name, used in violation messages
    pub name: String,
    /// Member field names
    pub fields: Vec<String>,
}

impl DependencyGroup {
    /// Create a group over the given member fields
    #[must_use]
    pub fn new(name: impl Into<String>, fields: &[&str]) -> Self {
        Self {
            name: name.into(),
            fields: fields.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Resolved schema for one artifact kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Artifact kind this schema describes
    pub kind: String,
    /// Field declarations
    pub fields: Vec<FieldDef>,
    /// All-or-nothing dependency groups
    #[serde(default)]
    pub groups: Vec<DependencyGroup>,
}

impl Schema {
    /// Create an empty schema for a kind
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            fields: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Add a field declaration
    #[must_use]
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Add a dependency group
    #[must_use]
    pub fn group(mut self, group: DependencyGroup) -> Self {
        self.groups.push(group);
        self
    }

    /// Look up a field declaration by name
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validate candidate data against this schema
    ///
    /// Runs to completion, collecting all violations rather than stopping at
    /// the first: missing required fields, type mismatches, undeclared
    /// fields, and partially supplied dependency groups. A `null` value is
    /// treated as absent.
    ///
    /// # Errors
    /// Returns [`ValidationError`] carrying every violation found.
    pub fn validate(&self, data: &Map<String, Value>) -> Result<(), ValidationError> {
        let mut violations = Vec::new();

        for field in &self.fields {
            match data.get(&field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        violations.push(Violation::MissingField {
                            field: field.name.clone(),
                        });
                    }
                }
                Some(value) => {
                    if !field.ty.accepts(value) {
                        violations.push(Violation::InvalidType {
                            field: field.name.clone(),
                            expected: field.ty,
                            actual: value_shape(value),
                        });
                    }
                }
            }
        }

        for key in data.keys() {
            if self.find(key).is_none() {
                violations.push(Violation::UnknownField { field: key.clone() });
            }
        }

        for group in &self.groups {
            let (present, missing): (Vec<String>, Vec<String>) = group
                .fields
                .iter()
                .cloned()
                .partition(|f| matches!(data.get(f), Some(v) if !v.is_null()));
            if !present.is_empty() && !missing.is_empty() {
                violations.push(Violation::PartialGroup {
                    group: group.name.clone(),
                    present,
                    missing,
                });
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// Narrow the schema to one section's fields
    ///
    /// Keeps the fields whose `section` attribute matches `section`,
    /// preserving required flags. A dependency group survives only when all
    /// of its member fields survive the narrowing.
    #[must_use]
    pub fn partial(&self, section: &str) -> Self {
        let fields: Vec<FieldDef> = self
            .fields
            .iter()
            .filter(|f| f.section.as_deref() == Some(section))
            .cloned()
            .collect();
        let groups = self
            .groups
            .iter()
            .filter(|g| {
                g.fields
                    .iter()
                    .all(|name| fields.iter().any(|f| &f.name == name))
            })
            .cloned()
            .collect();
        Self {
            kind: self.kind.clone(),
            fields,
            groups,
        }
    }

    /// Parse a resolved schema from YAML
    ///
    /// Boundary helper for callers whose configuration lives in YAML; the
    /// engine itself never reads configuration files.
    ///
    /// # Errors
    /// Returns the underlying parse error on malformed input.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
