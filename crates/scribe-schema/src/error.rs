//! Validation error types
//!
//! A failed validation carries every violation found in the pass, so the
//! caller can report the whole state of the submission at once.

use crate::field::FieldType;

/// A single schema rule violation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Violation {
    /// Required field missing from the submission
    #[error("missing required field '{field}'")]
    MissingField {
        /// Declared field name
        field: String,
    },

    /// Field present with the wrong JSON shape
    #[error("field '{field}' expects {expected}, got {actual}")]
    InvalidType {
        /// Declared field name
        field: String,
        /// Declared type
        expected: FieldType,
        /// Shape of the submitted value
        actual: &'static str,
    },

    /// Submitted field not declared by the schema
    #[error("unknown field '{field}'")]
    UnknownField {
        /// Submitted field name
        field: String,
    },

    /// Dependency group partially supplied
    #[error(
        "dependency group '{group}' requires all of its fields together: \
         present [{}], missing [{}]",
        .present.join(", "),
        .missing.join(", ")
    )]
    PartialGroup {
        /// Group name
        group: String,
        /// Member fields that were supplied
        present: Vec<String>,
        /// Member fields that were not
        missing: Vec<String>,
    },
}

/// Validation failure: one or more [`Violation`]s
///
/// Raised before any write occurs; always recoverable by resubmitting with
/// corrected data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("validation failed with {} violation(s): {}", .violations.len(), summary(.violations))]
pub struct ValidationError {
    /// Every violation found, in declaration order
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Wrap a non-empty violation list
    #[must_use]
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }
}

fn summary(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn violation_display_names_field() {
        let v = Violation::MissingField {
            field: "title".to_string(),
        };
        assert_eq!(v.to_string(), "missing required field 'title'");
    }

    #[test]
    fn partial_group_display_names_both_sides() {
        let v = Violation::PartialGroup {
            group: "sequence".to_string(),
            present: vec!["sequence_number".to_string()],
            missing: vec!["sequence_label".to_string()],
        };
        let text = v.to_string();
        assert!(text.contains("'sequence'"));
        assert!(text.contains("present [sequence_number]"));
        assert!(text.contains("missing [sequence_label]"));
    }

    #[test]
    fn error_display_counts_violations() {
        let err = ValidationError::new(vec![
            Violation::MissingField {
                field: "a".to_string(),
            },
            Violation::UnknownField {
                field: "b".to_string(),
            },
        ]);
        let text = err.to_string();
        assert!(text.starts_with("validation failed with 2 violation(s)"));
        assert!(text.contains("unknown field 'b'"));
    }
}
