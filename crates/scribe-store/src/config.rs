//! Store configuration
//!
//! Which artifact kinds exist, where each kind's collection lives, and what
//! a kind's template defines is explicit state handed to every store, never
//! process-wide globals. The engine does not read configuration files; the
//! YAML helper exists for callers whose resolved configuration arrives as
//! text.

use serde::{Deserialize, Serialize};

use scribe_schema::Schema;

/// One section a kind's template defines, in render order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Section key used by operations and templates
    pub key: String,
    /// Heading text written into the document
    pub heading: String,
}

impl SectionSpec {
    /// Create a section spec
    #[must_use]
    pub fn new(key: impl Into<String>, heading: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            heading: heading.into(),
        }
    }
}

/// Data fields that carry a kind's sequence-group coordinates
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SequenceFields {
    /// Field holding the group number
    pub number_field: String,
    /// Field holding the group label
    pub label_field: String,
}

/// Configuration for one artifact kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindConfig {
    /// Kind name, e.g. `ticket`
    pub name: String,
    /// Collection root directory under the project root, e.g. `tickets`
    pub collection_dir: String,
    /// Status assigned at creation, e.g. `0_backlog`
    pub default_status: String,
    /// Data field the filename slug derives from
    #[serde(default = "default_title_field")]
    pub title_field: String,
    /// Data field naming the owning actor; the invoking actor is the
    /// fallback when the field is absent
    #[serde(default = "default_assignee_field")]
    pub assignee_field: String,
    /// Data fields carrying sequence-group coordinates, if the kind groups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence: Option<SequenceFields>,
    /// Sections the kind's template defines, in document order
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    /// Resolved field schema
    pub schema: Schema,
}

impl KindConfig {
    /// Heading for a section key: the configured heading, or the key as
    /// written for keys the template does not define
    #[must_use]
    pub fn section_heading<'a>(&'a self, key: &'a str) -> &'a str {
        self.sections
            .iter()
            .find(|s| s.key == key)
            .map_or(key, |s| s.heading.as_str())
    }
}

fn default_title_field() -> String {
    "title".to_string()
}

fn default_assignee_field() -> String {
    "assignee".to_string()
}

/// Configuration for a whole store: every known artifact kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Known kinds
    #[serde(default)]
    pub kinds: Vec<KindConfig>,
}

impl StoreConfig {
    /// Empty configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a kind
    #[must_use]
    pub fn with_kind(mut self, kind: KindConfig) -> Self {
        self.kinds.push(kind);
        self
    }

    /// Look up a kind by name
    #[must_use]
    pub fn kind(&self, name: &str) -> Option<&KindConfig> {
        self.kinds.iter().find(|k| k.name == name)
    }

    /// Parse resolved configuration from YAML
    ///
    /// # Errors
    /// Returns the underlying parse error on malformed input.
    pub fn from_yaml_str(text: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(text)
    }
}
