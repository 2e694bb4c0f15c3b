//! Tree layout
//!
//! An artifact's location is a pure function of its coordinates:
//!
//! ```text
//! <collection>/<status>[/S<NN>-<label>]/<assignee>/<id>-<slug>.md
//! ```
//!
//! The sequence segment appears only when the artifact belongs to a
//! sequence group; without one the layout stays flat (assignee directly
//! under status), which keeps trees created before grouping existed valid.

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use serde::Serialize;

use crate::error::LayoutError;
use crate::id::ArtifactId;

/// Slugs longer than this are truncated; filenames stay readable
const SLUG_MAX_LEN: usize = 48;

/// Numbered, described grouping of artifacts under one subdirectory
///
/// Rendered as `S<NN>-<label>` with the number zero-padded to two digits,
/// e.g. `S01-foundation`, `S12-core`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SequenceGroup {
    number: u32,
    label: String,
}

impl SequenceGroup {
    /// Create a validated sequence group
    ///
    /// # Errors
    /// Rejects a zero number and labels that are not lowercase tokens
    /// (ascii lowercase alphanumerics, dash-separated).
    pub fn new(number: u32, label: impl Into<String>) -> Result<Self, LayoutError> {
        if number == 0 {
            return Err(LayoutError::InvalidSequenceNumber(0));
        }
        let label = label.into();
        let mut chars = label.chars();
        let head_ok = chars
            .next()
            .is_some_and(|c| c.is_ascii_lowercase() || c.is_ascii_digit());
        let tail_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !head_ok || !tail_ok || label.ends_with('-') {
            return Err(LayoutError::InvalidSequenceLabel(label));
        }
        Ok(Self { number, label })
    }

    /// Group number
    #[inline]
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Group label
    #[inline]
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Directory segment, `S<NN>-<label>`
    #[must_use]
    pub fn segment(&self) -> String {
        format!("S{:02}-{}", self.number, self.label)
    }

    /// Parse a directory segment back into a group
    ///
    /// Returns `None` for segments that are not well-formed, letting tree
    /// scans pass over unrelated directories.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        let rest = segment.strip_prefix('S')?;
        let (digits, label) = rest.split_once('-')?;
        if digits.len() < 2 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let number = digits.parse().ok()?;
        Self::new(number, label).ok()
    }
}

impl Display for SequenceGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segment())
    }
}

/// Derive a filename slug from an artifact title
///
/// Lowercase ascii alphanumeric runs joined by single dashes, truncated to
/// a bounded length. Never empty: a title with no usable characters yields
/// `untitled`. The slug is cosmetic; lookup is always by id.
#[must_use]
pub fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut pending_gap = false;
    for ch in title.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_gap && !slug.is_empty() {
                slug.push('-');
            }
            pending_gap = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_gap = true;
        }
    }
    slug.truncate(SLUG_MAX_LEN);
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        "untitled".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Compose an artifact's path relative to its kind's collection root
#[must_use]
pub fn artifact_rel_path(
    status: &str,
    sequence: Option<&SequenceGroup>,
    assignee: &str,
    id: ArtifactId,
    slug: &str,
) -> PathBuf {
    let mut path = PathBuf::from(status);
    if let Some(seq) = sequence {
        path.push(seq.segment());
    }
    path.push(assignee);
    path.push(format!("{id}-{slug}.md"));
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sequence_segment_zero_pads_to_two_digits() {
        let seq = SequenceGroup::new(1, "foundation").unwrap();
        assert_eq!(seq.segment(), "S01-foundation");
        let seq = SequenceGroup::new(12, "core").unwrap();
        assert_eq!(seq.segment(), "S12-core");
    }

    #[test]
    fn sequence_rejects_zero_and_bad_labels() {
        assert!(matches!(
            SequenceGroup::new(0, "foundation"),
            Err(LayoutError::InvalidSequenceNumber(0))
        ));
        for bad in ["", "Foundation", "has space", "-lead", "trail-", "ümlaut"] {
            assert!(
                matches!(
                    SequenceGroup::new(1, bad),
                    Err(LayoutError::InvalidSequenceLabel(_))
                ),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn sequence_segment_round_trips() {
        let seq = SequenceGroup::new(7, "api-v2").unwrap();
        assert_eq!(SequenceGroup::from_segment(&seq.segment()), Some(seq));
        assert_eq!(SequenceGroup::from_segment("archive"), None);
        assert_eq!(SequenceGroup::from_segment("S1-short"), None);
    }

    #[test]
    fn slugify_joins_runs_and_lowercases() {
        assert_eq!(slugify("Add retry / backoff!"), "add-retry-backoff");
        assert_eq!(slugify("  Spaced   Out  "), "spaced-out");
        assert_eq!(slugify("___"), "untitled");
        assert_eq!(slugify(""), "untitled");
    }

    #[test]
    fn slugify_truncates_long_titles() {
        let long = "word ".repeat(30);
        let slug = slugify(&long);
        assert!(slug.len() <= SLUG_MAX_LEN);
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn rel_path_with_sequence_group_nests_the_segment() {
        let id: ArtifactId = "T3".parse().unwrap();
        let seq = SequenceGroup::new(1, "foundation").unwrap();
        let path = artifact_rel_path("0_backlog", Some(&seq), "robin", id, "add-retries");
        assert_eq!(
            path,
            PathBuf::from("0_backlog/S01-foundation/robin/T3-add-retries.md")
        );
    }

    #[test]
    fn rel_path_without_sequence_group_is_flat() {
        let id: ArtifactId = "T3".parse().unwrap();
        let path = artifact_rel_path("0_backlog", None, "robin", id, "add-retries");
        assert_eq!(path, PathBuf::from("0_backlog/robin/T3-add-retries.md"));
    }
}
