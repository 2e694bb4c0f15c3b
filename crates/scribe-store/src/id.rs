//! Artifact identifiers
//!
//! Stable `T<n>` tokens, unique within a project and monotonically
//! increasing. An id is assigned once at creation and never reused or
//! reassigned, so artifacts keep their identity when moved between status
//! directories.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::StoreError;

/// Stable artifact identifier: `T<positive integer>`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ArtifactId(u32);

impl ArtifactId {
    /// The first id in an empty tree
    #[inline]
    #[must_use]
    pub fn first() -> Self {
        Self(1)
    }

    /// Numeric value
    #[inline]
    #[must_use]
    pub fn value(self) -> u32 {
        self.0
    }

    /// The next id after this one
    #[inline]
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    /// Extract the leading id token from an artifact file name
    ///
    /// Boundary-aware: the token is the maximal digit run after `T`, so
    /// `T1-slug.md` never matches a search for `T10` and vice versa. Returns
    /// `None` for names that carry no well-formed leading id, which lets
    /// tree scans skip unrelated markdown files.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        let rest = name.strip_prefix('T')?;
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        let value: u32 = rest[..end].parse().ok()?;
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }
}

impl Display for ArtifactId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

impl FromStr for ArtifactId {
    type Err = StoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || StoreError::InvalidId(s.to_string());
        let rest = s.strip_prefix('T').ok_or_else(invalid)?;
        if rest.is_empty() || !rest.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let value: u32 = rest.parse().map_err(|_| invalid())?;
        if value == 0 {
            Err(invalid())
        } else {
            Ok(Self(value))
        }
    }
}

impl Serialize for ArtifactId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_from_str() {
        let id: ArtifactId = "T42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "T42");
    }

    #[test]
    fn first_and_next_are_monotonic() {
        let id = ArtifactId::first();
        assert_eq!(id.to_string(), "T1");
        assert_eq!(id.next().to_string(), "T2");
    }

    #[test]
    fn from_str_rejects_malformed_tokens() {
        for bad in ["", "T", "T0", "1", "t1", "T1a", "T-1", "T1 "] {
            assert!(bad.parse::<ArtifactId>().is_err(), "accepted {bad:?}");
        }
    }

    #[test]
    fn file_name_extraction_is_boundary_aware() {
        assert_eq!(
            ArtifactId::from_file_name("T1-add-retries.md"),
            Some(ArtifactId(1))
        );
        assert_eq!(
            ArtifactId::from_file_name("T10-bigger.md"),
            Some(ArtifactId(10))
        );
        // T1 must not match T10 and T10 must not match T1
        assert_ne!(
            ArtifactId::from_file_name("T10-bigger.md"),
            Some(ArtifactId(1))
        );
        assert_eq!(ArtifactId::from_file_name("T7.md"), Some(ArtifactId(7)));
    }

    #[test]
    fn file_name_extraction_skips_unrelated_files() {
        for name in ["README.md", "Txyz.md", "T0-zero.md", "notes-T3.md"] {
            assert_eq!(ArtifactId::from_file_name(name), None, "matched {name:?}");
        }
    }

    #[test]
    fn serializes_as_token_string() {
        let id: ArtifactId = "T3".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"T3\"");
    }
}
