//! Error types for store operations
//!
//! Every error is terminal for the operation that raised it: validation and
//! lookup failures cannot succeed on retry without new input, and I/O
//! failures are surfaced with the failing path rather than retried. A failed
//! CREATE or UPDATE leaves the prior file state (or no file) intact.

use std::path::PathBuf;

use scribe_schema::ValidationError;

use crate::id::ArtifactId;

/// Errors raised by tree layout coordinates
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    /// Sequence numbers start at 1
    #[error("invalid sequence number: {0}")]
    InvalidSequenceNumber(u64),

    /// Sequence labels are lowercase dash-separated tokens
    #[error("invalid sequence label: '{0}' (lowercase token expected)")]
    InvalidSequenceLabel(String),
}

/// Errors raised by artifact operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Schema or dependency-group violation; raised before any write
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Kind not present in the store configuration
    #[error("unknown artifact kind: '{0}'")]
    UnknownKind(String),

    /// Malformed id token from a caller
    #[error("invalid artifact id: '{0}' (expected T<positive integer>)")]
    InvalidId(String),

    /// No artifact in the tree matches the id
    #[error("no '{kind}' artifact matches {id}")]
    NotFound {
        /// Artifact kind searched
        kind: String,
        /// Requested id
        id: ArtifactId,
    },

    /// More than one file matches the id: a corrupted or hand-edited tree,
    /// surfaced rather than auto-resolved
    #[error("{id} is ambiguous: {} files match ({})", .matches.len(), join_paths(.matches))]
    AmbiguousId {
        /// Requested id
        id: ArtifactId,
        /// Every matching path
        matches: Vec<PathBuf>,
    },

    /// Invalid sequence-group coordinates
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// Filesystem failure, with the failing path
    #[error("io error at {path}: {source}")]
    Io {
        /// Path being read, written, or renamed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// Create an I/O error carrying the failing path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn join_paths(matches: &[PathBuf]) -> String {
    matches
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
