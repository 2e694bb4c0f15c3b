//! Scribe Artifact Store
//!
//! Filesystem-backed operations over markdown artifacts: stable id
//! allocation, structured tree layout, and CREATE / UPDATE / RETRIEVE /
//! LIST over one artifact kind.
//!
//! # Core Concepts
//!
//! - [`ArtifactStore`]: the only component that touches the artifact tree
//! - [`ArtifactId`]: stable `T<n>` token, allocated tree-wide per kind
//! - [`SequenceGroup`]: optional `S<NN>-<label>` grouping subdirectory
//! - [`StoreConfig`] / [`KindConfig`]: explicit configuration passed in by
//!   the caller, never process-wide state
//! - [`SectionRenderer`]: seam for the external templating engine
//!
//! # Concurrency
//!
//! The store is synchronous and single-writer by design: one operation per
//! short-lived invocation. Writes are atomic at the single-file level
//! (temp file + rename), so a reader never observes a half-written
//! artifact. Two concurrent updates to the same artifact are an accepted
//! race resolved as last-writer-wins at file granularity; there is no
//! cross-process locking.

#![warn(unreachable_pub)]

mod config;
mod error;
mod id;
mod layout;
mod render;
mod scan;
mod store;

pub use config::{KindConfig, SectionSpec, SequenceFields, StoreConfig};
pub use error::{LayoutError, StoreError};
pub use id::ArtifactId;
pub use layout::{artifact_rel_path, slugify, SequenceGroup};
pub use render::{SectionRenderer, PREAMBLE_SECTION};
pub use store::{ArtifactRef, ArtifactStore, CreatedArtifact, RetrievedArtifact};

// Re-exported so callers of `update` need not depend on scribe-document.
pub use scribe_document::MergeMode;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
