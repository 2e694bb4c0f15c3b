//! Scribe Schema System
//!
//! Declarative field schemas for artifact data, validated before any write.
//!
//! # Core Concepts
//!
//! - [`Schema`]: the resolved field set for one artifact kind
//! - [`FieldDef`] / [`FieldType`]: per-field declarations
//! - [`DependencyGroup`]: fields that must be supplied together or not at all
//! - [`ValidationError`]: every violation found in one pass, not just the first
//!
//! Validation is purely local: no I/O, no side effects. A schema arrives
//! already resolved (its source format is a caller concern); candidate data
//! is a plain [`serde_json::Map`] so any front end can hand it over.

#![warn(unreachable_pub)]

mod error;
mod field;
mod schema;

pub use error::{ValidationError, Violation};
pub use field::{FieldDef, FieldType};
pub use schema::{DependencyGroup, Schema};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
