//! Satchel Core — shared types, errors, and the roster merge join.
//!
//! This crate provides the foundational types used across all Satchel crates.
//! It has no internal Satchel dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`class_id`]: Validated class identifiers and storage namespaces
//! - [`record`]: Student records and parsed spreadsheet rows
//! - [`merge`]: The roster × progress nested-loop join

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod class_id;
pub mod error;
pub mod merge;
pub mod record;

// Re-export key types at crate root for convenience
pub use class_id::ClassId;
pub use error::{Error, Result};
pub use merge::{MergedStudent, merge_rows};
pub use record::{RowRecord, StudentRecord, field_str, field_u32};
