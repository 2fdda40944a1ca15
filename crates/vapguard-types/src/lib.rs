//! Stable DTOs and IDs used across the vapguard workspace.
//!
//! This crate is intentionally boring:
//! - resource identity and target references
//! - validation results and the queryable result list
//! - the emitted report envelope
//! - canonical manifest path handling

#![forbid(unsafe_code)]

pub mod identity;
pub mod ids;
pub mod path;
pub mod report;
pub mod result;

pub use identity::{ResourceIdentity, ResourceScope, TargetRef};
pub use path::ManifestPath;
pub use report::{ReportSummary, ToolMeta, ValidationReport, SCHEMA_REPORT_V1};
pub use result::{PolicyRef, ValidationError, ValidationResult, ValidationResultList};
