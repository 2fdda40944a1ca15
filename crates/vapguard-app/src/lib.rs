//! Use case orchestration for vapguard.
//!
//! This crate provides the application layer: the `validate` use case coordinating the
//! loader, domain, and render layers. It is intentionally thin.
//!
//! The CLI crate depends on this; it only handles argument parsing and I/O.

#![forbid(unsafe_code)]

mod render;
mod report;
mod validate;

pub use render::render_report;
pub use report::{serialize_report, to_renderable};
pub use validate::{ValidateInput, ValidateOutput, run_validate};
