//! Rendering of validation results for terminals and CI summaries.

#![forbid(unsafe_code)]

mod markdown;
mod model;
mod table;

pub use markdown::render_markdown;
pub use model::{RenderableError, RenderableReport, RenderableRow, RenderableSummary};
pub use table::render_table;
