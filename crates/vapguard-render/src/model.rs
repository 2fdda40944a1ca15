#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableError {
    pub message: String,
    pub expression: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableRow {
    pub policy: String,
    /// `<resource>/<name>`
    pub resource: String,
    pub passed: bool,
    pub errors: Vec<RenderableError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableSummary {
    pub results: u32,
    pub passed: u32,
    pub failed: u32,
    pub not_evaluated: u32,
}

/// Rows are already filtered by the caller; `summary` always covers the full run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub rows: Vec<RenderableRow>,
    pub summary: RenderableSummary,
}

impl RenderableRow {
    pub(crate) fn errors_cell(&self) -> String {
        if self.errors.is_empty() {
            return "-".to_string();
        }
        self.errors
            .iter()
            .map(|e| format!("{} (Expression: {})", e.message, e.expression))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
