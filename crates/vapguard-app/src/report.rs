use anyhow::Context;
use vapguard_render::{RenderableError, RenderableReport, RenderableRow, RenderableSummary};
use vapguard_settings::ShowFilter;
use vapguard_types::{ValidationReport, ValidationResult};

pub fn serialize_report(report: &ValidationReport) -> anyhow::Result<Vec<u8>> {
    serde_json::to_vec_pretty(report).context("serialize report")
}

/// Project a report into the render model, keeping only the rows `show` asks for.
///
/// The summary always covers the whole run.
pub fn to_renderable(report: &ValidationReport, show: ShowFilter) -> RenderableReport {
    let rows = report
        .results
        .iter()
        .filter(|r| match show {
            ShowFilter::Failed => !r.success,
            ShowFilter::Passed => r.success,
            ShowFilter::All => true,
        })
        .map(renderable_row)
        .collect();

    let s = &report.summary;
    RenderableReport {
        rows,
        summary: RenderableSummary {
            results: s.results,
            passed: s.passed,
            failed: s.failed,
            not_evaluated: s.assertions_not_evaluated,
        },
    }
}

fn renderable_row(result: &ValidationResult) -> RenderableRow {
    RenderableRow {
        policy: result.policy.name.clone(),
        resource: result.target.display_resource(),
        passed: result.success,
        errors: result
            .validation_errors
            .iter()
            .map(|e| RenderableError {
                message: e.message.clone(),
                expression: e.expression.clone(),
            })
            .collect(),
    }
}
