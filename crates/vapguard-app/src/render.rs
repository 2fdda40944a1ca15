//! Render use case: turn an in-memory report into the selected output format.

use crate::report::{serialize_report, to_renderable};
use anyhow::Context;
use vapguard_settings::{OutputFormat, ShowFilter};
use vapguard_types::ValidationReport;

pub fn render_report(
    report: &ValidationReport,
    format: OutputFormat,
    show: ShowFilter,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => {
            let bytes = serialize_report(report)?;
            let mut text = String::from_utf8(bytes).context("report json is not utf-8")?;
            text.push('\n');
            Ok(text)
        }
        OutputFormat::Table => Ok(vapguard_render::render_table(&to_renderable(report, show))),
        OutputFormat::Markdown => Ok(vapguard_render::render_markdown(&to_renderable(
            report, show,
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;
    use vapguard_types::{ReportSummary, SCHEMA_REPORT_V1, ToolMeta, ValidationResultList};

    fn empty_report() -> ValidationReport {
        ValidationReport {
            schema: SCHEMA_REPORT_V1.to_string(),
            tool: ToolMeta {
                name: "vapguard".to_string(),
                version: "0.1.0".to_string(),
            },
            started_at: OffsetDateTime::UNIX_EPOCH,
            finished_at: OffsetDateTime::UNIX_EPOCH,
            summary: ReportSummary::default(),
            results: ValidationResultList::default(),
        }
    }

    #[test]
    fn table_without_failures_is_the_success_line() {
        let out = render_report(&empty_report(), OutputFormat::Table, ShowFilter::Failed)
            .expect("render");
        assert_eq!(out, "all validation success!\n");
    }

    #[test]
    fn json_output_is_the_full_envelope() {
        let out = render_report(&empty_report(), OutputFormat::Json, ShowFilter::Failed)
            .expect("render");
        let value: serde_json::Value = serde_json::from_str(&out).expect("json");
        assert_eq!(value["schema"], "vapguard.report.v1");
        assert_eq!(value["results"], serde_json::json!([]));
        assert!(out.ends_with("}\n"));
    }

    #[test]
    fn markdown_has_heading() {
        let out = render_report(&empty_report(), OutputFormat::Markdown, ShowFilter::All)
            .expect("render");
        assert!(out.starts_with("# vapguard report"));
    }
}
