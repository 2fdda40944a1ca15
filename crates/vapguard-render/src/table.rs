use crate::RenderableReport;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use vapguard_types::ids::{ALL_SUCCESS_MESSAGE, RESULT_FAIL, RESULT_PASS};

#[derive(Tabled)]
struct Row {
    #[tabled(rename = "POLICY")]
    policy: String,
    #[tabled(rename = "EVALUATED_RESOURCE")]
    resource: String,
    #[tabled(rename = "RESULT")]
    result: &'static str,
    #[tabled(rename = "ERRORS")]
    errors: String,
}

/// Columnar terminal output.
///
/// Prints the success line when no result failed.
pub fn render_table(report: &RenderableReport) -> String {
    let mut out = String::new();

    if !report.rows.is_empty() {
        let rows: Vec<Row> = report
            .rows
            .iter()
            .map(|r| Row {
                policy: r.policy.clone(),
                resource: r.resource.clone(),
                result: if r.passed { RESULT_PASS } else { RESULT_FAIL },
                errors: r.errors_cell(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::blank());
        out.push_str(&table.to_string());
        out.push('\n');
    }

    if report.summary.failed == 0 {
        out.push_str(ALL_SUCCESS_MESSAGE);
        out.push('\n');
    }

    out
}
