use crate::RenderableReport;
use vapguard_types::ids::{ALL_SUCCESS_MESSAGE, RESULT_FAIL, RESULT_PASS};

pub fn render_markdown(report: &RenderableReport) -> String {
    let mut out = String::new();
    let s = &report.summary;

    out.push_str("# vapguard report\n\n");
    out.push_str(&format!(
        "- Results: {} (passed {}, failed {})\n- Assertions not evaluated: {}\n\n",
        s.results, s.passed, s.failed, s.not_evaluated
    ));

    if !report.rows.is_empty() {
        out.push_str("| Policy | Resource | Result | Errors |\n");
        out.push_str("|---|---|---|---|\n");
        for row in &report.rows {
            let errors = if row.errors.is_empty() {
                "-".to_string()
            } else {
                row.errors
                    .iter()
                    .map(|e| format!("{} (`{}`)", escape(&e.message), escape(&e.expression)))
                    .collect::<Vec<_>>()
                    .join("<br>")
            };
            out.push_str(&format!(
                "| {} | `{}` | {} | {} |\n",
                escape(&row.policy),
                row.resource,
                if row.passed { RESULT_PASS } else { RESULT_FAIL },
                errors
            ));
        }
        out.push('\n');
    }

    if s.failed == 0 {
        out.push_str(ALL_SUCCESS_MESSAGE);
        out.push('\n');
    }

    out
}

fn escape(cell: &str) -> String {
    cell.replace('|', "\\|").replace('\n', " ")
}
