use crate::ValidationResultList;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stable schema identifier for vapguard reports.
pub const SCHEMA_REPORT_V1: &str = "vapguard.report.v1";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Run counters.
///
/// `assertions_not_evaluated` counts (policy, target, assertion) triples whose
/// evaluation errored or returned a non-boolean. Those never appear as results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ReportSummary {
    pub policies: u32,
    pub bindings: u32,
    pub targets: u32,
    pub results: u32,
    pub passed: u32,
    pub failed: u32,
    pub assertions_not_evaluated: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationReport {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub tool: ToolMeta,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    pub summary: ReportSummary,
    pub results: ValidationResultList,
}
