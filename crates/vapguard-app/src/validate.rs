//! The `validate` use case: load manifests and policies, evaluate, produce a report.

use anyhow::Context;
use camino::Utf8PathBuf;
use std::time::{Duration, Instant};
use time::OffsetDateTime;
use vapguard_cel::CelEvaluator;
use vapguard_domain::{RunOptions, TypeResolver, Validator};
use vapguard_settings::{Overrides, ResolvedConfig, VapguardConfigV1};
use vapguard_types::{ReportSummary, SCHEMA_REPORT_V1, ToolMeta, ValidationReport};

/// Input for the validate use case.
#[derive(Clone, Debug)]
pub struct ValidateInput<'a> {
    /// Target manifest files or directories.
    pub target_paths: &'a [Utf8PathBuf],
    /// Policy manifest files or directories.
    pub policy_paths: &'a [Utf8PathBuf],
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// CLI overrides.
    pub overrides: Overrides,
    /// Optional evaluation budget, measured from the start of evaluation.
    pub timeout: Option<Duration>,
}

/// Output from the validate use case.
#[derive(Clone, Debug)]
pub struct ValidateOutput {
    pub report: ValidationReport,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

pub fn run_validate(input: ValidateInput<'_>) -> anyhow::Result<ValidateOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        VapguardConfigV1::default()
    } else {
        vapguard_settings::parse_config_toml(input.config_text).context("parse config")?
    };
    let resolved =
        vapguard_settings::resolve_config(cfg, input.overrides.clone()).context("resolve config")?;
    let registry = &resolved.effective.registry;

    let objects = vapguard_loader::load_objects(input.target_paths, registry)
        .context("load target manifests")?;
    let policy_set =
        vapguard_loader::load_policies(input.policy_paths).context("load policy manifests")?;
    let bindings = policy_set.bindings.len();

    let resolver = TypeResolver::new(registry);
    let validator = Validator::from_objects(policy_set.policies, objects, &resolver)
        .context("build validator")?;
    tracing::info!(
        policies = validator.policies().len(),
        targets = validator.targets().len(),
        bindings,
        "validating"
    );

    let opts = RunOptions {
        deadline: input.timeout.map(|t| Instant::now() + t),
    };
    let outcome = validator
        .run(&CelEvaluator::new(), &opts)
        .context("run validation")?;

    let results = outcome.results;
    let summary = ReportSummary {
        policies: validator.policies().len() as u32,
        bindings: bindings as u32,
        targets: validator.targets().len() as u32,
        results: results.len() as u32,
        passed: results.success_only().len() as u32,
        failed: results.failed_only().len() as u32,
        assertions_not_evaluated: outcome.stats.assertions_not_evaluated,
    };

    let finished_at = OffsetDateTime::now_utc();
    let report = ValidationReport {
        schema: SCHEMA_REPORT_V1.to_string(),
        tool: ToolMeta {
            name: "vapguard".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        started_at,
        finished_at,
        summary,
        results,
    };

    Ok(ValidateOutput {
        report,
        resolved_config: resolved,
    })
}
