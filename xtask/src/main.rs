//! Developer tasks (schema generation, fixture conformance).
//!
//! Keeping this separate avoids bloating the end-user CLI.

use anyhow::{Context, bail};
use schemars::schema_for;
use std::fs;
use std::path::{Path, PathBuf};
use vapguard_test_util::normalize_nondeterministic;

/// Project root (parent of the xtask directory).
fn project_root() -> PathBuf {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or(manifest_dir)
}

fn schemas_dir() -> PathBuf {
    project_root().join("schemas")
}

fn fixtures_dir() -> PathBuf {
    project_root().join("tests").join("fixtures")
}

/// Schema definition with its target filename.
struct SchemaSpec {
    filename: &'static str,
    generate: fn() -> schemars::Schema,
}

fn generate_report_schema() -> schemars::Schema {
    schema_for!(vapguard_types::ValidationReport)
}

fn generate_config_schema() -> schemars::Schema {
    schema_for!(vapguard_settings::VapguardConfigV1)
}

fn schema_specs() -> Vec<SchemaSpec> {
    vec![
        SchemaSpec {
            filename: "vapguard.report.v1.json",
            generate: generate_report_schema,
        },
        SchemaSpec {
            filename: "vapguard.config.v1.json",
            generate: generate_config_schema,
        },
    ]
}

/// Serialize a schema to pretty-printed JSON with trailing newline.
fn serialize_schema(schema: &schemars::Schema) -> anyhow::Result<String> {
    let mut json = serde_json::to_string_pretty(schema).context("Failed to serialize schema")?;
    json.push('\n');
    Ok(json)
}

fn emit_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    fs::create_dir_all(&dir).context("Failed to create schemas directory")?;

    for spec in schema_specs() {
        let json = serialize_schema(&(spec.generate)())?;
        let path = dir.join(spec.filename);
        fs::write(&path, &json)
            .with_context(|| format!("Failed to write schema to {}", path.display()))?;
        println!("Wrote {}", path.display());
    }

    println!("\nSchemas emitted successfully.");
    Ok(())
}

/// Check that schemas in the repo match what would be generated.
fn validate_schemas() -> anyhow::Result<()> {
    let dir = schemas_dir();
    let mut missing = Vec::new();
    let mut mismatched = Vec::new();

    for spec in schema_specs() {
        let path = dir.join(spec.filename);
        if !path.exists() {
            missing.push(spec.filename);
            continue;
        }

        let expected = serialize_schema(&(spec.generate)())?;
        let actual = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if expected != actual {
            mismatched.push(spec.filename);
        }
    }

    if missing.is_empty() && mismatched.is_empty() {
        println!("All schemas are up to date.");
        return Ok(());
    }

    if !missing.is_empty() {
        eprintln!("Missing schemas:");
        for name in &missing {
            eprintln!("  - {name}");
        }
    }
    if !mismatched.is_empty() {
        eprintln!("Schemas out of date:");
        for name in &mismatched {
            eprintln!("  - {name}");
        }
    }
    eprintln!("\nRun `cargo xtask emit-schemas` to regenerate.");
    bail!("Schema validation failed")
}

/// Manifests in a fixture directory, split by file-name prefix.
fn fixture_inputs(dir: &Path, name: &str) -> anyhow::Result<(Vec<String>, Vec<String>)> {
    let mut files: Vec<String> = fs::read_dir(dir)
        .with_context(|| format!("Failed to read fixture '{name}'"))?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().extension().is_some_and(|ext| ext == "yaml"))
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();
    files.sort();

    let rel = |f: &String| format!("{name}/{f}");
    let targets = files
        .iter()
        .filter(|f| f.starts_with("target"))
        .map(rel)
        .collect();
    let policies = files
        .iter()
        .filter(|f| f.starts_with("policy"))
        .map(rel)
        .collect();
    Ok((targets, policies))
}

/// Run the built vapguard binary on every fixture with an `expected.report.json`,
/// validate the output against the report schema, and compare it to the golden file.
fn conform() -> anyhow::Result<()> {
    let schema = serde_json::to_value(generate_report_schema()).context("serialize schema")?;
    let compiled = jsonschema::validator_for(&schema)
        .map_err(|e| anyhow::anyhow!("Failed to compile report schema: {e}"))?;

    let bin = project_root().join("target").join("debug").join("vapguard");
    #[cfg(target_os = "windows")]
    let bin = bin.with_extension("exe");

    if !bin.exists() {
        bail!(
            "vapguard binary not found at {}.\nRun `cargo build -p vapguard-cli` first.",
            bin.display()
        );
    }

    let root = fixtures_dir();
    let mut checked = 0;
    let mut errors = Vec::new();

    for entry in fs::read_dir(&root).context("Failed to read tests/fixtures/")? {
        let fixture_dir = entry?.path();
        let golden_path = fixture_dir.join("expected.report.json");
        if !golden_path.exists() {
            continue;
        }
        let name = fixture_dir
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let (targets, policies) = fixture_inputs(&fixture_dir, &name)?;
        let temp_dir = tempfile::tempdir().context("Failed to create temp dir")?;
        let report_out = temp_dir.path().join("report.json");

        let mut cmd = std::process::Command::new(&bin);
        cmd.current_dir(&root).arg("validate");
        for t in &targets {
            cmd.args(["--targets", t]);
        }
        for p in &policies {
            cmd.args(["--policies", p]);
        }
        let output = cmd
            .arg("--report-out")
            .arg(&report_out)
            .output()
            .with_context(|| format!("Failed to run vapguard on fixture '{name}'"))?;

        if !output.status.success() {
            errors.push(format!(
                "fixture '{name}': vapguard exited with {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr)
            ));
            continue;
        }

        let report_text = fs::read_to_string(&report_out)
            .with_context(|| format!("fixture '{name}': no report written"))?;
        let report: serde_json::Value = serde_json::from_str(&report_text)
            .with_context(|| format!("Failed to parse report for fixture '{name}'"))?;

        for err in compiled.iter_errors(&report) {
            errors.push(format!("fixture '{name}': schema validation: {err}"));
        }

        let golden: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(&golden_path)
                .with_context(|| format!("Failed to read {}", golden_path.display()))?,
        )
        .with_context(|| format!("Failed to parse {}", golden_path.display()))?;
        if normalize_nondeterministic(report) != normalize_nondeterministic(golden) {
            errors.push(format!(
                "fixture '{name}': output differs from expected.report.json"
            ));
        } else {
            println!("  ✓ fixture '{name}' matches its golden report");
        }
        checked += 1;
    }

    if checked == 0 && errors.is_empty() {
        bail!("No fixtures with expected.report.json under {}", root.display());
    }
    if !errors.is_empty() {
        eprintln!("\nConformance errors:");
        for err in &errors {
            eprintln!("  - {err}");
        }
        bail!("Conformance failed with {} errors", errors.len());
    }

    println!("\n✓ {checked} fixtures pass conformance checks!");
    Ok(())
}

fn print_help() {
    eprintln!("xtask commands:");
    eprintln!("  help              Show this message");
    eprintln!("  emit-schemas      Generate JSON schemas from Rust types to schemas/");
    eprintln!("  validate-schemas  Check if schemas/ matches generated output (for CI)");
    eprintln!("  print-schema-ids  Print known schema IDs");
    eprintln!("  conform           Run vapguard on golden fixtures and validate the reports");
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let cmd = args.get(1).map(|s| s.as_str()).unwrap_or("help");

    match cmd {
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        "emit-schemas" => emit_schemas(),
        "validate-schemas" => validate_schemas(),
        "conform" => conform(),
        "print-schema-ids" => {
            for spec in schema_specs() {
                println!("{}", spec.filename.trim_end_matches(".json"));
            }
            Ok(())
        }
        other => bail!("unknown xtask command: {other}\n\nRun `cargo xtask help` for usage."),
    }
    .context("xtask failed")
}
