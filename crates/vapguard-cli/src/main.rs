//! CLI entry point for vapguard.
//!
//! This module is intentionally thin: it handles argument parsing, logging setup,
//! I/O, and exit codes. All business logic lives in the `vapguard-app` crate.

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing_subscriber::prelude::*;
use vapguard_app::{ValidateInput, render_report, run_validate, serialize_report};
use vapguard_settings::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "vapguard",
    version,
    about = "Offline ValidatingAdmissionPolicy checks for Kubernetes manifests"
)]
struct Cli {
    /// Path to vapguard config TOML (missing file means defaults).
    #[arg(long, global = true, default_value = "vapguard.toml")]
    config: Utf8PathBuf,

    /// Enable debug logging on stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate policies against target manifests.
    Validate {
        /// Target manifest file or directory (repeatable).
        #[arg(long = "targets", short = 't')]
        targets: Vec<Utf8PathBuf>,

        /// Policy manifest file or directory (repeatable).
        #[arg(long = "policies", short = 'p')]
        policies: Vec<Utf8PathBuf>,

        /// Override output format (table|json|markdown).
        #[arg(long, short)]
        output: Option<String>,

        /// Override which rows table/markdown output shows (failed|passed|all).
        #[arg(long)]
        show: Option<String>,

        /// Also write the JSON report to this path.
        #[arg(long)]
        report_out: Option<Utf8PathBuf>,

        /// Abort evaluation after this many milliseconds.
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Print the tool name and version.
    Version,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.cmd {
        Commands::Validate {
            ref targets,
            ref policies,
            ref output,
            ref show,
            ref report_out,
            timeout_ms,
        } => cmd_validate(
            &cli.config,
            targets,
            policies,
            Overrides {
                output: output.clone(),
                show: show.clone(),
            },
            report_out.as_deref(),
            timeout_ms.map(Duration::from_millis),
        ),
        Commands::Version => {
            println!("vapguard {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "vapguard=debug"
    } else {
        "vapguard=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn cmd_validate(
    config: &Utf8Path,
    targets: &[Utf8PathBuf],
    policies: &[Utf8PathBuf],
    overrides: Overrides,
    report_out: Option<&Utf8Path>,
    timeout: Option<Duration>,
) -> anyhow::Result<()> {
    let result = (|| -> anyhow::Result<String> {
        // Load config if present; missing file is allowed (defaults apply).
        let cfg_text = std::fs::read_to_string(config).unwrap_or_default();

        let output = run_validate(ValidateInput {
            target_paths: targets,
            policy_paths: policies,
            config_text: &cfg_text,
            overrides,
            timeout,
        })?;

        if let Some(path) = report_out {
            let data = serialize_report(&output.report)?;
            write_file(path, &data).context("write report json")?;
        }

        let effective = &output.resolved_config.effective;
        render_report(&output.report, effective.output, effective.show)
    })();

    match result {
        Ok(rendered) => {
            print!("{rendered}");
            Ok(())
        }
        Err(err) => {
            eprintln!("vapguard error: {err:#}");
            std::process::exit(1);
        }
    }
}

fn write_file(path: &Utf8Path, data: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_str().is_empty()
    {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {parent}"))?;
    }
    std::fs::write(path, data).with_context(|| format!("write file: {path}"))?;
    Ok(())
}
