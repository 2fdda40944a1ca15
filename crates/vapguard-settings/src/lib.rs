//! Config parsing and resolution.
//!
//! This crate is intentionally IO-free: it parses and resolves configuration provided as strings.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{ResourceTypeConfig, VapguardConfigV1};
pub use resolve::{EffectiveConfig, OutputFormat, Overrides, ResolvedConfig, ShowFilter};

/// Parse `vapguard.toml` into a typed model.
pub fn parse_config_toml(input: &str) -> anyhow::Result<VapguardConfigV1> {
    let cfg: VapguardConfigV1 = toml::from_str(input)?;
    Ok(cfg)
}

/// Resolve the effective config: file values, CLI overrides, and the type registry.
pub fn resolve_config(
    cfg: VapguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    resolve::resolve_config(cfg, overrides)
}
