use crate::model::{ResourceTypeConfig, VapguardConfigV1};
use anyhow::Context;
use vapguard_domain::{GroupVersionKind, TypeRegistration, TypeRegistry};
use vapguard_types::ResourceScope;
use vapguard_types::ids::SCHEMA_CONFIG_V1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Markdown,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShowFilter {
    #[default]
    Failed,
    Passed,
    All,
}

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub output: Option<String>,
    pub show: Option<String>,
}

#[derive(Clone, Debug)]
pub struct EffectiveConfig {
    pub output: OutputFormat,
    pub show: ShowFilter,
    pub registry: TypeRegistry,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(
    cfg: VapguardConfigV1,
    overrides: Overrides,
) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let output = match overrides.output.or(cfg.output) {
        Some(v) => parse_output(&v)?,
        None => OutputFormat::default(),
    };
    let show = match overrides.show.or(cfg.show) {
        Some(v) => parse_show(&v)?,
        None => ShowFilter::default(),
    };

    let mut builder = TypeRegistry::builder().with_builtin();
    for rt in &cfg.resource_types {
        let registration = registration_from(rt)?;
        builder = builder
            .register(registration)
            .with_context(|| format!("invalid resource_types entry for kind {:?}", rt.kind))?;
    }

    Ok(ResolvedConfig {
        effective: EffectiveConfig {
            output,
            show,
            registry: builder.build(),
        },
    })
}

fn registration_from(rt: &ResourceTypeConfig) -> anyhow::Result<TypeRegistration> {
    let scope = match rt.scope.as_deref() {
        Some(v) => parse_scope(v).with_context(|| format!("invalid scope for kind {:?}", rt.kind))?,
        None => ResourceScope::Namespaced,
    };
    Ok(TypeRegistration::new(
        GroupVersionKind::new(&rt.group, &rt.version, &rt.kind),
        &rt.resource,
        scope,
    )
    .with_signature(&rt.signature))
}

fn parse_output(v: &str) -> anyhow::Result<OutputFormat> {
    match v {
        "table" => Ok(OutputFormat::Table),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        other => anyhow::bail!("unknown output: {other} (expected table|json|markdown)"),
    }
}

fn parse_show(v: &str) -> anyhow::Result<ShowFilter> {
    match v {
        "failed" => Ok(ShowFilter::Failed),
        "passed" => Ok(ShowFilter::Passed),
        "all" => Ok(ShowFilter::All),
        other => anyhow::bail!("unknown show: {other} (expected failed|passed|all)"),
    }
}

fn parse_scope(v: &str) -> anyhow::Result<ResourceScope> {
    match v {
        "namespaced" => Ok(ResourceScope::Namespaced),
        "cluster" => Ok(ResourceScope::Cluster),
        other => anyhow::bail!("unknown scope: {other} (expected namespaced|cluster)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_config_toml;

    #[test]
    fn defaults_without_config() {
        let resolved =
            resolve_config(VapguardConfigV1::default(), Overrides::default()).expect("resolve");
        assert_eq!(resolved.effective.output, OutputFormat::Table);
        assert_eq!(resolved.effective.show, ShowFilter::Failed);
        assert_eq!(resolved.effective.registry.len(), TypeRegistry::builtin().len());
    }

    #[test]
    fn overrides_beat_file_values() {
        let cfg = parse_config_toml(
            r#"
output = "markdown"
show = "all"
"#,
        )
        .expect("parse");
        let resolved = resolve_config(
            cfg,
            Overrides {
                output: Some("json".to_string()),
                show: None,
            },
        )
        .expect("resolve");
        assert_eq!(resolved.effective.output, OutputFormat::Json);
        assert_eq!(resolved.effective.show, ShowFilter::All);
    }

    #[test]
    fn resource_types_extend_the_builtin_registry() {
        let cfg = parse_config_toml(
            r#"
schema = "vapguard.config.v1"

[[resource_types]]
group = "example.com"
version = "v1"
kind = "Widget"
resource = "widgets"
scope = "cluster"
signature = ["spec.widgetSize"]
"#,
        )
        .expect("parse");
        let resolved = resolve_config(cfg, Overrides::default()).expect("resolve");
        let reg = resolved
            .effective
            .registry
            .lookup(&GroupVersionKind::new("example.com", "v1", "Widget"))
            .expect("widget registered");
        assert_eq!(reg.resource, "widgets");
        assert_eq!(reg.scope, ResourceScope::Cluster);
        assert_eq!(reg.signature, vec!["spec.widgetSize".to_string()]);
    }

    #[test]
    fn colliding_resource_type_is_rejected() {
        let cfg = parse_config_toml(
            r#"
[[resource_types]]
version = "v1"
kind = "Pod"
resource = "pods"
"#,
        )
        .expect("parse");
        let err = resolve_config(cfg, Overrides::default()).expect_err("duplicate");
        let msg = format!("{err:#}");
        assert!(msg.contains("Pod"), "{msg}");
        assert!(msg.contains("already registered"), "{msg}");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad_output = parse_config_toml(r#"output = "xml""#).expect("parse");
        assert!(resolve_config(bad_output, Overrides::default()).is_err());

        let bad_show = Overrides {
            output: None,
            show: Some("some".to_string()),
        };
        assert!(resolve_config(VapguardConfigV1::default(), bad_show).is_err());

        let bad_schema = parse_config_toml(r#"schema = "vapguard.config.v9""#).expect("parse");
        assert!(resolve_config(bad_schema, Overrides::default()).is_err());

        let empty_resource = parse_config_toml(
            r#"
[[resource_types]]
group = "example.com"
version = "v1"
kind = "Widget"
resource = ""
"#,
        )
        .expect("parse");
        assert!(resolve_config(empty_resource, Overrides::default()).is_err());
    }

    #[test]
    fn parse_rejects_missing_required_fields() {
        assert!(parse_config_toml("[[resource_types]]\nkind = \"Widget\"\n").is_err());
    }
}
