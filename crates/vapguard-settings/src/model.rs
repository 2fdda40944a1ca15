use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `vapguard.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct VapguardConfigV1 {
    /// Optional schema string for tooling (`vapguard.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Report format: `table` (default), `json`, or `markdown`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,

    /// Which results the table and markdown formats list: `failed` (default), `passed`, `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show: Option<String>,

    /// Extra resource types (typically CRDs) on top of the built-in registry.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource_types: Vec<ResourceTypeConfig>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceTypeConfig {
    /// API group; empty for the core group.
    #[serde(default)]
    pub group: String,
    pub version: String,
    pub kind: String,
    /// Plural resource name, e.g. `widgets`.
    pub resource: String,
    /// `namespaced` (default) or `cluster`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Dotted field paths identifying the kind when `apiVersion`/`kind` are absent.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub signature: Vec<String>,
}
