use crate::ManifestPath;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ResourceScope {
    #[default]
    Namespaced,
    Cluster,
}

/// Canonical (group, version, plural resource, subresource) identity of a decoded object.
///
/// Derived once per object by the type resolver and never mutated afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct ResourceIdentity {
    pub group: String,
    pub version: String,
    /// Plural resource name, e.g. `deployments`.
    pub resource: String,
    /// Empty for top-level objects.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_resource: String,
    pub scope: ResourceScope,
}

impl ResourceIdentity {
    /// `apiVersion` form: `v1` for the core group, `apps/v1` otherwise.
    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }

    /// `resource` or `resource/subresource`.
    pub fn full_resource(&self) -> String {
        if self.sub_resource.is_empty() {
            self.resource.clone()
        } else {
            format!("{}/{}", self.resource, self.sub_resource)
        }
    }
}

/// Identity-and-name reference to an evaluated target, as carried in results.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TargetRef {
    pub api_group: String,
    pub api_version: String,
    pub resource: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sub_resource: String,
    pub kind: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    pub source: ManifestPath,
}

impl TargetRef {
    /// `<resource>/<name>`, the column shown by the table reporter.
    pub fn display_resource(&self) -> String {
        format!("{}/{}", self.resource, self.name)
    }
}
