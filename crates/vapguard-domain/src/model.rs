use crate::value::Value;
use std::collections::BTreeSet;
use vapguard_types::{ManifestPath, ResourceIdentity, TargetRef};

#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupVersionKind {
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    pub fn new(group: &str, version: &str, kind: &str) -> Self {
        Self {
            group: group.to_string(),
            version: version.to_string(),
            kind: kind.to_string(),
        }
    }

    pub fn api_version(&self) -> String {
        if self.group.is_empty() {
            self.version.clone()
        } else {
            format!("{}/{}", self.group, self.version)
        }
    }
}

impl std::fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, Kind={}", self.api_version(), self.kind)
    }
}

/// A decoded document as handed over by the object loader.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TypedObject {
    pub source: ManifestPath,
    /// `apiVersion` as written, if present and non-empty.
    pub api_version: Option<String>,
    /// `kind` as written, if present and non-empty.
    pub kind: Option<String>,
    /// Full field tree of the document.
    pub data: Value,
}

impl TypedObject {
    pub fn new(source: ManifestPath, data: Value) -> Self {
        let api_version = data.str_at("apiVersion").map(str::to_string);
        let kind = data.str_at("kind").map(str::to_string);
        Self {
            source,
            api_version,
            kind,
            data,
        }
    }

    pub fn has_type_meta(&self) -> bool {
        self.api_version.is_some() || self.kind.is_some()
    }

    pub fn name(&self) -> &str {
        self.data.str_at("metadata.name").unwrap_or_default()
    }

    pub fn namespace(&self) -> Option<&str> {
        self.data.str_at("metadata.namespace")
    }
}

/// A resolved target: identity attached once, data tree read-only afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetInfo {
    identity: ResourceIdentity,
    kind: String,
    name: String,
    namespace: Option<String>,
    source: ManifestPath,
    data: Value,
}

impl TargetInfo {
    pub fn new(
        identity: ResourceIdentity,
        kind: impl Into<String>,
        name: impl Into<String>,
        namespace: Option<String>,
        source: ManifestPath,
        data: Value,
    ) -> Self {
        Self {
            identity,
            kind: kind.into(),
            name: name.into(),
            namespace,
            source,
            data,
        }
    }

    pub fn identity(&self) -> &ResourceIdentity {
        &self.identity
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn source(&self) -> &ManifestPath {
        &self.source
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn to_ref(&self) -> TargetRef {
        TargetRef {
            api_group: self.identity.group.clone(),
            api_version: self.identity.version.clone(),
            resource: self.identity.resource.clone(),
            sub_resource: self.identity.sub_resource.clone(),
            kind: self.kind.clone(),
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            source: self.source.clone(),
        }
    }
}

/// One include or exclude rule. An empty set matches anything for its dimension.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceRule {
    pub api_groups: BTreeSet<String>,
    pub api_versions: BTreeSet<String>,
    /// Plural resources, optionally `resource/sub` or `resource/*`.
    pub resources: BTreeSet<String>,
    pub resource_names: BTreeSet<String>,
}

impl ResourceRule {
    pub fn new<S: AsRef<str>>(groups: &[S], versions: &[S], resources: &[S]) -> Self {
        let set = |items: &[S]| items.iter().map(|s| s.as_ref().to_string()).collect();
        Self {
            api_groups: set(groups),
            api_versions: set(versions),
            resources: set(resources),
            resource_names: BTreeSet::new(),
        }
    }

    pub fn with_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.resource_names = names.iter().map(|s| s.as_ref().to_string()).collect();
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub include_rules: Vec<ResourceRule>,
    pub exclude_rules: Vec<ResourceRule>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assertion {
    pub expression: String,
    pub message: String,
}

impl Assertion {
    pub fn new(expression: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            message: message.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Policy {
    pub name: String,
    pub selection: Selection,
    pub assertions: Vec<Assertion>,
    pub source: ManifestPath,
}
