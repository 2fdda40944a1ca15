//! Resource identity resolution against a [`TypeRegistry`].

use crate::model::{GroupVersionKind, TargetInfo, TypedObject};
use crate::registry::{TypeRegistration, TypeRegistry};
use crate::value::Value;
use vapguard_types::ResourceIdentity;

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("unknown resource type: kind={kind}, version={version}")]
    UnknownType { kind: String, version: String },
    #[error("object has no apiVersion/kind and its shape matches no registered type")]
    MissingTypeMeta,
    #[error(
        "object has no apiVersion/kind and its shape matches several types: {}",
        .candidates.join(", ")
    )]
    AmbiguousType { candidates: Vec<String> },
}

/// Split an `apiVersion` into (group, version). `v1` is the core group.
pub fn parse_api_version(api_version: &str) -> (String, String) {
    match api_version.split_once('/') {
        Some((group, version)) => (group.to_string(), version.to_string()),
        None => (String::new(), api_version.to_string()),
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TypeResolver<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> TypeResolver<'r> {
    pub fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r TypeRegistry {
        self.registry
    }

    /// Exact lookup on (group, version, kind).
    pub fn resolve(&self, gvk: &GroupVersionKind) -> Result<ResourceIdentity, ResolveError> {
        let reg = self
            .registry
            .lookup(gvk)
            .ok_or_else(|| ResolveError::UnknownType {
                kind: gvk.kind.clone(),
                version: gvk.api_version(),
            })?;
        Ok(identity_of(reg))
    }

    /// Group/version/kind of an object, from its type metadata or, when that is
    /// incomplete, from its shape.
    pub fn type_of(&self, obj: &TypedObject) -> Result<GroupVersionKind, ResolveError> {
        match (obj.api_version.as_deref(), obj.kind.as_deref()) {
            (Some(api_version), Some(kind)) => {
                let (group, version) = parse_api_version(api_version);
                Ok(GroupVersionKind {
                    group,
                    version,
                    kind: kind.to_string(),
                })
            }
            (api_version, kind) => self.infer(&obj.data, api_version, kind),
        }
    }

    /// Resolve an object into a target, attaching its identity.
    pub fn target_info(&self, obj: &TypedObject) -> Result<TargetInfo, ResolveError> {
        let gvk = self.type_of(obj)?;
        let identity = self.resolve(&gvk)?;
        Ok(TargetInfo::new(
            identity,
            gvk.kind,
            obj.name(),
            obj.namespace().map(str::to_string),
            obj.source.clone(),
            obj.data.clone(),
        ))
    }

    fn infer(
        &self,
        data: &Value,
        api_version: Option<&str>,
        kind: Option<&str>,
    ) -> Result<GroupVersionKind, ResolveError> {
        let mut best: Vec<&TypeRegistration> = Vec::new();
        let mut best_len = 0;

        for reg in self.registry.iter() {
            if reg.signature.is_empty() {
                continue;
            }
            if kind.is_some_and(|k| k != reg.gvk.kind) {
                continue;
            }
            if api_version.is_some_and(|v| v != reg.gvk.api_version()) {
                continue;
            }
            if !reg.signature.iter().all(|path| has_field(data, path)) {
                continue;
            }
            let len = reg.signature.len();
            if len > best_len {
                best_len = len;
                best.clear();
            }
            if len == best_len {
                best.push(reg);
            }
        }

        match best.as_slice() {
            [] => Err(ResolveError::MissingTypeMeta),
            [only] => {
                tracing::debug!(gvk = %only.gvk, "inferred resource type from shape");
                Ok(only.gvk.clone())
            }
            many => Err(ResolveError::AmbiguousType {
                candidates: many.iter().map(|r| r.gvk.to_string()).collect(),
            }),
        }
    }
}

fn has_field(data: &Value, path: &str) -> bool {
    data.lookup(path).is_some_and(|v| !v.is_null())
}

fn identity_of(reg: &TypeRegistration) -> ResourceIdentity {
    ResourceIdentity {
        group: reg.gvk.group.clone(),
        version: reg.gvk.version.clone(),
        resource: reg.resource.clone(),
        sub_resource: String::new(),
        scope: reg.scope,
    }
}
