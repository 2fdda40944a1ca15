//! Static (group, version, kind) → plural resource registration table.
//!
//! The registry is an immutable value handed to the resolver. Tests build their own;
//! the CLI starts from [`TypeRegistry::builtin`] and layers configured types on top.

use crate::model::GroupVersionKind;
use std::collections::BTreeMap;
use vapguard_types::ResourceScope;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TypeRegistration {
    pub gvk: GroupVersionKind,
    pub resource: String,
    pub scope: ResourceScope,
    /// Dotted field paths that identify the kind by shape when type metadata is absent.
    pub signature: Vec<String>,
}

impl TypeRegistration {
    pub fn new(gvk: GroupVersionKind, resource: &str, scope: ResourceScope) -> Self {
        Self {
            gvk,
            resource: resource.to_string(),
            scope,
            signature: Vec::new(),
        }
    }

    pub fn with_signature<S: AsRef<str>>(mut self, paths: &[S]) -> Self {
        self.signature = paths.iter().map(|p| p.as_ref().to_string()).collect();
        self
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("resource type {gvk} is already registered")]
    Duplicate { gvk: GroupVersionKind },
    #[error("resource type {gvk} has an empty {field}")]
    Empty {
        gvk: GroupVersionKind,
        field: &'static str,
    },
}

#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    entries: BTreeMap<GroupVersionKind, TypeRegistration>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// The kinds supported out of the box.
    pub fn builtin() -> Self {
        Self {
            entries: builtin_entries(),
        }
    }

    pub fn lookup(&self, gvk: &GroupVersionKind) -> Option<&TypeRegistration> {
        self.entries.get(gvk)
    }

    pub fn contains(&self, gvk: &GroupVersionKind) -> bool {
        self.entries.contains_key(gvk)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeRegistration> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct TypeRegistryBuilder {
    entries: BTreeMap<GroupVersionKind, TypeRegistration>,
}

impl TypeRegistryBuilder {
    pub fn with_builtin(mut self) -> Self {
        self.entries.extend(builtin_entries());
        self
    }

    pub fn register(mut self, registration: TypeRegistration) -> Result<Self, RegistryError> {
        let gvk = registration.gvk.clone();
        if gvk.kind.is_empty() {
            return Err(RegistryError::Empty { gvk, field: "kind" });
        }
        if gvk.version.is_empty() {
            return Err(RegistryError::Empty {
                gvk,
                field: "version",
            });
        }
        if registration.resource.is_empty() {
            return Err(RegistryError::Empty {
                gvk,
                field: "resource",
            });
        }
        if self.entries.contains_key(&gvk) {
            return Err(RegistryError::Duplicate { gvk });
        }
        self.entries.insert(gvk, registration);
        Ok(self)
    }

    pub fn build(self) -> TypeRegistry {
        TypeRegistry {
            entries: self.entries,
        }
    }
}

type BuiltinRow = (
    &'static str,
    &'static str,
    &'static str,
    &'static str,
    ResourceScope,
    &'static [&'static str],
);

const NS: ResourceScope = ResourceScope::Namespaced;
const CLUSTER: ResourceScope = ResourceScope::Cluster;

// (group, version, kind, resource, scope, shape signature)
#[rustfmt::skip]
const BUILTIN: &[BuiltinRow] = &[
    // core
    ("", "v1", "Pod", "pods", NS, &["spec.containers"]),
    ("", "v1", "Service", "services", NS, &["spec.ports"]),
    ("", "v1", "ConfigMap", "configmaps", NS, &[]),
    ("", "v1", "Secret", "secrets", NS, &[]),
    ("", "v1", "ServiceAccount", "serviceaccounts", NS, &[]),
    ("", "v1", "PersistentVolumeClaim", "persistentvolumeclaims", NS, &["spec.accessModes", "spec.resources"]),
    ("", "v1", "Endpoints", "endpoints", NS, &["subsets"]),
    ("", "v1", "ReplicationController", "replicationcontrollers", NS, &[]),
    ("", "v1", "LimitRange", "limitranges", NS, &["spec.limits"]),
    ("", "v1", "ResourceQuota", "resourcequotas", NS, &["spec.hard"]),
    ("", "v1", "Namespace", "namespaces", CLUSTER, &[]),
    ("", "v1", "Node", "nodes", CLUSTER, &[]),
    ("", "v1", "PersistentVolume", "persistentvolumes", CLUSTER, &["spec.capacity", "spec.accessModes"]),
    // apps
    ("apps", "v1", "Deployment", "deployments", NS, &["spec.template", "spec.strategy"]),
    ("apps", "v1", "StatefulSet", "statefulsets", NS, &["spec.template", "spec.serviceName"]),
    ("apps", "v1", "DaemonSet", "daemonsets", NS, &[]),
    ("apps", "v1", "ReplicaSet", "replicasets", NS, &[]),
    ("apps", "v1", "ControllerRevision", "controllerrevisions", NS, &["revision"]),
    // batch
    ("batch", "v1", "Job", "jobs", NS, &["spec.template", "spec.backoffLimit"]),
    ("batch", "v1", "CronJob", "cronjobs", NS, &["spec.schedule", "spec.jobTemplate"]),
    // networking
    ("networking.k8s.io", "v1", "Ingress", "ingresses", NS, &["spec.rules"]),
    ("networking.k8s.io", "v1", "NetworkPolicy", "networkpolicies", NS, &["spec.podSelector"]),
    ("networking.k8s.io", "v1", "IngressClass", "ingressclasses", CLUSTER, &["spec.controller"]),
    // rbac
    ("rbac.authorization.k8s.io", "v1", "Role", "roles", NS, &[]),
    ("rbac.authorization.k8s.io", "v1", "RoleBinding", "rolebindings", NS, &[]),
    ("rbac.authorization.k8s.io", "v1", "ClusterRole", "clusterroles", CLUSTER, &[]),
    ("rbac.authorization.k8s.io", "v1", "ClusterRoleBinding", "clusterrolebindings", CLUSTER, &[]),
    // policy, autoscaling, storage
    ("policy", "v1", "PodDisruptionBudget", "poddisruptionbudgets", NS, &["spec.minAvailable"]),
    ("autoscaling", "v1", "HorizontalPodAutoscaler", "horizontalpodautoscalers", NS, &[]),
    ("autoscaling", "v2", "HorizontalPodAutoscaler", "horizontalpodautoscalers", NS, &["spec.scaleTargetRef", "spec.metrics"]),
    ("storage.k8s.io", "v1", "StorageClass", "storageclasses", CLUSTER, &["provisioner"]),
    // admission
    ("admissionregistration.k8s.io", "v1", "ValidatingAdmissionPolicy", "validatingadmissionpolicies", CLUSTER, &["spec.validations"]),
    ("admissionregistration.k8s.io", "v1", "ValidatingAdmissionPolicyBinding", "validatingadmissionpolicybindings", CLUSTER, &["spec.policyName"]),
    ("admissionregistration.k8s.io", "v1beta1", "ValidatingAdmissionPolicy", "validatingadmissionpolicies", CLUSTER, &[]),
    ("admissionregistration.k8s.io", "v1beta1", "ValidatingAdmissionPolicyBinding", "validatingadmissionpolicybindings", CLUSTER, &[]),
];

fn builtin_entries() -> BTreeMap<GroupVersionKind, TypeRegistration> {
    BUILTIN
        .iter()
        .map(|(group, version, kind, resource, scope, signature)| {
            let gvk = GroupVersionKind::new(group, version, kind);
            let reg =
                TypeRegistration::new(gvk.clone(), resource, *scope).with_signature(signature);
            (gvk, reg)
        })
        .collect()
}
