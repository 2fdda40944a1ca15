//! `ValidatingAdmissionPolicy` documents → domain [`Policy`] values.

use crate::LoadError;
use crate::decode::Document;
use serde::Deserialize;
use vapguard_domain::{Assertion, Policy, ResourceRule, Selection, parse_api_version};
use vapguard_types::ManifestPath;
use vapguard_types::ids::{
    GROUP_ADMISSION_REGISTRATION, KIND_VALIDATING_ADMISSION_POLICY,
    KIND_VALIDATING_ADMISSION_POLICY_BINDING,
};

const SUPPORTED_VERSIONS: &[&str] = &["v1", "v1beta1"];

/// Reference from a binding to the policy it activates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PolicyBinding {
    pub name: String,
    pub policy_name: String,
    pub source: ManifestPath,
}

/// Policies and bindings in input order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolicySet {
    pub policies: Vec<Policy>,
    pub bindings: Vec<PolicyBinding>,
}

#[derive(Debug, Default, Deserialize)]
struct ObjectMeta {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct PolicyDocument {
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    spec: PolicySpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicySpec {
    #[serde(default)]
    match_constraints: Option<MatchResources>,
    #[serde(default)]
    validations: Vec<Validation>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchResources {
    #[serde(default)]
    resource_rules: Vec<NamedRule>,
    #[serde(default)]
    exclude_resource_rules: Vec<NamedRule>,
}

// `operations` and `scope` are accepted but play no part in matching.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NamedRule {
    #[serde(default)]
    api_groups: Vec<String>,
    #[serde(default)]
    api_versions: Vec<String>,
    #[serde(default)]
    resources: Vec<String>,
    #[serde(default)]
    resource_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Validation {
    #[serde(default)]
    expression: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct BindingDocument {
    #[serde(default)]
    metadata: ObjectMeta,
    #[serde(default)]
    spec: BindingSpec,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BindingSpec {
    #[serde(default)]
    policy_name: String,
}

impl From<NamedRule> for ResourceRule {
    fn from(rule: NamedRule) -> Self {
        ResourceRule::new(&rule.api_groups, &rule.api_versions, &rule.resources)
            .with_names(&rule.resource_names)
    }
}

/// Fold one file's documents into `set`. Non-policy kinds are skipped.
pub(crate) fn collect_policy_documents(
    source: &ManifestPath,
    documents: Vec<Document>,
    set: &mut PolicySet,
) -> Result<(), LoadError> {
    for doc in documents {
        let api_version = doc.value.get("apiVersion").and_then(|v| v.as_str());
        let kind = doc.value.get("kind").and_then(|v| v.as_str());
        let (Some(api_version), Some(kind)) = (api_version, kind) else {
            tracing::debug!(
                path = %source,
                document = doc.index,
                "skipping document without type metadata"
            );
            continue;
        };
        let (api_version, kind) = (api_version.to_string(), kind.to_string());

        let (group, version) = parse_api_version(&api_version);
        let is_policy_kind = kind == KIND_VALIDATING_ADMISSION_POLICY
            || kind == KIND_VALIDATING_ADMISSION_POLICY_BINDING;
        if group != GROUP_ADMISSION_REGISTRATION || !is_policy_kind {
            tracing::debug!(
                path = %source,
                document = doc.index,
                kind = %kind,
                "skipping non-policy document"
            );
            continue;
        }
        if !SUPPORTED_VERSIONS.contains(&version.as_str()) {
            return Err(LoadError::UnknownType {
                path: source.to_string(),
                kind,
                version: api_version,
            });
        }

        if kind == KIND_VALIDATING_ADMISSION_POLICY {
            set.policies
                .push(decode_policy(source, doc.index, doc.value, &kind)?);
        } else {
            set.bindings
                .push(decode_binding(source, doc.index, doc.value, &kind)?);
        }
    }
    Ok(())
}

fn decode_policy(
    source: &ManifestPath,
    index: usize,
    value: serde_json::Value,
    kind: &str,
) -> Result<Policy, LoadError> {
    let doc: PolicyDocument = serde_json::from_value(value).map_err(|e| LoadError::Decode {
        path: source.to_string(),
        document: index,
        reason: format!("invalid {kind}: {e}"),
    })?;

    let constraints = doc.spec.match_constraints.unwrap_or_default();
    Ok(Policy {
        name: doc.metadata.name,
        selection: Selection {
            include_rules: constraints
                .resource_rules
                .into_iter()
                .map(ResourceRule::from)
                .collect(),
            exclude_rules: constraints
                .exclude_resource_rules
                .into_iter()
                .map(ResourceRule::from)
                .collect(),
        },
        assertions: doc
            .spec
            .validations
            .into_iter()
            .map(|v| Assertion::new(v.expression, v.message))
            .collect(),
        source: source.clone(),
    })
}

fn decode_binding(
    source: &ManifestPath,
    index: usize,
    value: serde_json::Value,
    kind: &str,
) -> Result<PolicyBinding, LoadError> {
    let doc: BindingDocument = serde_json::from_value(value).map_err(|e| LoadError::Decode {
        path: source.to_string(),
        document: index,
        reason: format!("invalid {kind}: {e}"),
    })?;
    Ok(PolicyBinding {
        name: doc.metadata.name,
        policy_name: doc.spec.policy_name,
        source: source.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::parse_documents;

    const POLICY: &str = r#"
apiVersion: admissionregistration.k8s.io/v1
kind: ValidatingAdmissionPolicy
metadata:
  name: deployment-name
spec:
  failurePolicy: Fail
  matchConstraints:
    resourceRules:
    - apiGroups: ["apps"]
      apiVersions: ["v1"]
      operations: ["CREATE", "UPDATE"]
      resources: ["deployments"]
      scope: "Namespaced"
    excludeResourceRules:
    - apiGroups: ["apps"]
      apiVersions: ["v1"]
      resources: ["deployments"]
      resourceNames: ["legacy"]
  validations:
  - expression: "object.metadata.name.startsWith('a')"
    message: "name must start with a"
  - expression: "object.spec.replicas <= 5"
---
apiVersion: admissionregistration.k8s.io/v1
kind: ValidatingAdmissionPolicyBinding
metadata:
  name: deployment-name-binding
spec:
  policyName: deployment-name
  validationActions: [Deny]
---
apiVersion: v1
kind: ConfigMap
metadata:
  name: unrelated
"#;

    fn load(text: &str) -> Result<PolicySet, LoadError> {
        let source = ManifestPath::new("policy.yaml");
        let docs = parse_documents(source.as_str(), text)?;
        let mut set = PolicySet::default();
        collect_policy_documents(&source, docs, &mut set)?;
        Ok(set)
    }

    #[test]
    fn decodes_policy_rules_and_validations() {
        let set = load(POLICY).expect("load");
        assert_eq!(set.policies.len(), 1);
        let p = &set.policies[0];
        assert_eq!(p.name, "deployment-name");
        assert_eq!(p.selection.include_rules.len(), 1);
        assert!(p.selection.include_rules[0].resources.contains("deployments"));
        assert!(p.selection.exclude_rules[0].resource_names.contains("legacy"));
        assert_eq!(p.assertions.len(), 2);
        assert_eq!(p.assertions[0].message, "name must start with a");
        assert_eq!(p.assertions[1].message, "");
        assert_eq!(p.source.as_str(), "policy.yaml");
    }

    #[test]
    fn bindings_are_collected_and_other_kinds_skipped() {
        let set = load(POLICY).expect("load");
        assert_eq!(
            set.bindings,
            vec![PolicyBinding {
                name: "deployment-name-binding".to_string(),
                policy_name: "deployment-name".to_string(),
                source: ManifestPath::new("policy.yaml"),
            }]
        );
    }

    #[test]
    fn missing_match_constraints_selects_everything() {
        let set = load(
            r#"
apiVersion: admissionregistration.k8s.io/v1beta1
kind: ValidatingAdmissionPolicy
metadata:
  name: open
spec:
  validations:
  - expression: "true"
"#,
        )
        .expect("load");
        let p = &set.policies[0];
        assert!(p.selection.include_rules.is_empty());
        assert!(p.selection.exclude_rules.is_empty());
    }

    #[test]
    fn unsupported_admission_version_is_unknown_type() {
        let err = load(
            r#"
apiVersion: admissionregistration.k8s.io/v1alpha9
kind: ValidatingAdmissionPolicy
metadata:
  name: future
"#,
        )
        .expect_err("unsupported version");
        assert!(matches!(err, LoadError::UnknownType { .. }), "got {err:?}");
    }

    #[test]
    fn wrongly_shaped_policy_is_a_decode_error() {
        let err = load(
            r#"
apiVersion: admissionregistration.k8s.io/v1
kind: ValidatingAdmissionPolicy
metadata:
  name: broken
spec:
  validations: "not a list"
"#,
        )
        .expect_err("decode error");
        match err {
            LoadError::Decode { document, reason, .. } => {
                assert_eq!(document, 1);
                assert!(reason.contains("ValidatingAdmissionPolicy"), "{reason}");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
