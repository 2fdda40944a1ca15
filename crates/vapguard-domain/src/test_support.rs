use crate::evaluator::{Binding, EvalError, EvalOutput, ExpressionEvaluator};
use crate::model::{Assertion, Policy, ResourceRule, Selection, TargetInfo, TypedObject};
use crate::value::Value;
use serde_json::json;
use vapguard_types::{ManifestPath, ResourceIdentity, ResourceScope};

pub fn identity(group: &str, version: &str, resource: &str) -> ResourceIdentity {
    ResourceIdentity {
        group: group.to_string(),
        version: version.to_string(),
        resource: resource.to_string(),
        sub_resource: String::new(),
        scope: ResourceScope::Namespaced,
    }
}

pub fn sub_identity(group: &str, version: &str, resource: &str, sub: &str) -> ResourceIdentity {
    ResourceIdentity {
        sub_resource: sub.to_string(),
        ..identity(group, version, resource)
    }
}

pub fn target(identity: ResourceIdentity, kind: &str, name: &str) -> TargetInfo {
    TargetInfo::new(
        identity,
        kind,
        name,
        Some("default".to_string()),
        ManifestPath::new("targets/deploy.yaml"),
        Value::from(json!({
            "metadata": {"name": name, "namespace": "default"},
            "spec": {"replicas": 1}
        })),
    )
}

pub fn deployment(name: &str) -> TargetInfo {
    target(identity("apps", "v1", "deployments"), "Deployment", name)
}

pub fn pod_object(name: &str) -> TypedObject {
    TypedObject::new(
        ManifestPath::new("targets/pod.yaml"),
        Value::from(json!({
            "apiVersion": "v1",
            "kind": "Pod",
            "metadata": {"name": name},
            "spec": {"containers": [{"name": "app", "image": "nginx"}]}
        })),
    )
}

pub fn policy(name: &str, include: Vec<ResourceRule>, assertions: Vec<Assertion>) -> Policy {
    Policy {
        name: name.to_string(),
        selection: Selection {
            include_rules: include,
            exclude_rules: Vec::new(),
        },
        assertions,
        source: ManifestPath::new("policies/policy.yaml"),
    }
}

pub fn deployments_rule() -> ResourceRule {
    ResourceRule::new(&["apps"], &["v1"], &["deployments"])
}

#[derive(Debug)]
pub enum FakeProgram {
    Const(bool),
    NameStartsWith(String),
    MissingField,
    NonBoolean,
}

/// A tiny stand-in for the expression language.
///
/// `true`, `false`, `name.startsWith('x')`, `missing.field` (evaluation error),
/// `value` (non-boolean). Anything else fails to compile.
pub struct FakeEvaluator;

impl ExpressionEvaluator for FakeEvaluator {
    type Compiled = FakeProgram;

    fn compile(&self, expression: &str) -> Result<FakeProgram, EvalError> {
        match expression {
            "true" => Ok(FakeProgram::Const(true)),
            "false" => Ok(FakeProgram::Const(false)),
            "missing.field" => Ok(FakeProgram::MissingField),
            "value" => Ok(FakeProgram::NonBoolean),
            other => other
                .strip_prefix("name.startsWith('")
                .and_then(|rest| rest.strip_suffix("')"))
                .map(|prefix| FakeProgram::NameStartsWith(prefix.to_string()))
                .ok_or_else(|| EvalError::Compile(format!("cannot parse {other:?}"))),
        }
    }

    fn evaluate(
        &self,
        compiled: &FakeProgram,
        binding: &Binding<'_>,
    ) -> Result<EvalOutput, EvalError> {
        match compiled {
            FakeProgram::Const(b) => Ok(EvalOutput::Bool(*b)),
            FakeProgram::NameStartsWith(prefix) => {
                let name = binding.value.str_at("metadata.name").unwrap_or_default();
                Ok(EvalOutput::Bool(name.starts_with(prefix.as_str())))
            }
            FakeProgram::MissingField => Err(EvalError::Evaluate("no such key: missing".into())),
            FakeProgram::NonBoolean => Ok(EvalOutput::NonBoolean("Int(3)".into())),
        }
    }
}
