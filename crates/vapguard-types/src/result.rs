use crate::TargetRef;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PolicyRef {
    pub name: String,
}

/// One failed assertion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationError {
    pub message: String,
    pub expression: String,
}

/// Outcome for one (policy, target) pair that had at least one evaluated assertion.
///
/// `success` is the AND of every evaluated assertion; `validation_errors` lists the
/// failed ones in assertion order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValidationResult {
    pub policy: PolicyRef,
    pub target: TargetRef,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validation_errors: Vec<ValidationError>,
}

/// Ordered result list (policy order, then target order).
///
/// The derived views are pure filters; the underlying list is never reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct ValidationResultList(Vec<ValidationResult>);

impl ValidationResultList {
    pub fn new(results: Vec<ValidationResult>) -> Self {
        Self(results)
    }

    pub fn as_slice(&self) -> &[ValidationResult] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationResult> {
        self.0.iter()
    }

    pub fn success_only(&self) -> Vec<&ValidationResult> {
        self.0.iter().filter(|r| r.success).collect()
    }

    pub fn failed_only(&self) -> Vec<&ValidationResult> {
        self.0.iter().filter(|r| !r.success).collect()
    }

    pub fn into_inner(self) -> Vec<ValidationResult> {
        self.0
    }
}

impl From<Vec<ValidationResult>> for ValidationResultList {
    fn from(value: Vec<ValidationResult>) -> Self {
        Self(value)
    }
}

impl<'a> IntoIterator for &'a ValidationResultList {
    type Item = &'a ValidationResult;
    type IntoIter = std::slice::Iter<'a, ValidationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
