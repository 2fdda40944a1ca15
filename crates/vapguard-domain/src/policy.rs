//! Construction-time policy invariants.

use crate::model::{Assertion, Policy};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("policy {policy:?} has no validations")]
    MissingAssertions { policy: String },
    #[error("policy {policy:?} validation #{index} has an empty expression")]
    EmptyExpression { policy: String, index: usize },
}

impl Policy {
    /// Every policy needs at least one assertion, each with a non-empty expression.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if self.assertions.is_empty() {
            return Err(PolicyError::MissingAssertions {
                policy: self.name.clone(),
            });
        }
        if let Some(index) = self.assertions.iter().position(|a| a.expression.is_empty()) {
            return Err(PolicyError::EmptyExpression {
                policy: self.name.clone(),
                index,
            });
        }
        Ok(())
    }
}

impl Assertion {
    /// Message recorded when the assertion evaluates to false.
    pub fn failure_message(&self) -> String {
        if self.message.is_empty() {
            format!("failed expression: {}", self.expression)
        } else {
            self.message.clone()
        }
    }
}
