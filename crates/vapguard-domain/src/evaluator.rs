//! Seam to the boolean expression language.
//!
//! The domain never parses expressions itself. An implementation compiles an
//! expression once and then evaluates it against one [`Binding`] per target.

use crate::value::Value;
use vapguard_types::ids::OBJECT_VARIABLE;

/// The single top-level variable exposed to an expression.
#[derive(Clone, Copy, Debug)]
pub struct Binding<'a> {
    pub name: &'a str,
    pub value: &'a Value,
}

impl<'a> Binding<'a> {
    /// Bind a target's data tree as `object`.
    pub fn object(value: &'a Value) -> Self {
        Self {
            name: OBJECT_VARIABLE,
            value,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalOutput {
    Bool(bool),
    /// The expression produced something other than a boolean; carries a
    /// printable rendition of the value.
    NonBoolean(String),
}

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("compile error: {0}")]
    Compile(String),
    #[error("evaluation error: {0}")]
    Evaluate(String),
}

pub trait ExpressionEvaluator {
    type Compiled;

    fn compile(&self, expression: &str) -> Result<Self::Compiled, EvalError>;

    fn evaluate(
        &self,
        compiled: &Self::Compiled,
        binding: &Binding<'_>,
    ) -> Result<EvalOutput, EvalError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_binding_uses_the_object_variable() {
        let value = Value::from("x");
        let binding = Binding::object(&value);
        assert_eq!(binding.name, "object");
        assert_eq!(binding.value, &value);
    }

    #[test]
    fn errors_render_their_phase() {
        assert_eq!(
            EvalError::Compile("unexpected token".into()).to_string(),
            "compile error: unexpected token"
        );
        assert_eq!(
            EvalError::Evaluate("no such key: foo".into()).to_string(),
            "evaluation error: no such key: foo"
        );
    }
}
