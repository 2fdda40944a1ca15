//! Pure admission policy evaluation (no IO).
//!
//! Input: decoded objects and policies constructed elsewhere, plus an
//! [`ExpressionEvaluator`] implementation.
//! Output: an ordered [`vapguard_types::ValidationResultList`] and run counters.

#![forbid(unsafe_code)]

pub mod evaluator;
pub mod matcher;
pub mod model;
pub mod policy;
pub mod registry;
pub mod report;
pub mod resolve;
pub mod value;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use engine::{RunError, RunOptions, RunOutcome, RunStats, Validator};
pub use evaluator::{Binding, EvalError, EvalOutput, ExpressionEvaluator};
pub use model::{
    Assertion, GroupVersionKind, Policy, ResourceRule, Selection, TargetInfo, TypedObject,
};
pub use policy::PolicyError;
pub use registry::{RegistryError, TypeRegistration, TypeRegistry, TypeRegistryBuilder};
pub use resolve::{ResolveError, TypeResolver, parse_api_version};
pub use value::Value;
