//! Offline ValidatingAdmissionPolicy evaluation.
//!
//! Re-exports the pure validation engine together with the CEL evaluator so
//! embedders can run policies against in-memory objects without the loader or CLI.

#![forbid(unsafe_code)]

pub use vapguard_cel::CelEvaluator;
pub use vapguard_domain::*;
pub use vapguard_types as types;
