//! Stable identifiers shared by the loader, domain, and reporters.

/// Variable name under which a target's data tree is bound for expression evaluation.
pub const OBJECT_VARIABLE: &str = "object";

// Policy kinds
pub const KIND_VALIDATING_ADMISSION_POLICY: &str = "ValidatingAdmissionPolicy";
pub const KIND_VALIDATING_ADMISSION_POLICY_BINDING: &str = "ValidatingAdmissionPolicyBinding";
pub const GROUP_ADMISSION_REGISTRATION: &str = "admissionregistration.k8s.io";

// Rule wildcard
pub const WILDCARD: &str = "*";

// Reporter strings
pub const ALL_SUCCESS_MESSAGE: &str = "all validation success!";
pub const RESULT_PASS: &str = "Pass";
pub const RESULT_FAIL: &str = "Fail";

// Config
pub const SCHEMA_CONFIG_V1: &str = "vapguard.config.v1";
