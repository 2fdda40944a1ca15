use vapguard_types::{PolicyRef, TargetRef, ValidationError, ValidationResult, ValidationResultList};

/// One assertion that was actually evaluated for a (policy, target) pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub success: bool,
    pub message: String,
    pub expression: String,
}

/// Folds the evaluated assertions of a single (policy, target) pair.
#[derive(Debug)]
pub struct PairAccumulator {
    policy: PolicyRef,
    target: TargetRef,
    evaluated: u32,
    failures: Vec<ValidationError>,
}

impl PairAccumulator {
    pub fn new(policy: PolicyRef, target: TargetRef) -> Self {
        Self {
            policy,
            target,
            evaluated: 0,
            failures: Vec::new(),
        }
    }

    pub fn record(&mut self, outcome: ValidationOutcome) {
        self.evaluated += 1;
        if !outcome.success {
            self.failures.push(ValidationError {
                message: outcome.message,
                expression: outcome.expression,
            });
        }
    }

    pub fn evaluated(&self) -> u32 {
        self.evaluated
    }

    /// `None` when nothing was evaluated: such a pair is neither pass nor fail.
    pub fn finish(self) -> Option<ValidationResult> {
        if self.evaluated == 0 {
            return None;
        }
        Some(ValidationResult {
            policy: self.policy,
            target: self.target,
            success: self.failures.is_empty(),
            validation_errors: self.failures,
        })
    }
}

pub fn collect(results: Vec<ValidationResult>) -> ValidationResultList {
    ValidationResultList::new(results)
}
