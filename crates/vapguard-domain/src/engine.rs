use crate::evaluator::{Binding, EvalError, EvalOutput, ExpressionEvaluator};
use crate::matcher::selects;
use crate::model::{Policy, TargetInfo, TypedObject};
use crate::policy::PolicyError;
use crate::report::{PairAccumulator, ValidationOutcome, collect};
use crate::resolve::{ResolveError, TypeResolver};
use std::time::Instant;
use vapguard_types::{PolicyRef, ValidationResultList};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum RunError {
    #[error("no target resources to validate")]
    NoTargets,
    #[error("no policies to validate against")]
    NoPolicies,
    #[error(transparent)]
    Policy(#[from] PolicyError),
    #[error("{path}: {error}")]
    Resolve { path: String, error: ResolveError },
    #[error("validation deadline exceeded")]
    DeadlineExceeded,
}

#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Checked between assertion evaluations; expiry discards partial results.
    pub deadline: Option<Instant>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunStats {
    pub selected_pairs: u32,
    pub assertions_evaluated: u32,
    pub assertions_not_evaluated: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RunOutcome {
    pub results: ValidationResultList,
    pub stats: RunStats,
}

/// A validated set of policies and resolved targets, ready to run.
#[derive(Clone, Debug)]
pub struct Validator {
    policies: Vec<Policy>,
    targets: Vec<TargetInfo>,
}

impl Validator {
    pub fn new(policies: Vec<Policy>, targets: Vec<TargetInfo>) -> Result<Self, RunError> {
        if targets.is_empty() {
            return Err(RunError::NoTargets);
        }
        if policies.is_empty() {
            return Err(RunError::NoPolicies);
        }
        for policy in &policies {
            policy.validate()?;
        }
        Ok(Self { policies, targets })
    }

    /// Resolve every object's identity, then build. The first unknown type aborts.
    pub fn from_objects(
        policies: Vec<Policy>,
        objects: Vec<TypedObject>,
        resolver: &TypeResolver<'_>,
    ) -> Result<Self, RunError> {
        let targets = objects
            .iter()
            .map(|obj| {
                resolver
                    .target_info(obj)
                    .map_err(|error| RunError::Resolve {
                        path: obj.source.to_string(),
                        error,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(policies, targets)
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn targets(&self) -> &[TargetInfo] {
        &self.targets
    }

    /// Evaluate every policy against every selected target.
    ///
    /// Results follow policy order, then target order. Evaluation failures and
    /// non-boolean results are logged and skipped.
    pub fn run<E: ExpressionEvaluator>(
        &self,
        evaluator: &E,
        opts: &RunOptions,
    ) -> Result<RunOutcome, RunError> {
        let mut results = Vec::new();
        let mut stats = RunStats::default();

        for policy in &self.policies {
            let selected: Vec<&TargetInfo> = self
                .targets
                .iter()
                .filter(|t| selects(&policy.selection, t.identity(), t.name()))
                .collect();
            tracing::debug!(
                policy = %policy.name,
                selected = selected.len(),
                total = self.targets.len(),
                "policy selection"
            );
            if selected.is_empty() {
                continue;
            }

            let programs: Vec<Result<E::Compiled, EvalError>> = policy
                .assertions
                .iter()
                .map(|assertion| {
                    let compiled = evaluator.compile(&assertion.expression);
                    if let Err(err) = &compiled {
                        tracing::warn!(
                            policy = %policy.name,
                            expression = %assertion.expression,
                            error = %err,
                            "expression does not compile; skipping it for every target"
                        );
                    }
                    compiled
                })
                .collect();

            for target in selected {
                stats.selected_pairs += 1;
                let target_ref = target.to_ref();
                let resource = target_ref.display_resource();
                let mut pair = PairAccumulator::new(
                    PolicyRef {
                        name: policy.name.clone(),
                    },
                    target_ref,
                );

                for (assertion, program) in policy.assertions.iter().zip(&programs) {
                    check_deadline(opts)?;

                    let Ok(program) = program else {
                        stats.assertions_not_evaluated += 1;
                        continue;
                    };

                    match evaluator.evaluate(program, &Binding::object(target.data())) {
                        Ok(EvalOutput::Bool(success)) => {
                            stats.assertions_evaluated += 1;
                            pair.record(ValidationOutcome {
                                success,
                                message: assertion.failure_message(),
                                expression: assertion.expression.clone(),
                            });
                        }
                        Ok(EvalOutput::NonBoolean(value)) => {
                            stats.assertions_not_evaluated += 1;
                            tracing::warn!(
                                policy = %policy.name,
                                resource = %resource,
                                expression = %assertion.expression,
                                value = %value,
                                "expression did not return a boolean"
                            );
                        }
                        Err(err) => {
                            stats.assertions_not_evaluated += 1;
                            tracing::warn!(
                                policy = %policy.name,
                                resource = %resource,
                                expression = %assertion.expression,
                                error = %err,
                                "expression evaluation failed"
                            );
                        }
                    }
                }

                if let Some(result) = pair.finish() {
                    results.push(result);
                }
            }
        }

        Ok(RunOutcome {
            results: collect(results),
            stats,
        })
    }
}

fn check_deadline(opts: &RunOptions) -> Result<(), RunError> {
    match opts.deadline {
        Some(deadline) if Instant::now() >= deadline => Err(RunError::DeadlineExceeded),
        _ => Ok(()),
    }
}
