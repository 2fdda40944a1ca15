//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Rule selection (exclusion precedence, open selection, wildcards)
//! - Subresource wildcards
//! - Result shape and ordering determinism

use crate::engine::{RunOptions, Validator};
use crate::matcher::{matches, selects};
use crate::model::{Assertion, ResourceRule, Selection};
use crate::test_support::{
    FakeEvaluator, deployment, deployments_rule, identity, policy, sub_identity,
};
use proptest::prelude::*;
use vapguard_types::{ResourceIdentity, ValidationResult};

// ============================================================================
// Strategies
// ============================================================================

fn arb_segment() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9.-]{0,15}").unwrap()
}

fn arb_identity() -> impl Strategy<Value = ResourceIdentity> {
    (
        prop_oneof![Just(String::new()), arb_segment()],
        prop_oneof![Just("v1".to_string()), Just("v1beta1".to_string()), arb_segment()],
        arb_segment(),
        prop_oneof![Just(String::new()), arb_segment()],
    )
        .prop_map(|(group, version, resource, sub)| sub_identity(&group, &version, &resource, &sub))
}

fn arb_rule_for(id: ResourceIdentity) -> impl Strategy<Value = ResourceRule> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(move |(g, v, r)| {
        let pick = |exact: bool, value: &str| {
            if exact {
                vec![value.to_string()]
            } else {
                vec!["*".to_string()]
            }
        };
        ResourceRule::new(
            &pick(g, &id.group),
            &pick(v, &id.version),
            &pick(r, &id.full_resource()),
        )
    })
}

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-z][a-z0-9-]{0,12}").unwrap()
}

// ============================================================================
// Selection invariants
// ============================================================================

proptest! {
    #[test]
    fn exclusion_always_wins(
        (id, rule) in arb_identity().prop_flat_map(|id| (Just(id.clone()), arb_rule_for(id))),
        name in arb_name(),
    ) {
        let selection = Selection {
            include_rules: vec![rule.clone()],
            exclude_rules: vec![rule],
        };
        prop_assert!(!selects(&selection, &id, &name));
    }

    #[test]
    fn open_selection_selects_every_target(id in arb_identity(), name in arb_name()) {
        prop_assert!(selects(&Selection::default(), &id, &name));
    }

    #[test]
    fn full_wildcard_matches_any_identity(id in arb_identity(), name in arb_name()) {
        let rule = ResourceRule::new(&["*"], &["*"], &["*"]);
        prop_assert!(matches(&[rule], &id, &name));
    }

    #[test]
    fn exact_rule_matches_its_own_identity(
        (id, rule) in arb_identity().prop_flat_map(|id| (Just(id.clone()), arb_rule_for(id))),
        name in arb_name(),
    ) {
        prop_assert!(matches(&[rule], &id, &name));
    }

    #[test]
    fn subresource_wildcard_requires_a_subresource(
        resource in arb_segment(),
        sub in arb_segment(),
        name in arb_name(),
    ) {
        let entry = format!("{resource}/*");
        let rule = ResourceRule::new(&["*"], &["*"], &[entry.as_str()]);
        prop_assert!(matches(
            std::slice::from_ref(&rule),
            &sub_identity("", "v1", &resource, &sub),
            &name
        ));
        prop_assert!(!matches(&[rule], &identity("", "v1", &resource), &name));
    }

    #[test]
    fn resource_names_filter_is_exact(name in arb_name(), other in arb_name()) {
        prop_assume!(name != other);
        let rule = deployments_rule().with_names(&[name.as_str()]);
        let id = identity("apps", "v1", "deployments");
        prop_assert!(matches(std::slice::from_ref(&rule), &id, &name));
        prop_assert!(!matches(&[rule], &id, &other));
    }
}

// ============================================================================
// Orchestration invariants
// ============================================================================

proptest! {
    #[test]
    fn results_are_deterministic_and_ordered(
        names in prop::collection::vec(arb_name(), 1..8),
        expressions in prop::collection::vec(
            prop_oneof![
                Just("true"),
                Just("false"),
                Just("missing.field"),
                Just("value"),
                Just("name.startsWith('a')"),
            ],
            1..4,
        ),
    ) {
        let assertions: Vec<Assertion> =
            expressions.iter().map(|e| Assertion::new(*e, "")).collect();
        let targets: Vec<_> = names.iter().map(|n| deployment(n)).collect();
        let validator = Validator::new(
            vec![
                policy("first", vec![], assertions.clone()),
                policy("second", vec![deployments_rule()], assertions),
            ],
            targets,
        )
        .expect("validator");

        let a = validator.run(&FakeEvaluator, &RunOptions::default()).expect("run");
        let b = validator.run(&FakeEvaluator, &RunOptions::default()).expect("run");
        prop_assert_eq!(&a, &b);

        // Policy order outer, target order inner.
        let order: Vec<(String, String)> = a
            .results
            .iter()
            .map(|r| (r.policy.name.clone(), r.target.name.clone()))
            .collect();
        let mut expected = Vec::new();
        for p in ["first", "second"] {
            for n in &names {
                expected.push((p.to_string(), n.clone()));
            }
        }
        let evaluable = expressions
            .iter()
            .any(|e| *e != "missing.field" && *e != "value");
        if evaluable {
            prop_assert_eq!(order, expected);
        } else {
            prop_assert!(order.is_empty());
        }
    }

    #[test]
    fn success_is_and_of_evaluated_assertions(
        outcomes in prop::collection::vec(
            prop_oneof![Just("true"), Just("false"), Just("missing.field")],
            1..6,
        ),
    ) {
        let assertions: Vec<Assertion> =
            outcomes.iter().map(|e| Assertion::new(*e, "m")).collect();
        let validator = Validator::new(
            vec![policy("p", vec![], assertions)],
            vec![deployment("a")],
        )
        .expect("validator");
        let out = validator.run(&FakeEvaluator, &RunOptions::default()).expect("run");

        let evaluated: Vec<&str> = outcomes
            .iter()
            .copied()
            .filter(|e| *e != "missing.field")
            .collect();
        if evaluated.is_empty() {
            prop_assert!(out.results.is_empty());
        } else {
            prop_assert_eq!(out.results.len(), 1);
            let r = &out.results.as_slice()[0];
            prop_assert_eq!(r.success, evaluated.iter().all(|e| *e == "true"));
            let failed = evaluated.iter().filter(|e| **e == "false").count();
            prop_assert_eq!(r.validation_errors.len(), failed);
        }
    }
}

// ============================================================================
// Worked scenarios
// ============================================================================

fn run_single(
    assertions: Vec<Assertion>,
    selection: Selection,
    name: &str,
) -> Vec<ValidationResult> {
    let mut p = policy("p", vec![], assertions);
    p.selection = selection;
    Validator::new(vec![p], vec![deployment(name)])
        .expect("validator")
        .run(&FakeEvaluator, &RunOptions::default())
        .expect("run")
        .results
        .into_inner()
}

fn include_deployments() -> Selection {
    Selection {
        include_rules: vec![ResourceRule::new::<&str>(&[], &[], &["deployments"])],
        exclude_rules: Vec::new(),
    }
}

#[test]
fn scenario_matching_name_passes() {
    let results = run_single(
        vec![Assertion::new("name.startsWith('a')", "name must start with a")],
        include_deployments(),
        "a",
    );
    assert_eq!(results.len(), 1);
    assert!(results[0].success);
    assert!(results[0].validation_errors.is_empty());
}

#[test]
fn scenario_mismatching_name_fails_with_error() {
    let results = run_single(
        vec![Assertion::new("name.startsWith('a')", "name must start with a")],
        include_deployments(),
        "b",
    );
    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert_eq!(results[0].validation_errors.len(), 1);
    assert_eq!(
        results[0].validation_errors[0].expression,
        "name.startsWith('a')"
    );
    assert_eq!(
        results[0].validation_errors[0].message,
        "name must start with a"
    );
}

#[test]
fn scenario_excluded_name_yields_nothing() {
    let selection = Selection {
        include_rules: Vec::new(),
        exclude_rules: vec![ResourceRule::new(&["*"], &["*"], &["*"]).with_names(&["x"])],
    };
    let results = run_single(vec![Assertion::new("true", "")], selection, "x");
    assert!(results.is_empty());
}

#[test]
fn scenario_one_pass_one_fail() {
    let results = run_single(
        vec![
            Assertion::new("true", "always"),
            Assertion::new("false", "never"),
        ],
        include_deployments(),
        "a",
    );
    assert_eq!(results.len(), 1);
    assert!(!results[0].success);
    assert_eq!(results[0].validation_errors.len(), 1);
    assert_eq!(results[0].validation_errors[0].message, "never");
}

#[test]
fn scenario_missing_field_is_not_a_false_failure() {
    let results = run_single(
        vec![Assertion::new("missing.field", "")],
        include_deployments(),
        "a",
    );
    assert!(results.is_empty());
}
