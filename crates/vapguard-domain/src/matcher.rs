//! Include/exclude rule matching.

use crate::model::{ResourceRule, Selection};
use std::collections::BTreeSet;
use vapguard_types::ResourceIdentity;
use vapguard_types::ids::WILDCARD;

/// True if any rule matches. An empty rule list matches everything.
pub fn matches(rules: &[ResourceRule], identity: &ResourceIdentity, name: &str) -> bool {
    rules.is_empty() || rules.iter().any(|rule| rule_matches(rule, identity, name))
}

/// Exclusion first, then inclusion. Empty rule sets are skipped.
pub fn selects(selection: &Selection, identity: &ResourceIdentity, name: &str) -> bool {
    if !selection.exclude_rules.is_empty() && matches(&selection.exclude_rules, identity, name) {
        return false;
    }
    selection.include_rules.is_empty() || matches(&selection.include_rules, identity, name)
}

fn rule_matches(rule: &ResourceRule, identity: &ResourceIdentity, name: &str) -> bool {
    dimension_matches(&rule.api_groups, &identity.group)
        && dimension_matches(&rule.api_versions, &identity.version)
        && resources_match(&rule.resources, identity)
        && (rule.resource_names.is_empty() || rule.resource_names.contains(name))
}

fn dimension_matches(set: &BTreeSet<String>, value: &str) -> bool {
    set.is_empty() || set.contains(WILDCARD) || set.contains(value)
}

fn resources_match(set: &BTreeSet<String>, identity: &ResourceIdentity) -> bool {
    set.is_empty() || set.iter().any(|entry| resource_entry_matches(entry, identity))
}

fn resource_entry_matches(entry: &str, identity: &ResourceIdentity) -> bool {
    if entry == WILDCARD {
        return true;
    }
    match entry.split_once('/') {
        None => entry == identity.resource,
        Some((resource, sub)) => {
            let resource_ok = resource == WILDCARD || resource == identity.resource;
            let sub_ok = if sub == WILDCARD {
                !identity.sub_resource.is_empty()
            } else {
                sub == identity.sub_resource
            };
            resource_ok && sub_ok
        }
    }
}
