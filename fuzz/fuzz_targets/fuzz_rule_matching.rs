//! Fuzz target for resource rule matching.
//!
//! Goal: matching should **never panic**, whatever rule entries or
//! identities it is given (wildcards, `resource/sub` forms, empty strings).
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_rule_matching
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vapguard_domain::ResourceRule;
use vapguard_domain::matcher::matches;
use vapguard_types::ResourceIdentity;

#[derive(Arbitrary, Debug)]
struct MatchInput {
    groups: Vec<String>,
    versions: Vec<String>,
    resources: Vec<String>,
    names: Vec<String>,
    identity: (String, String, String, String),
    name: String,
}

fuzz_target!(|input: MatchInput| {
    if input.resources.len() > 32 || input.names.len() > 32 {
        return;
    }
    let rule = ResourceRule::new(&input.groups, &input.versions, &input.resources)
        .with_names(&input.names);
    let (group, version, resource, sub_resource) = input.identity;
    let identity = ResourceIdentity {
        group,
        version,
        resource,
        sub_resource,
        ..ResourceIdentity::default()
    };
    let _ = matches(&[rule], &identity, &input.name);
});
