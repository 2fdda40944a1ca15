//! Shared test utilities for the vapguard workspace.
//!
//! `xtask` needs `normalize_nondeterministic` at runtime, so it lives in its own
//! crate instead of a `#[cfg(test)]` module.

use serde_json::Value;

const TIMESTAMP_PLACEHOLDER: &str = "__TIMESTAMP__";
const VERSION_PLACEHOLDER: &str = "__VERSION__";

/// Normalize non-deterministic JSON fields for golden-file comparison.
///
/// - `tool.version` is replaced only on a root report envelope (an object with
///   `schema`, `tool`, `summary` and `results`). Manifest data nested in results
///   may legitimately contain `tool`/`version` keys.
/// - `started_at` / `finished_at` are replaced at any depth.
pub fn normalize_nondeterministic(mut value: Value) -> Value {
    if let Some(obj) = value.as_object_mut() {
        let is_envelope = ["schema", "tool", "summary", "results"]
            .iter()
            .all(|k| obj.contains_key(*k));
        if is_envelope
            && let Some(tool) = obj.get_mut("tool").and_then(Value::as_object_mut)
            && tool.contains_key("version")
        {
            tool.insert(
                "version".to_string(),
                Value::String(VERSION_PLACEHOLDER.to_string()),
            );
        }
    }
    normalize_timestamps(&mut value);
    value
}

fn normalize_timestamps(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for key in ["started_at", "finished_at"] {
                if let Some(v) = map.get_mut(key) {
                    *v = Value::String(TIMESTAMP_PLACEHOLDER.to_string());
                }
            }
            for val in map.values_mut() {
                normalize_timestamps(val);
            }
        }
        Value::Array(arr) => {
            for val in arr.iter_mut() {
                normalize_timestamps(val);
            }
        }
        _ => {}
    }
}
