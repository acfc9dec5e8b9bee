//! Request parameter flattening.
//!
//! Nested request objects are flattened to a single-level mapping keyed by
//! dot-joined paths before legacy signing, e.g.
//! `{"Filters": [{"Name": "zone"}]}` becomes `{"Filters.0.Name": "zone"}`.

use serde_json::Value;
use std::collections::BTreeMap;

/// Flattened request parameters, ordered by key (byte-wise ascending).
pub type FlatParams = BTreeMap<String, String>;

/// Flattens a nested value into dot-joined paths.
///
/// Arrays and objects both recurse: array indices and object keys become path
/// segments. `null` values are dropped at every level, so an absent field is
/// simply not sent. A top-level scalar has no key path and yields an empty map.
///
/// ```
/// use hiface_gateway::cloud::flatten;
/// use serde_json::json;
///
/// let flat = flatten(&json!({"Limit": 10, "Filters": [{"Name": "zone", "Values": ["ap-1"]}]}));
/// assert_eq!(flat["Limit"], "10");
/// assert_eq!(flat["Filters.0.Values.0"], "ap-1");
/// ```
#[must_use]
pub fn flatten(value: &Value) -> FlatParams {
    let mut out = FlatParams::new();
    let mut path = Vec::new();
    if matches!(value, Value::Object(_) | Value::Array(_)) {
        walk(value, &mut path, &mut out);
    }
    out
}

fn walk(value: &Value, path: &mut Vec<String>, out: &mut FlatParams) {
    match value {
        Value::Null => {}
        Value::Object(map) => {
            for (key, child) in map {
                path.push(key.clone());
                walk(child, path, out);
                path.pop();
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                path.push(index.to_string());
                walk(child, path, out);
                path.pop();
            }
        }
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            if let Some(text) = scalar_text(value) {
                out.insert(path.join("."), text);
            }
        }
    }
}

/// Renders a scalar the way it appears on the wire: strings verbatim,
/// numbers in JSON text form, booleans as `true`/`false`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_flat_object_passes_through() {
        let flat = flatten(&json!({"Limit": 10, "Offset": 0, "Zone": "ap-guangzhou-3"}));
        assert_eq!(flat.len(), 3);
        assert_eq!(flat["Limit"], "10");
        assert_eq!(flat["Offset"], "0");
        assert_eq!(flat["Zone"], "ap-guangzhou-3");
    }

    #[test]
    fn test_nested_arrays_and_objects() {
        let flat = flatten(&json!({
            "InstanceIds": ["ins-1", "ins-2"],
            "Filters": [
                {"Name": "zone", "Values": ["ap-guangzhou-1", "ap-guangzhou-2"]},
                {"Name": "instance-name", "Values": ["avatar"]}
            ],
            "Placement": {"Zone": "ap-guangzhou-3", "ProjectId": 0}
        }));

        assert_eq!(flat["InstanceIds.0"], "ins-1");
        assert_eq!(flat["InstanceIds.1"], "ins-2");
        assert_eq!(flat["Filters.0.Name"], "zone");
        assert_eq!(flat["Filters.0.Values.1"], "ap-guangzhou-2");
        assert_eq!(flat["Filters.1.Values.0"], "avatar");
        assert_eq!(flat["Placement.Zone"], "ap-guangzhou-3");
        assert_eq!(flat["Placement.ProjectId"], "0");
        assert_eq!(flat.len(), 9);
    }

    #[test]
    fn test_nulls_are_dropped_at_every_level() {
        let flat = flatten(&json!({
            "A": null,
            "B": {"C": null, "D": 1},
            "E": [null, "x", null]
        }));

        assert_eq!(flat.len(), 2);
        assert_eq!(flat["B.D"], "1");
        // Indices keep their position even when siblings are null.
        assert_eq!(flat["E.1"], "x");
        assert!(!flat.contains_key("A"));
        assert!(!flat.contains_key("E.0"));
    }

    #[test]
    fn test_empty_containers_contribute_nothing() {
        let flat = flatten(&json!({"Tags": [], "Placement": {}, "Limit": 1}));
        assert_eq!(flat.len(), 1);
    }

    #[test]
    fn test_scalar_rendering() {
        let flat = flatten(&json!({"Dry": true, "Ratio": 0.5, "Name": "a&b=c", "Neg": -3}));
        assert_eq!(flat["Dry"], "true");
        assert_eq!(flat["Ratio"], "0.5");
        assert_eq!(flat["Name"], "a&b=c");
        assert_eq!(flat["Neg"], "-3");
    }

    #[test]
    fn test_top_level_scalar_or_null_is_empty() {
        assert!(flatten(&json!(42)).is_empty());
        assert!(flatten(&json!("text")).is_empty());
        assert!(flatten(&Value::Null).is_empty());
    }

    #[test]
    fn test_top_level_array_uses_indices() {
        let flat = flatten(&json!(["a", {"b": 2}]));
        assert_eq!(flat["0"], "a");
        assert_eq!(flat["1.b"], "2");
    }

    #[test]
    fn test_every_leaf_appears_under_its_path() {
        let input = json!({
            "L1": {"L2": {"L3": [1, 2, {"L4": "deep"}]}},
            "Flag": false
        });
        let flat = flatten(&input);
        let expected = [
            ("L1.L2.L3.0", "1"),
            ("L1.L2.L3.1", "2"),
            ("L1.L2.L3.2.L4", "deep"),
            ("Flag", "false"),
        ];
        assert_eq!(flat.len(), expected.len());
        for (key, value) in expected {
            assert_eq!(flat.get(key).map(String::as_str), Some(value), "key {key}");
        }
        assert!(flat.values().all(|v| v != "null"));
    }
}
