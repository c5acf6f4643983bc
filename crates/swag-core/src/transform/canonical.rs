use serde::Serialize;
use serde_json::{Map, Value};
use similar::TextDiff;

/// Recursively sort object keys so equal structures serialize identically.
pub fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            let mut sorted = Map::with_capacity(map.len());
            for key in keys {
                sorted.insert(key.clone(), canonicalize(&map[key.as_str()]));
            }
            Value::Object(sorted)
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}

/// Pretty-printed JSON with sorted keys.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    serde_json::to_string_pretty(&canonicalize(&value))
}

/// Unified line diff between two texts.
pub fn unified_diff(old: &str, new: &str, old_label: &str, new_label: &str) -> String {
    let mut old = old.to_string();
    let mut new = new.to_string();
    // keep the last line from being reported as changed only for its newline
    if !old.ends_with('\n') {
        old.push('\n');
    }
    if !new.ends_with('\n') {
        new.push('\n');
    }
    TextDiff::from_lines(&old, &new)
        .unified_diff()
        .context_radius(3)
        .header(old_label, new_label)
        .to_string()
}
