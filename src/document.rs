//! The in-memory preference document and the key operations applied to it
//!
//! Every calling convention loads a [`Document`], runs one of these
//! functions over it and (for mutations) hands it back to the store, so the
//! blocking, async and callback APIs cannot drift apart.

use serde_json::Value;
use std::fmt::Display;

/// A whole preference file: string keys mapped to (string) JSON values
///
/// Keys keep their insertion order.
pub type Document = serde_json::Map<String, Value>;

/// Text returned by `get_states` for keys that were never set
pub const UNDEFINED: &str = "undefined";

/// Render a stored value the way it is handed back to callers
///
/// Strings come back verbatim; anything else written by hand into the file
/// is rendered as compact JSON.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

pub(crate) fn has_key(doc: &Document, key: &str) -> bool {
    doc.contains_key(key)
}

pub(crate) fn get_state(doc: &Document, key: &str, default_value: &str) -> String {
    doc.get(key)
        .map_or_else(|| default_value.to_string(), render_value)
}

pub(crate) fn get_states<K: AsRef<str>>(doc: &Document, keys: &[K]) -> Vec<String> {
    keys.iter()
        .map(|key| {
            doc.get(key.as_ref())
                .map_or_else(|| UNDEFINED.to_string(), render_value)
        })
        .collect()
}

pub(crate) fn insert_state(doc: &mut Document, key: &str, value: String) {
    doc.insert(key.to_string(), Value::String(value));
}

/// Insert every pair, returning the written values in iteration order
pub(crate) fn insert_states(doc: &mut Document, states: &[(String, String)]) -> Vec<String> {
    states
        .iter()
        .map(|(key, value)| {
            insert_state(doc, key, value.clone());
            value.clone()
        })
        .collect()
}

/// Remove `key`, reporting whether the document changed
pub(crate) fn remove_key(doc: &mut Document, key: &str) -> bool {
    doc.shift_remove(key).is_some()
}

/// Render a sequence of key/value pairs into owned strings
pub(crate) fn stringify_pairs<I, K, V>(states: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Display,
{
    states
        .into_iter()
        .map(|(key, value)| (key.into(), value.to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_render_value() {
        assert_eq!(render_value(&json!("dark")), "dark");
        assert_eq!(render_value(&json!(14)), "14");
        assert_eq!(render_value(&json!(true)), "true");
        assert_eq!(render_value(&Value::Null), "null");
        assert_eq!(render_value(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_get_state_falls_back_to_default() {
        let d = doc(json!({"theme": "dark"}));
        assert_eq!(get_state(&d, "theme", "light"), "dark");
        assert_eq!(get_state(&d, "font", "14"), "14");
    }

    #[test]
    fn test_get_states_uses_undefined_sentinel() {
        let d = doc(json!({"a": "1", "b": "2"}));
        assert_eq!(get_states(&d, &["b", "c", "a"]), vec!["2", UNDEFINED, "1"]);
        assert!(get_states::<&str>(&d, &[]).is_empty());
    }

    #[test]
    fn test_insert_states_keeps_order() {
        let mut d = Document::new();
        let pairs = stringify_pairs([("z", 1), ("a", 2), ("m", 3)]);
        let written = insert_states(&mut d, &pairs);

        assert_eq!(written, vec!["1", "2", "3"]);
        let keys: Vec<&String> = d.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_remove_key() {
        let mut d = doc(json!({"a": "1"}));
        assert!(remove_key(&mut d, "a"));
        assert!(!remove_key(&mut d, "a"));
        assert!(!has_key(&d, "a"));
    }
}
