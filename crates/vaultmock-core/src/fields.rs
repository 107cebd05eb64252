//! Lenient field extraction from loosely-typed JSON objects.
//!
//! Every helper returns the field's default when the key is missing, `null`,
//! or holds a JSON type the field cannot represent.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::timestamp::Timestamp;

/// String-to-string tag mapping carried by every record's properties.
pub type Tags = BTreeMap<String, String>;

pub(crate) fn string(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

/// Like [`string`], but an empty string also counts as absent.
pub(crate) fn non_empty_string(map: &Map<String, Value>, key: &str) -> Option<String> {
    string(map, key).filter(|s| !s.is_empty())
}

pub(crate) fn boolean(map: &Map<String, Value>, key: &str) -> Option<bool> {
    map.get(key).and_then(Value::as_bool)
}

pub(crate) fn passthrough(map: &Map<String, Value>, key: &str) -> Option<Value> {
    map.get(key).filter(|v| !v.is_null()).cloned()
}

pub(crate) fn timestamp(map: &Map<String, Value>, key: &str) -> Option<Timestamp> {
    map.get(key).and_then(Timestamp::from_value)
}

pub(crate) fn string_list(map: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = map.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
    )
}

/// Tags keep string values verbatim; other values are kept as JSON text.
pub(crate) fn tags(map: &Map<String, Value>, key: &str) -> Tags {
    map.get(key)
        .and_then(Value::as_object)
        .map(|obj| {
            obj.iter()
                .map(|(k, v)| {
                    let value = match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    (k.clone(), value)
                })
                .collect()
        })
        .unwrap_or_default()
}

/// The nested value at `key`, unless it is missing or `null`.
///
/// Sub-structure constructors treat a non-object value as an empty object,
/// so a present-but-mistyped field still yields an all-default instance.
pub(crate) fn nested<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// The object behind `value`, or an empty map for anything else.
pub(crate) fn object_or_empty(value: &Value) -> std::borrow::Cow<'_, Map<String, Value>> {
    match value.as_object() {
        Some(map) => std::borrow::Cow::Borrowed(map),
        None => std::borrow::Cow::Owned(Map::new()),
    }
}
