//! Field-shape helpers over raw (untyped) programme JSON.
//!
//! Every helper here is total: a wrong-typed field is treated as absent and
//! replaced, never reported. Migration steps are built from these.

use std::collections::HashSet;

use serde_json::{Map, Value};

pub type Object = Map<String, Value>;

/// Ensure `obj[key]` is an array, replacing any other value with `[]`.
pub fn ensure_array<'a>(obj: &'a mut Object, key: &str) -> &'a mut Vec<Value> {
    let slot = obj.entry(key).or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("slot was just set to an array"),
    }
}

/// Ensure `obj[key]` is an object, replacing any other value with `{}`.
pub fn ensure_object<'a>(obj: &'a mut Object, key: &str) -> &'a mut Object {
    let slot = obj.entry(key).or_insert_with(|| Value::Object(Map::new()));
    if !slot.is_object() {
        *slot = Value::Object(Map::new());
    }
    match slot {
        Value::Object(map) => map,
        _ => unreachable!("slot was just set to an object"),
    }
}

/// Borrow `obj[key]` as a string slice if it is one.
pub fn str_field<'a>(obj: &'a Object, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

/// Remove `obj[key]` and return it if it was a string.
pub fn take_string(obj: &mut Object, key: &str) -> Option<String> {
    match obj.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// A JSON integer ≥ 1. Floats, zero, negatives and non-numbers are `None`.
pub fn positive_int(value: Option<&Value>) -> Option<u64> {
    value.and_then(Value::as_u64).filter(|n| *n >= 1)
}

/// Ids already present (as strings) on the objects in `items`.
pub fn collect_ids<'a>(items: impl IntoIterator<Item = &'a Value>) -> HashSet<String> {
    items
        .into_iter()
        .filter_map(|item| item.get("id").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

/// Smallest `"{prefix}_{n}"` (n ≥ 1) not in `used`. The result is recorded in `used`.
pub fn next_id(prefix: &str, used: &mut HashSet<String>) -> String {
    let mut n = 1usize;
    loop {
        let candidate = format!("{prefix}_{n}");
        if !used.contains(&candidate) {
            used.insert(candidate.clone());
            return candidate;
        }
        n += 1;
    }
}

/// Give every object in `items` lacking a string `id` a generated one.
pub fn fill_missing_ids(items: &mut [Value], prefix: &str, used: &mut HashSet<String>) {
    for item in items.iter_mut() {
        let Value::Object(obj) = item else { continue };
        if !obj.get("id").is_some_and(Value::is_string) {
            obj.insert("id".into(), Value::String(next_id(prefix, used)));
        }
    }
}

/// Keep only object entries in `obj[key]`, dropping everything else.
pub fn retain_objects<'a>(obj: &'a mut Object, key: &str) -> &'a mut Vec<Value> {
    let items = ensure_array(obj, key);
    items.retain(Value::is_object);
    items
}

/// Normalize an outcome list (PLOs, MIMLOs) in `obj[key]`.
///
/// Bare strings are legacy outcomes and become `{ "text": s }`; ids are
/// filled in afterwards by [`fill_missing_ids`]. Other non-objects are dropped.
pub fn coerce_outcomes<'a>(obj: &'a mut Object, key: &str) -> &'a mut Vec<Value> {
    let items = ensure_array(obj, key);
    let taken = std::mem::take(items);
    items.extend(taken.into_iter().filter_map(|item| match item {
        Value::String(text) => {
            let mut outcome = Map::new();
            outcome.insert("text".into(), Value::String(text));
            Some(Value::Object(outcome))
        }
        Value::Object(_) => Some(item),
        _ => None,
    }));
    items
}

/// Ordered string entries of an array value; non-strings are skipped.
pub fn string_items(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Object {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn ensure_array_replaces_wrong_type() {
        let mut obj = object(json!({ "modules": "oops" }));
        assert!(ensure_array(&mut obj, "modules").is_empty());
        assert_eq!(obj["modules"], json!([]));
    }

    #[test]
    fn ensure_array_keeps_existing_items() {
        let mut obj = object(json!({ "plos": [1, 2] }));
        assert_eq!(ensure_array(&mut obj, "plos").len(), 2);
    }

    #[test]
    fn ensure_object_inserts_when_missing() {
        let mut obj = Map::new();
        ensure_object(&mut obj, "ploToMimlos");
        assert_eq!(Value::Object(obj), json!({ "ploToMimlos": {} }));
    }

    #[test]
    fn positive_int_rejects_non_integers() {
        assert_eq!(positive_int(Some(&json!(3))), Some(3));
        assert_eq!(positive_int(Some(&json!(0))), None);
        assert_eq!(positive_int(Some(&json!(-2))), None);
        assert_eq!(positive_int(Some(&json!(2.5))), None);
        assert_eq!(positive_int(Some(&json!("2"))), None);
        assert_eq!(positive_int(None), None);
    }

    #[test]
    fn next_id_skips_used_ids() {
        let mut used: HashSet<String> = ["plo_1".to_string(), "plo_3".to_string()].into();
        assert_eq!(next_id("plo", &mut used), "plo_2");
        assert_eq!(next_id("plo", &mut used), "plo_4");
    }

    #[test]
    fn coerce_outcomes_converts_strings_and_drops_junk() {
        let mut obj = object(json!({ "plos": ["Analyse data", { "id": "p9", "text": "x" }, 7, null] }));
        let plos = coerce_outcomes(&mut obj, "plos");
        let mut used = collect_ids(plos.iter());
        fill_missing_ids(plos, "plo", &mut used);
        assert_eq!(
            obj["plos"],
            json!([{ "id": "plo_1", "text": "Analyse data" }, { "id": "p9", "text": "x" }])
        );
    }

    #[test]
    fn string_items_skips_non_strings() {
        assert_eq!(string_items(Some(&json!(["a", 1, "b"]))), vec!["a", "b"]);
        assert!(string_items(Some(&json!("a"))).is_empty());
    }
}
