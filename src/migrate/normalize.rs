//! Shape normalization shared by every point of the migration chain.

use std::collections::HashSet;

use serde_json::Value;

use crate::raw::{self, Object};

use super::CURRENT_SCHEMA_VERSION;

/// Root keys that must always hold an array.
const ROOT_ARRAYS: [&str; 6] = [
    "modules",
    "plos",
    "versions",
    "electiveDefinitions",
    "awardStandardIds",
    "awardStandardNames",
];

/// Root keys no current document carries.
pub const OBSOLETE_ROOT_FIELDS: [&str; 7] = [
    "awardStandardId",
    "awardStandardName",
    "deliveryMode",
    "syncPattern",
    "standardsCache",
    "_cachedStandards",
    "ploToModules",
];

/// Root scalars and the shape each must have; anything else is dropped as absent.
const ROOT_SCALARS: [(&str, fn(&Value) -> bool); 5] = [
    ("title", Value::is_string),
    ("awardType", Value::is_string),
    ("nfqLevel", |v| v.is_null() || v.is_i64()),
    ("totalCredits", Value::is_i64),
    ("mode", |v| matches!(v.as_str(), Some("PROGRAMME_OWNER" | "MODULE_EDITOR"))),
];

/// Default the root collections to empty arrays.
pub fn apply_defaults(doc: &mut Object) {
    for key in ROOT_ARRAYS {
        raw::ensure_array(doc, key);
    }
}

/// Coerce legacy outcome strings into objects and fill in missing entity ids.
///
/// Runs before any version step, since the outcome-mapping step needs MIMLO ids.
pub fn normalize_entities(doc: &mut Object) {
    apply_defaults(doc);

    let modules = raw::retain_objects(doc, "modules");
    let mut module_ids = raw::collect_ids(modules.iter());
    raw::fill_missing_ids(modules, "mod", &mut module_ids);

    let mut mimlo_ids = HashSet::new();
    let mut assessment_ids = HashSet::new();
    for module in modules.iter_mut().filter_map(Value::as_object_mut) {
        if module.contains_key("mimlos") {
            mimlo_ids.extend(raw::collect_ids(raw::coerce_outcomes(module, "mimlos").iter()));
        }
        if let Some(Value::Array(assessments)) = module.get("assessments") {
            assessment_ids.extend(raw::collect_ids(assessments.iter()));
        }
    }
    for module in modules.iter_mut().filter_map(Value::as_object_mut) {
        if let Some(Value::Array(mimlos)) = module.get_mut("mimlos") {
            raw::fill_missing_ids(mimlos, "mimlo", &mut mimlo_ids);
        }
        if let Some(Value::Array(assessments)) = module.get_mut("assessments") {
            raw::fill_missing_ids(assessments, "asm", &mut assessment_ids);
        }
    }

    let plos = raw::coerce_outcomes(doc, "plos");
    let mut plo_ids = raw::collect_ids(plos.iter());
    raw::fill_missing_ids(plos, "plo", &mut plo_ids);

    let versions = raw::retain_objects(doc, "versions");
    let mut version_ids = raw::collect_ids(versions.iter());
    raw::fill_missing_ids(versions, "ver", &mut version_ids);
    fill_nested_ids(versions, "stages", "stage");

    let definitions = raw::retain_objects(doc, "electiveDefinitions");
    let mut definition_ids = raw::collect_ids(definitions.iter());
    raw::fill_missing_ids(definitions, "edef", &mut definition_ids);
    fill_nested_ids(definitions, "groups", "egrp");
}

/// Fill ids on the `key` arrays of every parent, unique across all parents.
fn fill_nested_ids(parents: &mut [Value], key: &str, prefix: &str) {
    let mut used = HashSet::new();
    for parent in parents.iter() {
        if let Some(Value::Array(children)) = parent.get(key) {
            used.extend(raw::collect_ids(children.iter()));
        }
    }
    for parent in parents.iter_mut() {
        if let Some(Value::Array(children)) = parent.get_mut(key) {
            raw::fill_missing_ids(children, prefix, &mut used);
        }
    }
}

/// Final pass: enforce every current-schema root invariant and stamp the version.
pub fn finish(doc: &mut Object) {
    apply_defaults(doc);

    let mapping = raw::ensure_object(doc, "ploToMimlos");
    for ids in mapping.values_mut() {
        if !is_string_array(ids) {
            *ids = Value::from(raw::string_items(Some(&*ids)));
        }
    }

    for key in OBSOLETE_ROOT_FIELDS {
        doc.remove(key);
    }

    for (key, well_typed) in ROOT_SCALARS {
        if doc.get(key).is_some_and(|value| !well_typed(value)) {
            doc.remove(key);
        }
    }

    align_standard_names(doc);
    enforce_mode(doc);

    doc.insert("schemaVersion".into(), Value::from(CURRENT_SCHEMA_VERSION));
}

fn is_string_array(value: &Value) -> bool {
    value
        .as_array()
        .is_some_and(|items| items.iter().all(Value::is_string))
}

/// `awardStandardNames` runs parallel to `awardStandardIds`: pad with `""` or truncate.
fn align_standard_names(doc: &mut Object) {
    let ids = raw::ensure_array(doc, "awardStandardIds");
    ids.retain(Value::is_string);
    let len = ids.len();

    let names = raw::ensure_array(doc, "awardStandardNames");
    for name in names.iter_mut() {
        if !name.is_string() {
            *name = Value::String(String::new());
        }
    }
    names.resize(len, Value::String(String::new()));
}

/// `moduleEditor` only exists in module-editor mode, and always exists there.
fn enforce_mode(doc: &mut Object) {
    if raw::str_field(doc, "mode") == Some("MODULE_EDITOR") {
        raw::ensure_object(doc, "moduleEditor");
    } else {
        doc.remove("moduleEditor");
    }
}
