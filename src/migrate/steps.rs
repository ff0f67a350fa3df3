//! Per-version upgrade transforms. Each one converts schema N to N+1.

use std::collections::HashMap;

use serde_json::{Map, Value};
use tracing::warn;

use crate::model::DeliveryModality;
use crate::raw::{self, Object};

/// Standard ids from before the standards catalogue was re-keyed.
const LEGACY_STANDARD_IDS: [(&str, &str); 5] = [
    ("qqi-computing-l6-9", "computing"),
    ("qqi-business-l6-9", "business"),
    ("qqi-science-l6-9", "science"),
    ("qqi-engineering-l6-9", "engineering"),
    ("qqi-arts-humanities-l6-9", "arts-humanities"),
];

/// Programme-level fields retired together with multi-modality versions.
const LEGACY_DELIVERY_FIELDS: [&str; 4] =
    ["deliveryMode", "syncPattern", "standardsCache", "_cachedStandards"];

pub fn remap_standard_id(id: &str) -> &str {
    LEGACY_STANDARD_IDS
        .iter()
        .find(|(legacy, _)| *legacy == id)
        .map_or(id, |&(_, current)| current)
}

// ---------------------------------------------------------------------------
// v1 → v2: singular award standard becomes parallel arrays
// ---------------------------------------------------------------------------

pub fn standards_to_arrays(doc: &mut Object) {
    let id = raw::take_string(doc, "awardStandardId");
    let name = raw::take_string(doc, "awardStandardName").unwrap_or_default();

    if let Some(id) = id {
        let (ids, names) = if id.trim().is_empty() {
            (Vec::new(), Vec::new())
        } else {
            (vec![Value::String(id)], vec![Value::String(name)])
        };
        doc.insert("awardStandardIds".into(), Value::Array(ids));
        doc.insert("awardStandardNames".into(), Value::Array(names));
    }

    for id in raw::ensure_array(doc, "awardStandardIds").iter_mut() {
        if let Value::String(s) = id {
            let current = remap_standard_id(s);
            if current != s.as_str() {
                *s = current.to_string();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// v2 → v3: one delivery modality per version, legacy delivery fields dropped
// ---------------------------------------------------------------------------

pub fn collapse_delivery_modalities(doc: &mut Object) {
    let mut version_ids = Vec::new();
    for version in raw::ensure_array(doc, "versions")
        .iter_mut()
        .filter_map(Value::as_object_mut)
    {
        if let Some(Value::Array(modalities)) = version.remove("deliveryModalities") {
            // Only the first modality survives; later ones are discarded.
            if modalities.len() > 1 {
                warn!(
                    version = raw::str_field(version, "id").unwrap_or_default(),
                    discarded = modalities.len() - 1,
                    "collapsing deliveryModalities to a single modality"
                );
            }
            if let Some(first @ Value::String(_)) = modalities.into_iter().next() {
                version.insert("deliveryModality".into(), first);
            }
        }
        canonicalize_modality(version);
        if let Some(id) = raw::str_field(version, "id") {
            version_ids.push(id.to_string());
        }
    }

    // Effort entries are keyed "{versionId}_{modality}"; follow the new spelling.
    let modules = doc.get_mut("modules").and_then(Value::as_array_mut);
    for module in modules.into_iter().flatten().filter_map(Value::as_object_mut) {
        if let Some(Value::Object(effort)) = module.get_mut("effortHours") {
            rekey(effort, |key| {
                version_ids.iter().find_map(|id| {
                    let modality = key.strip_prefix(id.as_str())?.strip_prefix('_')?;
                    Some(format!("{}_{}", id, DeliveryModality::parse(modality)?.as_str()))
                })
            });
        }
    }

    for key in LEGACY_DELIVERY_FIELDS {
        doc.remove(key);
    }
}

/// Older wizards wrote `"Blended"`/`"Online"`; the modality and its pattern
/// keys switch to the canonical upper-case spelling.
fn canonicalize_modality(version: &mut Object) {
    if let Some(Value::String(modality)) = version.get_mut("deliveryModality") {
        if let Some(canonical) = DeliveryModality::parse(modality) {
            *modality = canonical.as_str().to_string();
        }
    }
    if let Some(Value::Object(patterns)) = version.get_mut("deliveryPatterns") {
        rekey(patterns, |key| {
            DeliveryModality::parse(key).map(|modality| modality.as_str().to_string())
        });
    }
}

/// Move entries to their canonical key. An entry already under that key wins.
fn rekey(map: &mut Object, canonical: impl Fn(&str) -> Option<String>) {
    let moves: Vec<(String, String)> = map
        .keys()
        .filter_map(|key| {
            canonical(key)
                .filter(|target| target != key)
                .map(|target| (key.clone(), target))
        })
        .collect();
    for (from, to) in moves {
        if let Some(value) = map.remove(&from) {
            map.entry(to).or_insert(value);
        }
    }
}

// ---------------------------------------------------------------------------
// v3 → v4: PLO→module mapping re-derived as PLO→MIMLO
// ---------------------------------------------------------------------------

pub fn derive_plo_to_mimlos(doc: &mut Object) {
    let legacy = doc.remove("ploToModules");
    if matches!(doc.get("ploToMimlos"), Some(Value::Object(_))) {
        return;
    }
    let Some(Value::Object(plo_to_modules)) = legacy else {
        return;
    };

    let mimlos_by_module: HashMap<String, Vec<String>> = raw::ensure_array(doc, "modules")
        .iter()
        .filter_map(|module| {
            let id = module.get("id")?.as_str()?.to_string();
            let mimlos = module
                .get("mimlos")
                .and_then(Value::as_array)
                .map(|mimlos| {
                    mimlos
                        .iter()
                        .filter_map(|m| m.get("id").and_then(Value::as_str))
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default();
            Some((id, mimlos))
        })
        .collect();

    let mut plo_to_mimlos = Map::new();
    for (plo_id, module_ids) in plo_to_modules {
        let mimlo_ids: Vec<String> = raw::string_items(Some(&module_ids))
            .iter()
            .filter_map(|module_id| mimlos_by_module.get(module_id))
            .flatten()
            .cloned()
            .collect();
        plo_to_mimlos.insert(plo_id, Value::from(mimlo_ids));
    }
    doc.insert("ploToMimlos".into(), Value::Object(plo_to_mimlos));
}
