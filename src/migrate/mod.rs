//! Migration phase: any JSON value → current-schema `ProgrammeDocument`.
//!
//! The raw document is upgraded as an untyped JSON object, one schema
//! version at a time. Steps only touch what they migrate, so a document
//! already at the current schema comes back unchanged. Nothing in this
//! phase fails: wrong-typed fields are treated as absent.

pub mod normalize;
pub mod steps;

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::model::ProgrammeDocument;
use crate::raw::{self, Object};

pub const CURRENT_SCHEMA_VERSION: u32 = 4;

/// One upgrade across a single schema-version boundary.
pub struct Migration {
    pub from: u32,
    pub to: u32,
    pub description: &'static str,
    pub up: fn(&mut Object),
}

/// All migrations in version order. Each `to` is the next one's `from`.
pub const MIGRATIONS: &[Migration] = &[
    Migration {
        from: 1,
        to: 2,
        description: "Singular award standard becomes awardStandardIds/awardStandardNames",
        up: steps::standards_to_arrays,
    },
    Migration {
        from: 2,
        to: 3,
        description: "Versions carry a single deliveryModality; legacy delivery fields removed",
        up: steps::collapse_delivery_modalities,
    },
    Migration {
        from: 3,
        to: 4,
        description: "ploToModules re-derived as ploToMimlos",
        up: steps::derive_plo_to_mimlos,
    },
];

/// Schema version a raw document claims. Missing or not a positive integer means 1.
pub fn detect_schema_version(doc: &Object) -> u32 {
    raw::positive_int(doc.get("schemaVersion"))
        .map_or(1, |v| u32::try_from(v).unwrap_or(u32::MAX))
}

/// Upgrade any JSON value to the current schema.
pub fn migrate(input: Value) -> ProgrammeDocument {
    ProgrammeDocument::from_object(migrate_object(match input {
        Value::Object(doc) => doc,
        _ => Map::new(),
    }))
}

/// Run the upgrade chain on a raw object, returning the current-schema raw object.
pub fn migrate_object(mut doc: Object) -> Object {
    let detected = detect_schema_version(&doc);
    if detected > CURRENT_SCHEMA_VERSION {
        warn!(
            detected,
            current = CURRENT_SCHEMA_VERSION,
            "document is newer than this engine, no migrations applied"
        );
    }

    normalize::normalize_entities(&mut doc);

    let mut version = detected;
    for migration in MIGRATIONS.iter().filter(|m| m.to > detected) {
        debug!(
            from = migration.from,
            to = migration.to,
            "{}",
            migration.description
        );
        (migration.up)(&mut doc);
        normalize::apply_defaults(&mut doc);
        version = migration.to;
    }
    debug!(detected, reached = version, "migration chain complete");

    normalize::finish(&mut doc);
    doc
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
    fn chain_is_contiguous_and_ends_at_current() {
        for pair in MIGRATIONS.windows(2) {
            assert_eq!(pair[0].to, pair[1].from);
        }
        assert_eq!(MIGRATIONS.first().map(|m| m.from), Some(1));
        assert_eq!(MIGRATIONS.last().map(|m| m.to), Some(CURRENT_SCHEMA_VERSION));
    }

    #[test]
    fn detect_defaults_to_one() {
        assert_eq!(detect_schema_version(&object(json!({}))), 1);
        assert_eq!(detect_schema_version(&object(json!({ "schemaVersion": "3" }))), 1);
        assert_eq!(detect_schema_version(&object(json!({ "schemaVersion": 0 }))), 1);
        assert_eq!(detect_schema_version(&object(json!({ "schemaVersion": 2.5 }))), 1);
        assert_eq!(detect_schema_version(&object(json!({ "schemaVersion": 3 }))), 3);
    }

    #[test]
    fn v3_document_skips_earlier_steps() {
        // A v3 document is past the standards step, so a stray singular id is swept, not converted.
        let doc = migrate_object(object(json!({
            "schemaVersion": 3,
            "awardStandardId": "business",
            "awardStandardIds": ["computing"],
            "awardStandardNames": ["Computing"]
        })));
        assert_eq!(doc["awardStandardIds"], json!(["computing"]));
        assert!(!doc.contains_key("awardStandardId"));
    }

    #[test]
    fn future_version_is_stamped_current() {
        let doc = migrate_object(object(json!({ "schemaVersion": 99, "ploToModules": { "p": ["m"] } })));
        assert_eq!(doc["schemaVersion"], json!(CURRENT_SCHEMA_VERSION));
        assert_eq!(doc["ploToMimlos"], json!({}));
        assert!(!doc.contains_key("ploToModules"));
    }

    #[test]
    fn module_editor_only_kept_in_editor_mode() {
        let owner = migrate_object(object(json!({ "schemaVersion": 4, "moduleEditor": {} })));
        assert!(!owner.contains_key("moduleEditor"));

        let editor = migrate_object(object(json!({ "schemaVersion": 4, "mode": "MODULE_EDITOR" })));
        assert_eq!(editor["moduleEditor"], json!({}));
    }

    #[test]
    fn non_object_input_becomes_blank_programme() {
        for raw in [json!(null), json!(42), json!("text"), json!([1, 2])] {
            let programme = migrate(raw);
            assert_eq!(programme.schema_version, CURRENT_SCHEMA_VERSION);
            assert!(programme.modules.is_empty());
            assert!(programme.plo_to_mimlos.is_empty());
        }
    }
}
