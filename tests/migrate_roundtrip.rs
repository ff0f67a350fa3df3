//! Round-trip properties of the migrator: fixed point, idempotence, version stamp.

#[allow(dead_code)]
mod helpers;

use programme_engine::{CURRENT_SCHEMA_VERSION, ProgrammeDocument, migrate, parse};
use programme_engine::model::DeliveryModality;
use serde_json::{Value, json};

fn migrate_json(value: Value) -> Value {
    parse::to_value(&migrate(value)).expect("Should serialize")
}

fn samples() -> Vec<Value> {
    vec![
        json!(null),
        json!([1, 2, 3]),
        json!({}),
        json!({ "schemaVersion": "abc", "plos": ["a", 3], "ploToMimlos": { "p": [1, "a"] } }),
        json!({ "schemaVersion": 2, "versions": [{ "deliveryModalities": ["Blended", "ONLINE"] }] }),
        json!({ "mode": "MODULE_EDITOR", "moduleEditor": { "assignedModuleIds": ["m1"] } }),
        json!({ "schemaVersion": 7, "awardStandardIds": ["a", 1, "b"], "awardStandardNames": ["A"] }),
        serde_json::from_str(include_str!("fixtures/legacy_v1.json")).unwrap(),
        serde_json::from_str(include_str!("fixtures/current_v4.json")).unwrap(),
    ]
}

#[test]
fn current_fixture_is_a_fixed_point() {
    let doc: Value = serde_json::from_str(include_str!("fixtures/current_v4.json")).unwrap();
    assert_eq!(migrate_json(doc.clone()), doc);
}

#[test]
fn serialized_programme_is_a_fixed_point() {
    let doc = serde_json::to_value(helpers::complete_programme()).unwrap();
    assert_eq!(migrate_json(doc.clone()), doc);
}

#[test]
fn minimal_current_document_is_a_fixed_point() {
    let doc = json!({
        "schemaVersion": 4,
        "title": "T",
        "modules": [{ "id": "m1", "title": "A", "credits": 5, "mimlos": [], "assessments": [] }],
        "plos": [],
        "versions": [],
        "electiveDefinitions": [],
        "awardStandardIds": [],
        "awardStandardNames": [],
        "ploToMimlos": {}
    });
    assert_eq!(migrate_json(doc.clone()), doc);
}

#[test]
fn enum_spellings_are_not_rewritten() {
    let doc = json!({
        "schemaVersion": 4,
        "modules": [{ "id": "m1", "type": "ELECTIVE", "credits": 5 }],
        "plos": [],
        "versions": [{ "id": "v1", "deliveryModality": "Online", "onlineProctoredExams": "TBC" }],
        "electiveDefinitions": [],
        "awardStandardIds": [],
        "awardStandardNames": [],
        "ploToMimlos": {}
    });
    let programme = migrate(doc.clone());
    assert!(programme.modules[0].is_elective());
    assert_eq!(
        programme.versions[0].delivery_modality,
        Some(DeliveryModality::Online)
    );
    assert_eq!(parse::to_value(&programme).unwrap(), doc);
}

#[test]
fn migration_is_idempotent() {
    for raw in samples() {
        let once = migrate(raw.clone());
        let twice = migrate(parse::to_value(&once).unwrap());
        assert_eq!(once, twice, "not idempotent for {raw}");
    }
}

#[test]
fn every_output_is_current_version() {
    for raw in samples() {
        let programme: ProgrammeDocument = migrate(raw.clone());
        assert_eq!(programme.schema_version, CURRENT_SCHEMA_VERSION, "for {raw}");
        assert_eq!(
            migrate_json(raw)["schemaVersion"],
            json!(CURRENT_SCHEMA_VERSION)
        );
    }
}

#[test]
fn standard_names_track_ids() {
    let programme = migrate(json!({
        "schemaVersion": 4,
        "awardStandardIds": ["a", 1, "b"],
        "awardStandardNames": ["A"]
    }));
    assert_eq!(programme.award_standard_ids, vec!["a", "b"]);
    assert_eq!(programme.award_standard_names, vec!["A", ""]);
}

#[test]
fn fractional_numbers_round_trip() {
    let doc = json!({
        "schemaVersion": 4,
        "modules": [{ "id": "m1", "assessments": [{ "id": "a1", "weighting": 33.5 }] }]
    });
    let value = migrate_json(doc);
    assert_eq!(value["modules"][0]["assessments"][0]["weighting"], json!(33.5));
}
