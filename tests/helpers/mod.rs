use std::collections::BTreeMap;

use programme_engine::model::*;

// =============================================================================
// Programme builders
// =============================================================================

/// A current-schema programme that raises no flags: 60 credits over two
/// 30-credit modules, six mapped PLOs, one F2F version with one stage.
pub fn complete_programme() -> Programme {
    let plos: Vec<Plo> = (1..=6).map(|n| plo(&format!("p{n}"))).collect();
    let plo_to_mimlos = plos
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let mimlo = if i % 2 == 0 { "m1-o1" } else { "m2-o1" };
            (p.id.clone(), vec![mimlo.to_string()])
        })
        .collect();

    Programme {
        schema_version: programme_engine::CURRENT_SCHEMA_VERSION,
        title: "Higher Diploma in Science in Computing".into(),
        award_type: "Higher Diploma".into(),
        nfq_level: Some(8),
        total_credits: 60,
        award_standard_ids: vec!["computing".into()],
        award_standard_names: vec!["Computing".into()],
        modules: vec![
            module_with_hours("m1", 30, "v1_F2F", 750.0),
            module_with_hours("m2", 30, "v1_F2F", 750.0),
        ],
        plos,
        plo_to_mimlos,
        versions: vec![version("v1", DeliveryModality::F2f)],
        ..Programme::default()
    }
}

// =============================================================================
// Entity builders
// =============================================================================

pub fn plo(id: &str) -> Plo {
    Plo {
        id: id.into(),
        text: format!("Outcome {id}"),
        ..Plo::default()
    }
}

/// Mandatory module with one MIMLO (`{id}-o1`) and a single 100% assessment.
pub fn module(id: &str, credits: i64) -> Module {
    Module {
        id: id.into(),
        code: id.to_uppercase(),
        title: format!("Module {id}"),
        credits,
        mimlos: vec![Mimlo {
            id: format!("{id}-o1"),
            text: "Explain the core concepts".into(),
            ..Mimlo::default()
        }],
        assessments: vec![assessment(&format!("{id}-a1"), 100.0)],
        ..Module::default()
    }
}

pub fn module_with_hours(id: &str, credits: i64, key: &str, hours: f64) -> Module {
    let mut m = module(id, credits);
    m.effort_hours = BTreeMap::from([(key.to_string(), effort(hours / 3.0, hours * 2.0 / 3.0))]);
    m
}

pub fn elective_module(id: &str, credits: i64) -> Module {
    Module {
        module_type: ModuleType::Elective,
        ..module(id, credits)
    }
}

pub fn assessment(id: &str, weighting: f64) -> Assessment {
    Assessment {
        id: id.into(),
        title: format!("Assessment {id}"),
        assessment_type: "Project".into(),
        weighting,
        ..Assessment::default()
    }
}

pub fn effort(classroom: f64, independent: f64) -> EffortHours {
    EffortHours {
        classroom_hours: classroom,
        independent_learning_hours: independent,
        ..EffortHours::default()
    }
}

/// Version with a 100% pattern for its modality and one stage.
pub fn version(id: &str, modality: DeliveryModality) -> ProgrammeVersion {
    ProgrammeVersion {
        id: id.into(),
        label: format!("Version {id}"),
        code: id.to_uppercase(),
        delivery_modality: Some(modality),
        delivery_patterns: BTreeMap::from([(
            modality.as_str().to_string(),
            pattern(0.0, 20.0, 80.0),
        )]),
        stages: vec![stage("s1")],
        target_cohort_size: 40,
        number_of_groups: 1,
        ..ProgrammeVersion::default()
    }
}

pub fn pattern(sync: f64, asynchronous: f64, on_campus: f64) -> DeliveryPattern {
    DeliveryPattern {
        sync_online_pct: sync,
        async_directed_pct: asynchronous,
        on_campus_pct: on_campus,
        ..DeliveryPattern::default()
    }
}

pub fn stage(id: &str) -> Stage {
    Stage {
        id: id.into(),
        name: format!("Stage {id}"),
        sequence: 1,
        credits_target: 60,
        modules: vec![
            StageModule {
                module_id: "m1".into(),
                semester: "1".into(),
                ..StageModule::default()
            },
            StageModule {
                module_id: "m2".into(),
                semester: "2".into(),
                ..StageModule::default()
            },
        ],
        ..Stage::default()
    }
}

pub fn elective_group(id: &str, module_ids: &[&str]) -> ElectiveGroup {
    ElectiveGroup {
        id: id.into(),
        name: format!("Group {id}"),
        module_ids: module_ids.iter().map(|m| m.to_string()).collect(),
        ..ElectiveGroup::default()
    }
}

pub fn elective_definition(id: &str, credits: i64, groups: Vec<ElectiveGroup>) -> ElectiveDefinition {
    ElectiveDefinition {
        id: id.into(),
        name: format!("Electives {id}"),
        credits,
        groups,
        ..ElectiveDefinition::default()
    }
}
