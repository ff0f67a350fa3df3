//! Programme versions: existence, delivery patterns, stages and exit awards.

use crate::model::Programme;

use super::{Flag, Step, approx_eq, display_number};

pub fn versions_present(programme: &Programme, flags: &mut Vec<Flag>) {
    if programme.versions.is_empty() {
        flags.push(Flag::error(
            "versions-missing",
            Step::Versions,
            "Programme Version is required",
        ));
    }
}

/// The pattern for a version's own modality must split 100% across its three channels.
pub fn delivery_patterns_total(programme: &Programme, flags: &mut Vec<Flag>) {
    for version in &programme.versions {
        let (Some(modality), Some(pattern)) = (version.delivery_modality, version.delivery_pattern())
        else {
            continue;
        };
        let total = pattern.total();
        if !approx_eq(total, 100.0) {
            flags.push(Flag::warning(
                "delivery-pattern-total",
                Step::Versions,
                format!(
                    "Version \"{}\": {} delivery pattern totals {}% (must be 100%)",
                    version.display_name(),
                    modality,
                    display_number(total)
                ),
            ));
        }
    }
}

pub fn stages_present(programme: &Programme, flags: &mut Vec<Flag>) {
    for version in &programme.versions {
        if version.stages.is_empty() {
            flags.push(Flag::warning(
                "stages-missing",
                Step::Stages,
                format!("Version \"{}\": no stages defined", version.display_name()),
            ));
        }
    }
}

pub fn exit_awards_titled(programme: &Programme, flags: &mut Vec<Flag>) {
    for version in &programme.versions {
        for stage in &version.stages {
            if stage.exit_award.enabled && stage.exit_award.award_title.trim().is_empty() {
                flags.push(Flag::warning(
                    "exit-award-title",
                    Step::Stages,
                    format!(
                        "Stage \"{}\" in version \"{}\": exit award enabled but award title is empty",
                        stage.display_name(),
                        version.display_name()
                    ),
                ));
            }
        }
    }
}
