//! Elective definitions and their groups.

use crate::model::Programme;

use super::{Flag, Step};

pub fn elective_definitions(programme: &Programme, flags: &mut Vec<Flag>) {
    for definition in &programme.elective_definitions {
        if definition.credits == 0 {
            flags.push(Flag::warning(
                "elective-credits",
                Step::Electives,
                format!(
                    "Elective definition \"{}\": no credit value set",
                    definition.display_name()
                ),
            ));
        }

        for group in &definition.groups {
            if group.module_ids.is_empty() {
                flags.push(Flag::warning(
                    "elective-group-empty",
                    Step::Electives,
                    format!("Elective group \"{}\": no modules assigned", group.display_name()),
                ));
                continue;
            }

            // Dangling ids are not this rule's concern.
            for module in group
                .module_ids
                .iter()
                .filter_map(|id| programme.module(id))
                .filter(|m| !m.is_elective())
            {
                flags.push(Flag::warning(
                    "elective-group-mandatory",
                    Step::Electives,
                    format!(
                        "Elective group \"{}\" contains mandatory module \"{}\"",
                        group.display_name(),
                        module.display_name()
                    ),
                ));
            }
        }
    }
}
