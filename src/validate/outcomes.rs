//! Programme learning outcomes and their mapping onto MIMLOs.

use crate::model::Programme;

use super::{Flag, Step, ValidationConfig};

pub fn plo_count(programme: &Programme, config: &ValidationConfig, flags: &mut Vec<Flag>) {
    let count = programme.plos.len();
    if count < config.min_plo_count {
        flags.push(Flag::warning(
            "plo-count",
            Step::Outcomes,
            format!(
                "{} PLO(s) defined: fewer than {} PLOs, QQI guidance recommends at least {}",
                count, config.min_plo_count, config.min_plo_count
            ),
        ));
    }
}

/// One aggregate error naming every unmapped PLO, not one per PLO.
pub fn plos_mapped(programme: &Programme, flags: &mut Vec<Flag>) {
    let unmapped = programme.unmapped_plo_ids();
    if !unmapped.is_empty() {
        flags.push(Flag::error(
            "plos-unmapped",
            Step::Mapping,
            format!(
                "Some PLOs are not mapped to any module/outcome: {}",
                unmapped.join(", ")
            ),
        ));
    }
}
