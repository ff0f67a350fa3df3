use crate::model::Programme;

use super::{Flag, Step, approx_eq, display_number};

pub fn weightings_total(programme: &Programme, flags: &mut Vec<Flag>) {
    for module in &programme.modules {
        if module.assessments.is_empty() {
            continue;
        }
        let total: f64 = module.assessments.iter().map(|a| a.weighting).sum();
        if !approx_eq(total, 100.0) {
            flags.push(Flag::warning(
                "assessment-weighting",
                Step::Assessments,
                format!(
                    "Module \"{}\": assessment weightings total {}% (should be 100%)",
                    module.display_name(),
                    display_number(total)
                ),
            ));
        }
    }
}
