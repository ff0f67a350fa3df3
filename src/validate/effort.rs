//! Effort hours against the credit-hours constant.

use crate::model::Programme;

use super::{Flag, Step, ValidationConfig, approx_eq, display_number};

/// For each module and each version's modality with hours entered, the hours
/// must equal `credits × hours_per_credit`.
pub fn effort_hours_reconcile(
    programme: &Programme,
    config: &ValidationConfig,
    flags: &mut Vec<Flag>,
) {
    for module in &programme.modules {
        let expected = module.credits as f64 * config.hours_per_credit;

        for version in &programme.versions {
            let (Some(modality), Some(hours)) =
                (version.delivery_modality, version.effort_hours(module))
            else {
                continue;
            };
            let total = hours.total();
            if total > 0.0 && !approx_eq(total, expected) {
                flags.push(Flag::warning(
                    "effort-hours",
                    Step::EffortHours,
                    format!(
                        "Module \"{}\" ({} {}): effort hours total {}, expected {} ({} credits × {} hours)",
                        module.display_name(),
                        version.display_name(),
                        modality,
                        display_number(total),
                        display_number(expected),
                        module.credits,
                        display_number(config.hours_per_credit)
                    ),
                ));
            }
        }
    }
}
