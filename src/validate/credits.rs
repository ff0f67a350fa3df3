use crate::model::Programme;

use super::{Flag, Step};

pub fn credits_reconcile(programme: &Programme, flags: &mut Vec<Flag>) {
    let sum = programme.module_credits_total();
    if sum != i128::from(programme.total_credits) {
        flags.push(Flag::error(
            "credits-mismatch",
            Step::Structure,
            format!(
                "Credits mismatch: modules sum to {}, programme declares {}",
                sum, programme.total_credits
            ),
        ));
    }
}
