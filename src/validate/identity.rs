//! Programme identity fields.

use std::ops::RangeInclusive;

use crate::model::Programme;

use super::{Flag, Step};

pub const NFQ_LEVELS: RangeInclusive<i64> = 6..=9;

pub fn identity_complete(programme: &Programme, flags: &mut Vec<Flag>) {
    if programme.title.trim().is_empty() {
        flags.push(Flag::error(
            "title-missing",
            Step::Identity,
            "Programme title is missing",
        ));
    }

    match programme.nfq_level {
        None => flags.push(Flag::error(
            "nfq-level-missing",
            Step::Identity,
            "NFQ level is missing",
        )),
        Some(level) if !NFQ_LEVELS.contains(&level) => flags.push(Flag::error(
            "nfq-level-range",
            Step::Identity,
            format!(
                "NFQ level must be between {} and {} (found {})",
                NFQ_LEVELS.start(),
                NFQ_LEVELS.end(),
                level
            ),
        )),
        Some(_) => {}
    }

    if programme.total_credits == 0 {
        flags.push(Flag::error(
            "total-credits-missing",
            Step::Identity,
            "Total credits are missing",
        ));
    }
}
