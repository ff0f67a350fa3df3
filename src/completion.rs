//! Completion percentage shown next to the flag list.

use crate::model::Programme;

/// Satisfied required fields ÷ total required fields, as a whole percent rounded down.
pub fn completion_percent(programme: &Programme) -> u32 {
    let checks = required_checks(programme);
    let satisfied = checks.iter().filter(|ok| **ok).count();
    (satisfied * 100 / checks.len()) as u32
}

fn required_checks(programme: &Programme) -> [bool; 10] {
    let has_plos = !programme.plos.is_empty();
    [
        !programme.title.trim().is_empty(),
        !programme.award_type.trim().is_empty(),
        programme.nfq_level.is_some(),
        programme.total_credits > 0,
        !programme.award_standard_ids.is_empty(),
        !programme.versions.is_empty(),
        !programme.modules.is_empty(),
        has_plos,
        has_plos && programme.unmapped_plo_ids().is_empty(),
        programme.total_credits > 0
            && programme.module_credits_total() == i128::from(programme.total_credits),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Module, Plo};

    #[test]
    fn blank_programme_is_zero() {
        assert_eq!(completion_percent(&Programme::default()), 0);
    }

    #[test]
    fn partial_programme_rounds_down() {
        let programme = Programme {
            title: "BSc in Computing".into(),
            nfq_level: Some(8),
            total_credits: 60,
            modules: vec![Module {
                id: "m1".into(),
                credits: 60,
                ..Module::default()
            }],
            plos: vec![Plo {
                id: "p1".into(),
                ..Plo::default()
            }],
            ..Programme::default()
        };
        // title, nfq, credits, module, plo, credits reconcile = 6 of 10
        assert_eq!(completion_percent(&programme), 60);
    }

    #[test]
    fn huge_credits_do_not_reconcile() {
        let module = |id: &str, credits| Module {
            id: id.into(),
            credits,
            ..Module::default()
        };
        let programme = Programme {
            total_credits: i64::MAX,
            modules: vec![module("m1", i64::MAX), module("m2", 1)],
            ..Programme::default()
        };
        // total credits and modules; the module sum exceeds the declared total
        assert_eq!(completion_percent(&programme), 20);
    }
}
