//! Validation phase: cross-field consistency checks over a migrated programme.
//!
//! Rules run in a fixed order and the flag list keeps that order. The UI
//! snapshots it, so do not sort or dedupe.

pub mod assessments;
pub mod config;
pub mod credits;
pub mod effort;
pub mod electives;
pub mod identity;
pub mod outcomes;
pub mod versions;

use serde::Serialize;
use tracing::debug;

use crate::model::Programme;

pub use config::{HOURS_PER_CREDIT, MIN_PLO_COUNT, ValidationConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the programme from being considered complete.
    Error,
    Warning,
}

/// Wizard step a flag links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Step {
    Identity,
    Structure,
    Versions,
    Stages,
    Outcomes,
    Mapping,
    Assessments,
    Electives,
    EffortHours,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Step::Identity => "identity",
            Step::Structure => "structure",
            Step::Versions => "versions",
            Step::Stages => "stages",
            Step::Outcomes => "outcomes",
            Step::Mapping => "mapping",
            Step::Assessments => "assessments",
            Step::Electives => "electives",
            Step::EffortHours => "effort-hours",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Flag {
    /// Rule that produced the flag, e.g. `credits-mismatch`.
    pub id: &'static str,
    pub severity: Severity,
    pub message: String,
    pub step: Step,
}

impl Flag {
    pub fn error(id: &'static str, step: Step, message: impl Into<String>) -> Self {
        Flag {
            id,
            severity: Severity::Error,
            message: message.into(),
            step,
        }
    }

    pub fn warning(id: &'static str, step: Step, message: impl Into<String>) -> Self {
        Flag {
            id,
            severity: Severity::Warning,
            message: message.into(),
            step,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl std::fmt::Display for Flag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "[{}:{}] {} (step '{}')", severity, self.id, self.message, self.step)
    }
}

/// Validate with the default QQI constants.
pub fn validate(programme: &Programme) -> Vec<Flag> {
    validate_with(programme, &ValidationConfig::default())
}

/// Run every rule in order. Returns all flags found.
pub fn validate_with(programme: &Programme, config: &ValidationConfig) -> Vec<Flag> {
    let mut flags = Vec::new();

    identity::identity_complete(programme, &mut flags);
    versions::versions_present(programme, &mut flags);
    versions::delivery_patterns_total(programme, &mut flags);
    versions::stages_present(programme, &mut flags);
    versions::exit_awards_titled(programme, &mut flags);
    credits::credits_reconcile(programme, &mut flags);
    outcomes::plo_count(programme, config, &mut flags);
    outcomes::plos_mapped(programme, &mut flags);
    assessments::weightings_total(programme, &mut flags);
    electives::elective_definitions(programme, &mut flags);
    effort::effort_hours_reconcile(programme, config, &mut flags);

    debug!(
        errors = flags.iter().filter(|f| f.is_error()).count(),
        warnings = flags.iter().filter(|f| !f.is_error()).count(),
        "validation complete"
    );
    flags
}

/// Percent-style number for messages: at most two decimals, no trailing `.0`.
pub(crate) fn display_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{}", rounded)
}

/// Tolerance for sums of user-entered decimals.
pub(crate) fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
