//! Typed read view of a current-schema programme.
//!
//! Decoded from the migrated document for validation and completion. The
//! document itself stays the stored form (see `ProgrammeDocument`), so
//! defaults filled in here never leak back into saved JSON.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient;

// =============================================================================
// PROGRAMME
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Programme {
    #[serde(default, deserialize_with = "lenient::value")]
    pub schema_version: u32,
    #[serde(default, deserialize_with = "lenient::value")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub award_type: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub nfq_level: Option<i64>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub total_credits: i64,
    #[serde(default, deserialize_with = "lenient::value")]
    pub award_standard_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub award_standard_names: Vec<String>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub modules: Vec<Module>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub plos: Vec<Plo>,
    #[serde(default, deserialize_with = "lenient::map")]
    pub plo_to_mimlos: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub versions: Vec<ProgrammeVersion>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub elective_definitions: Vec<ElectiveDefinition>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub mode: ProgrammeMode,
    #[serde(
        default,
        deserialize_with = "lenient::value",
        skip_serializing_if = "Option::is_none"
    )]
    pub module_editor: Option<ModuleEditor>,
}

impl Programme {
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Sum of module credits. Widened so any list of `i64` credits fits.
    pub fn module_credits_total(&self) -> i128 {
        self.modules.iter().map(|m| i128::from(m.credits)).sum()
    }

    /// PLO ids with no entry, or an empty entry, in `ploToMimlos`.
    pub fn unmapped_plo_ids(&self) -> Vec<&str> {
        self.plos
            .iter()
            .filter(|plo| {
                self.plo_to_mimlos
                    .get(&plo.id)
                    .is_none_or(|mimlos| mimlos.is_empty())
            })
            .map(|plo| plo.id.as_str())
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProgrammeMode {
    #[default]
    ProgrammeOwner,
    ModuleEditor,
}

/// Restrictions applied when a programme is opened in module-editor mode.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleEditor {
    #[serde(default, deserialize_with = "lenient::value")]
    pub assigned_module_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub locks: Map<String, Value>,
}

// =============================================================================
// MODULES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub credits: i64,
    #[serde(default, rename = "type", deserialize_with = "lenient::value")]
    pub module_type: ModuleType,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub mimlos: Vec<Mimlo>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub assessments: Vec<Assessment>,
    /// Keyed by `"{versionId}_{modality}"`.
    #[serde(default, deserialize_with = "lenient::map")]
    pub effort_hours: BTreeMap<String, EffortHours>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub reading_list: Vec<Value>,
}

impl Module {
    /// Code if set, else title, else id.
    pub fn display_name(&self) -> &str {
        [&self.code, &self.title, &self.id]
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .map_or("", |s| s.as_str())
    }

    pub fn is_elective(&self) -> bool {
        self.module_type == ModuleType::Elective
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleType {
    #[default]
    #[serde(alias = "MANDATORY")]
    Mandatory,
    #[serde(alias = "ELECTIVE")]
    Elective,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Mimlo {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub title: String,
    #[serde(default, rename = "type", deserialize_with = "lenient::value")]
    pub assessment_type: String,
    /// Percentage of the module mark, 0-100.
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub weighting: f64,
    #[serde(default, deserialize_with = "lenient::value")]
    pub mode: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub mimlo_ids: Vec<String>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub integrity: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub notes: String,
}

/// Learner effort for one module under one version/modality.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffortHours {
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub classroom_hours: f64,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub mentoring_hours: f64,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub other_contact_hours: f64,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub directed_elearning_hours: f64,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub independent_learning_hours: f64,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub work_based_hours: f64,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub other_hours: f64,
}

impl EffortHours {
    pub fn total(&self) -> f64 {
        self.classroom_hours
            + self.mentoring_hours
            + self.other_contact_hours
            + self.directed_elearning_hours
            + self.independent_learning_hours
            + self.work_based_hours
            + self.other_hours
    }
}

// =============================================================================
// OUTCOMES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plo {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub text: String,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub standard_mappings: Vec<StandardMapping>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StandardMapping {
    #[serde(default, deserialize_with = "lenient::value")]
    pub criteria: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub thread: String,
}

// =============================================================================
// VERSIONS & STAGES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgrammeVersion {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub label: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub delivery_modality: Option<DeliveryModality>,
    /// Keyed by modality (`"F2F"`, `"BLENDED"`, `"ONLINE"`).
    #[serde(default, deserialize_with = "lenient::map")]
    pub delivery_patterns: BTreeMap<String, DeliveryPattern>,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub stages: Vec<Stage>,
    #[serde(default, deserialize_with = "lenient::value")]
    pub target_cohort_size: i64,
    #[serde(default, deserialize_with = "lenient::value")]
    pub number_of_groups: i64,
    #[serde(default, deserialize_with = "lenient::value")]
    pub online_proctored_exams: ProctoredExams,
}

impl ProgrammeVersion {
    /// Label if set, else code, else id.
    pub fn display_name(&self) -> &str {
        [&self.label, &self.code, &self.id]
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .map_or("", |s| s.as_str())
    }

    /// Pattern for this version's modality. Keys match in any letter case.
    pub fn delivery_pattern(&self) -> Option<&DeliveryPattern> {
        let modality = self.delivery_modality?;
        self.delivery_patterns
            .iter()
            .find(|(key, _)| DeliveryModality::parse(key) == Some(modality))
            .map(|(_, pattern)| pattern)
    }

    /// Effort entry of `module` for this version, keyed `"{versionId}_{modality}"`.
    pub fn effort_hours<'m>(&self, module: &'m Module) -> Option<&'m EffortHours> {
        let modality = self.delivery_modality?;
        module
            .effort_hours
            .iter()
            .find(|(key, _)| {
                key.strip_prefix(self.id.as_str())
                    .and_then(|rest| rest.strip_prefix('_'))
                    .and_then(DeliveryModality::parse)
                    == Some(modality)
            })
            .map(|(_, hours)| hours)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DeliveryModality {
    F2f,
    Blended,
    Online,
}

impl DeliveryModality {
    /// Canonical spelling, as written by the current wizard.
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryModality::F2f => "F2F",
            DeliveryModality::Blended => "BLENDED",
            DeliveryModality::Online => "ONLINE",
        }
    }

    /// Accepts any letter case; older documents wrote `"Blended"`, `"Online"`.
    pub fn parse(s: &str) -> Option<Self> {
        [
            DeliveryModality::F2f,
            DeliveryModality::Blended,
            DeliveryModality::Online,
        ]
        .into_iter()
        .find(|modality| modality.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl TryFrom<String> for DeliveryModality {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        DeliveryModality::parse(&s).ok_or_else(|| format!("unknown delivery modality '{}'", s))
    }
}

impl From<DeliveryModality> for String {
    fn from(modality: DeliveryModality) -> Self {
        modality.as_str().to_string()
    }
}

impl std::fmt::Display for DeliveryModality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryPattern {
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub sync_online_pct: f64,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub async_directed_pct: f64,
    #[serde(
        default,
        deserialize_with = "lenient::number",
        serialize_with = "lenient::compact_number"
    )]
    pub on_campus_pct: f64,
}

impl DeliveryPattern {
    pub fn total(&self) -> f64 {
        self.sync_online_pct + self.async_directed_pct + self.on_campus_pct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProctoredExams {
    Yes,
    No,
    #[default]
    Tbc,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stage {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub sequence: i64,
    #[serde(default, deserialize_with = "lenient::value")]
    pub credits_target: i64,
    #[serde(default, deserialize_with = "lenient::value")]
    pub exit_award: ExitAward,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub modules: Vec<StageModule>,
}

impl Stage {
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            self.id.as_str()
        } else {
            self.name.as_str()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExitAward {
    #[serde(default, deserialize_with = "lenient::value")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "lenient::value")]
    pub award_title: String,
}

/// Placement of a module in a stage. `module_id` refers into `Programme::modules`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageModule {
    #[serde(default, deserialize_with = "lenient::value")]
    pub module_id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub semester: String,
}

// =============================================================================
// ELECTIVES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveDefinition {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub credits: i64,
    #[serde(default, deserialize_with = "lenient::vec")]
    pub groups: Vec<ElectiveGroup>,
}

impl ElectiveDefinition {
    pub fn display_name(&self) -> &str {
        [&self.name, &self.code, &self.id]
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .map_or("", |s| s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveGroup {
    #[serde(default, deserialize_with = "lenient::value")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::value")]
    pub code: String,
    /// References into `Programme::modules`, elective modules only.
    #[serde(default, deserialize_with = "lenient::value")]
    pub module_ids: Vec<String>,
}

impl ElectiveGroup {
    pub fn display_name(&self) -> &str {
        [&self.name, &self.code, &self.id]
            .into_iter()
            .find(|s| !s.trim().is_empty())
            .map_or("", |s| s.as_str())
    }
}
