//! Regulatory constants used by the rule set.

use serde::{Deserialize, Serialize};

/// Learner effort hours QQI attributes to one ECTS credit.
pub const HOURS_PER_CREDIT: f64 = 25.0;

/// Fewest PLOs QQI guidance recommends for a programme.
pub const MIN_PLO_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ValidationConfig {
    pub hours_per_credit: f64,
    pub min_plo_count: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        ValidationConfig {
            hours_per_credit: HOURS_PER_CREDIT,
            min_plo_count: MIN_PLO_COUNT,
        }
    }
}
