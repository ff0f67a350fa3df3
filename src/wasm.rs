//! WASM entry points for browser use.

use wasm_bindgen::prelude::*;

use crate::completion::completion_percent;
use crate::error::EngineError;
use crate::validate::{Flag, ValidationConfig};

/// Migrate a stored or imported programme JSON to the current schema.
/// Returns `{status: "success", programme}` or `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn migrate_programme(json: &str) -> JsValue {
    let result = match migrate_programme_inner(json) {
        Ok(programme) => MigrateResult::Success { programme },
        Err(e) => MigrateResult::Errors {
            errors: vec![ErrorDto::from(e)],
        },
    };
    to_js(&result)
}

fn migrate_programme_inner(json: &str) -> Result<serde_json::Value, EngineError> {
    let programme = crate::parse::load(json)?;
    crate::parse::to_value(&programme)
}

/// Validate a programme JSON, migrating it first.
/// `config_json` may be empty to use the default QQI constants.
/// Returns a JSON array of flags, or a single `P001` flag for unparseable input.
#[wasm_bindgen]
pub fn validate_programme(json: &str, config_json: &str) -> JsValue {
    let result = validate_programme_inner(json, config_json);
    to_js(&result)
}

fn validate_programme_inner(json: &str, config_json: &str) -> Vec<FlagDto> {
    let programme = match crate::parse::load(json) {
        Ok(p) => p,
        Err(e) => return vec![FlagDto::from(e)],
    };

    let config = if config_json.trim().is_empty() {
        ValidationConfig::default()
    } else {
        match serde_json::from_str::<ValidationConfig>(config_json) {
            Ok(c) => c,
            Err(e) => {
                return vec![FlagDto {
                    id: "P001".into(),
                    severity: "error".into(),
                    message: format!("Failed to parse validation config JSON: {}", e),
                    step: "identity".into(),
                }];
            }
        }
    };

    crate::validate::validate_with(&programme, &config)
        .into_iter()
        .map(FlagDto::from)
        .collect()
}

/// Startup/import path: migrate, validate and score in one call.
/// Returns `{status: "success", programme, flags, completionPercent}` or
/// `{status: "errors", errors}`.
#[wasm_bindgen]
pub fn load_programme(json: &str) -> JsValue {
    let result = load_programme_inner(json);
    to_js(&result)
}

fn load_programme_inner(json: &str) -> LoadResult {
    let programme = match crate::parse::load(json) {
        Ok(p) => p,
        Err(e) => {
            return LoadResult::Errors {
                errors: vec![ErrorDto::from(e)],
            };
        }
    };

    let flags = crate::validate::validate(&programme)
        .into_iter()
        .map(FlagDto::from)
        .collect();
    let completion_percent = completion_percent(&programme);

    match crate::parse::to_value(&programme) {
        Ok(value) => LoadResult::Success {
            programme: value,
            flags,
            completion_percent,
        },
        Err(e) => LoadResult::Errors {
            errors: vec![ErrorDto::from(e)],
        },
    }
}

/// Plain JS objects rather than `Map`s, so the UI can read documents directly.
fn to_js<T: serde::Serialize>(value: &T) -> JsValue {
    serde::Serialize::serialize(value, &serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap_or(JsValue::NULL)
}

// ---------------------------------------------------------------------------
// DTOs for serialization to JS
// ---------------------------------------------------------------------------

#[derive(serde::Serialize, serde::Deserialize)]
struct ErrorDto {
    code: String,
    message: String,
}

impl From<EngineError> for ErrorDto {
    fn from(e: EngineError) -> Self {
        ErrorDto {
            code: e.code().into(),
            message: e.to_string(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
struct FlagDto {
    id: String,
    severity: String,
    message: String,
    step: String,
}

impl From<Flag> for FlagDto {
    fn from(f: Flag) -> Self {
        FlagDto {
            id: f.id.into(),
            severity: if f.is_error() { "error" } else { "warning" }.into(),
            message: f.message,
            step: f.step.to_string(),
        }
    }
}

impl From<EngineError> for FlagDto {
    fn from(e: EngineError) -> Self {
        FlagDto {
            id: e.code().into(),
            severity: "error".into(),
            message: e.to_string(),
            step: "identity".into(),
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum MigrateResult {
    #[serde(rename = "success")]
    Success { programme: serde_json::Value },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(tag = "status")]
enum LoadResult {
    #[serde(rename = "success", rename_all = "camelCase")]
    Success {
        programme: serde_json::Value,
        flags: Vec<FlagDto>,
        completion_percent: u32,
    },
    #[serde(rename = "errors")]
    Errors { errors: Vec<ErrorDto> },
}
