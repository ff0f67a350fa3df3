//! Parse phase: JSON text → raw value, or straight through to a migrated programme.

use serde_json::Value;

use crate::error::EngineError;
use crate::migrate;
use crate::model::ProgrammeDocument;

/// Deserialize programme JSON text into an untyped value.
pub fn parse(json: &str) -> Result<Value, EngineError> {
    serde_json::from_str(json).map_err(EngineError::InvalidJson)
}

/// Parse and migrate in one step. Only malformed JSON text fails.
pub fn load(json: &str) -> Result<ProgrammeDocument, EngineError> {
    Ok(migrate::migrate(parse(json)?))
}

/// Serialize a programme back to the JSON shape callers persist.
pub fn to_value(programme: &ProgrammeDocument) -> Result<Value, EngineError> {
    serde_json::to_value(programme).map_err(EngineError::Serialize)
}

pub fn to_string(programme: &ProgrammeDocument) -> Result<String, EngineError> {
    serde_json::to_string(programme).map_err(EngineError::Serialize)
}
