//! Errors at the text boundary. Migration and validation themselves never fail.

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("[P001] Failed to parse programme JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),
    #[error("[S001] Failed to serialize programme: {0}")]
    Serialize(#[source] serde_json::Error),
}

impl EngineError {
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::InvalidJson(_) => "P001",
            EngineError::Serialize(_) => "S001",
        }
    }
}
