pub mod completion;
pub mod error;
pub mod migrate;
pub mod model;
pub mod parse;
pub mod raw;
pub mod validate;
pub mod wasm;

pub use error::EngineError;
pub use migrate::{CURRENT_SCHEMA_VERSION, migrate};
pub use model::{Programme, ProgrammeDocument};
pub use validate::{Flag, Severity, Step, validate};
