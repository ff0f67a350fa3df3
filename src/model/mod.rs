//! Current-schema programme model: stored document and typed view.

pub mod document;
pub mod lenient;
pub mod types;

pub use document::ProgrammeDocument;
pub use types::*;
