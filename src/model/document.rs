//! A migrated programme: the stored JSON object plus its typed view.

use std::ops::Deref;

use serde::{Serialize, Serializer};
use serde_json::Value;
use tracing::warn;

use super::Programme;
use crate::migrate::CURRENT_SCHEMA_VERSION;
use crate::raw::Object;

/// Output of `migrate`. Serializes as the document exactly as migration left
/// it; reads go through the decoded `Programme` via `Deref`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgrammeDocument {
    document: Object,
    programme: Programme,
}

impl ProgrammeDocument {
    /// Wrap a current-schema object and decode its view.
    pub fn from_object(document: Object) -> Self {
        let programme = serde_json::from_value(Value::Object(document.clone())).unwrap_or_else(|e| {
            warn!(error = %e, "migrated document failed to decode, using a blank view");
            Programme {
                schema_version: CURRENT_SCHEMA_VERSION,
                ..Programme::default()
            }
        });
        ProgrammeDocument {
            document,
            programme,
        }
    }

    pub fn as_object(&self) -> &Object {
        &self.document
    }

    pub fn into_object(self) -> Object {
        self.document
    }

    pub fn programme(&self) -> &Programme {
        &self.programme
    }
}

impl Deref for ProgrammeDocument {
    type Target = Programme;

    fn deref(&self) -> &Programme {
        &self.programme
    }
}

impl Serialize for ProgrammeDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.document.serialize(serializer)
    }
}
