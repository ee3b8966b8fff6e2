//! JSON round-trip for the process document schema.
//!
//! The wire format is the schema the extraction oracle produces. Step keys
//! outside the recognized set are kept in each step's additional-attributes
//! bag and written back unchanged, so a document survives a parse/serialize
//! cycle without losing oracle-provided detail.

use super::model::Process;

impl Process {
    /// Parses a process document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses a process document from an already-decoded JSON value.
    pub fn from_json_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Serializes the process back to the document schema, pretty-printed.
    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
