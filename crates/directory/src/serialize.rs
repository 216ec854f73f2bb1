//! Caller-facing text for search and read results.
//!
//! Output is plain JSON: a search becomes an array of resources, a read
//! becomes the resource itself. Resources pass through untouched; nothing is
//! filtered, renamed or reordered.

use crate::record::{ResourceRecord, ResourceSet};

/// Serializes a search result as a JSON array.
pub fn serialize_set(set: &ResourceSet) -> Result<String, serde_json::Error> {
    serde_json::to_string(set)
}

/// Serializes a single resource as a JSON object.
pub fn serialize_record(record: &ResourceRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string(record)
}

/// Parses the output of [`serialize_set`] back into a result set.
pub fn deserialize_set(text: &str) -> Result<ResourceSet, serde_json::Error> {
    serde_json::from_str(text)
}
