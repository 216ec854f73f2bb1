//! Resource records and the containers that carry them.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A FHIR resource as returned by the remote server.
///
/// The JSON document is kept as-is. Every field the server sent is preserved,
/// including ones this crate knows nothing about.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceRecord(Value);

impl ResourceRecord {
    /// Wraps a JSON document.
    pub fn new(content: Value) -> Self {
        Self(content)
    }

    /// Returns the `resourceType` element, if present.
    pub fn resource_type(&self) -> Option<&str> {
        self.0.get("resourceType").and_then(Value::as_str)
    }

    /// Returns the logical id, if present.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Returns the `Type/id` reference for this record.
    pub fn reference(&self) -> Option<String> {
        Some(format!("{}/{}", self.resource_type()?, self.id()?))
    }

    /// Returns the underlying JSON document.
    pub fn content(&self) -> &Value {
        &self.0
    }

    /// Consumes the record, returning the JSON document.
    pub fn into_content(self) -> Value {
        self.0
    }
}

impl From<Value> for ResourceRecord {
    fn from(content: Value) -> Self {
        Self(content)
    }
}

/// The ordered result of a search.
///
/// Never longer than the limit of the query that produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceSet {
    records: Vec<ResourceRecord>,
}

impl ResourceSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records in delivery order.
    pub fn records(&self) -> &[ResourceRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if no record matched.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in delivery order.
    pub fn iter(&self) -> std::slice::Iter<'_, ResourceRecord> {
        self.records.iter()
    }

    /// Consumes the set, returning the records.
    pub fn into_records(self) -> Vec<ResourceRecord> {
        self.records
    }
}

impl From<Vec<ResourceRecord>> for ResourceSet {
    fn from(records: Vec<ResourceRecord>) -> Self {
        Self { records }
    }
}

impl IntoIterator for ResourceSet {
    type Item = ResourceRecord;
    type IntoIter = std::vec::IntoIter<ResourceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

/// One page of search results from the remote server.
///
/// Pages only live inside a single fetch; callers never see them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourcePage {
    /// The matching records on this page.
    pub records: Vec<ResourceRecord>,

    /// The continuation link to the next page, if any.
    pub next: Option<String>,
}

impl ResourcePage {
    /// Creates a page.
    pub fn new(records: Vec<ResourceRecord>, next: Option<String>) -> Self {
        Self { records, next }
    }

    /// Creates the last page of a result set.
    pub fn last(records: Vec<ResourceRecord>) -> Self {
        Self {
            records,
            next: None,
        }
    }

    /// Returns true if the server reported more results.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}
