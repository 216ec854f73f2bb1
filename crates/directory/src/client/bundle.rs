//! FHIR Bundle wire types for searchset responses.

use serde::Deserialize;
use serde_json::Value;

use crate::record::{ResourcePage, ResourceRecord};

/// A FHIR Bundle as returned by a search interaction.
///
/// Only the elements needed to walk a result set are modelled. Entry
/// resources are kept as raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchBundle {
    /// Always "Bundle".
    #[serde(rename = "resourceType")]
    pub resource_type: String,

    /// The bundle type (normally "searchset").
    #[serde(rename = "type", default)]
    pub bundle_type: Option<String>,

    /// Total count of matching resources, when the server reports it.
    #[serde(default)]
    pub total: Option<u64>,

    /// Navigation links.
    #[serde(default)]
    pub link: Vec<BundleLink>,

    /// The bundle entries.
    #[serde(default)]
    pub entry: Vec<BundleEntry>,
}

/// A link in a FHIR Bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleLink {
    /// The relation type (self, next, previous, first, last).
    pub relation: String,

    /// The URL.
    pub url: String,
}

/// An entry in a FHIR Bundle.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleEntry {
    /// The full URL of the resource.
    #[serde(rename = "fullUrl", default)]
    pub full_url: Option<String>,

    /// The resource.
    #[serde(default)]
    pub resource: Option<Value>,

    /// Search information.
    #[serde(default)]
    pub search: Option<BundleEntrySearch>,
}

/// Search information for a bundle entry.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleEntrySearch {
    /// How this entry matched the search.
    #[serde(default)]
    pub mode: Option<SearchEntryMode>,
}

/// How a bundle entry matched the search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchEntryMode {
    /// This is a match to the search parameters.
    Match,
    /// This is included because of _include/_revinclude.
    Include,
    /// This is an OperationOutcome about the search.
    Outcome,
}

impl SearchBundle {
    /// Returns the URL of the `next` link, if any.
    pub fn next_link(&self) -> Option<&str> {
        self.link
            .iter()
            .find(|l| l.relation == "next")
            .map(|l| l.url.as_str())
    }

    /// Converts the bundle into a page of matching records.
    ///
    /// Entries flagged as `include` or `outcome` are dropped, as are entries
    /// without a resource.
    pub fn into_page(self) -> ResourcePage {
        let next = self.next_link().map(str::to_string);
        let records = self
            .entry
            .into_iter()
            .filter(|e| {
                e.search
                    .as_ref()
                    .and_then(|s| s.mode)
                    .is_none_or(|mode| mode == SearchEntryMode::Match)
            })
            .filter_map(|e| e.resource)
            .map(ResourceRecord::new)
            .collect();

        ResourcePage::new(records, next)
    }
}
