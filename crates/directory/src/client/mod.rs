//! The remote FHIR server seam.
//!
//! [`FhirApi`] is the only way this crate talks to the outside world. The
//! production implementation is [`HttpFhirClient`]; tests substitute scripted
//! implementations.

mod bundle;
mod http;

pub use bundle::{BundleEntry, BundleEntrySearch, BundleLink, SearchBundle, SearchEntryMode};
pub use http::{HttpClientConfig, HttpFhirClient};

use async_trait::async_trait;

use crate::error::ClientError;
use crate::query::SearchFilter;
use crate::record::{ResourcePage, ResourceRecord};
use crate::resource_type::ResourceType;

/// A request for one page of search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRequest<'a> {
    /// The first page of a search.
    Initial {
        /// The resource type to search.
        resource_type: ResourceType,
        /// FHIR search parameters.
        filters: &'a SearchFilter,
        /// Page size hint (`_count`).
        count: u32,
    },

    /// A follow-up page, addressed by the continuation link of the previous one.
    Next {
        /// The `next` link from the previous page.
        link: &'a str,
    },
}

/// Read-only access to a remote FHIR server.
#[async_trait]
pub trait FhirApi: Send + Sync {
    /// Fetches one page of search results.
    async fn search_page(&self, request: PageRequest<'_>) -> Result<ResourcePage, ClientError>;

    /// Reads a single resource by logical id.
    ///
    /// Returns `Ok(None)` if the server has no such resource.
    async fn read(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> Result<Option<ResourceRecord>, ClientError>;
}
