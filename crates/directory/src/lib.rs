//! Helios Provider Directory
//!
//! This crate translates simple, named search filters into FHIR search requests
//! against a remote provider-directory server (Da Vinci PDex Plan-Net style),
//! walks the paginated results, and hands back the matching resources as JSON.
//!
//! # Features
//!
//! - **Seven Resource Types**: Practitioner, Organization, Location,
//!   PractitionerRole, OrganizationAffiliation, HealthcareService, InsurancePlan
//! - **Validated Queries**: Unknown filters and out-of-range limits are rejected
//!   before any request is sent
//! - **Bounded Pagination**: Pages are requested one at a time and never past
//!   the requested limit
//! - **All-or-Nothing Results**: A failed page discards the partial result
//! - **Lossless Output**: Resources are returned exactly as the server sent them
//!
//! # Architecture
//!
//! - [`resource_type`] - Supported resource types and their filter tables
//! - [`query`] - Query builder and validated queries
//! - [`client`] - The remote server seam and its HTTP implementation
//! - [`fetch`] - The fetch-all pagination engine
//! - [`read`] - Single-resource reads
//! - [`serialize`] - JSON output for results
//! - [`error`] - Error types for all operations
//!
//! # Quick Start
//!
//! ```no_run
//! use helios_directory::{
//!     Directory, HttpClientConfig, HttpFhirClient, ResourceType, SearchQueryBuilder,
//!     serialize_set,
//! };
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpFhirClient::new(&HttpClientConfig::default())?;
//! let directory = Directory::new(client);
//!
//! let query = SearchQueryBuilder::new(ResourceType::Practitioner, 10)?
//!     .with_filter("family", "Smith")?
//!     .with_filter("address_state", "CA")?
//!     .build();
//!
//! let results = directory.search(&query).await?;
//! println!("{}", serialize_set(&results)?);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

pub mod client;
pub mod error;
pub mod fetch;
pub mod query;
pub mod read;
pub mod record;
pub mod resource_type;
pub mod serialize;

use std::sync::Arc;

pub use client::{FhirApi, HttpClientConfig, HttpFhirClient, PageRequest};
pub use error::{ClientError, DirectoryError, DirectoryResult};
pub use fetch::{DEFAULT_MAX_PAGE_SIZE, FetchOptions, Pages, fetch_all};
pub use query::{SearchFilter, SearchQuery, SearchQueryBuilder};
pub use read::read_resource;
pub use record::{ResourcePage, ResourceRecord, ResourceSet};
pub use resource_type::{MAX_LIMIT, MIN_LIMIT, ResourceType};
pub use serialize::{deserialize_set, serialize_record, serialize_set};

/// The public Plan-Net endpoint used when no server URL is configured.
pub const DEFAULT_FHIR_SERVER_URL: &str = "https://flex.optum.com/fhirpublic/R4";

/// A handle to one provider directory.
///
/// Cheap to clone; clones share the underlying client.
#[derive(Clone)]
pub struct Directory {
    client: Arc<dyn FhirApi>,
    options: FetchOptions,
}

impl Directory {
    /// Creates a directory over the given client with default fetch options.
    pub fn new(client: impl FhirApi + 'static) -> Self {
        Self::from_arc(Arc::new(client))
    }

    /// Creates a directory over a shared client.
    pub fn from_arc(client: Arc<dyn FhirApi>) -> Self {
        Self {
            client,
            options: FetchOptions::default(),
        }
    }

    /// Replaces the fetch options.
    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    /// Returns the fetch options in use.
    pub fn options(&self) -> &FetchOptions {
        &self.options
    }

    /// Returns the underlying client.
    pub fn client(&self) -> &dyn FhirApi {
        self.client.as_ref()
    }

    /// Runs a search. See [`fetch_all`].
    pub async fn search(&self, query: &SearchQuery) -> DirectoryResult<ResourceSet> {
        fetch_all(self.client.as_ref(), query, &self.options).await
    }

    /// Reads one resource. See [`read_resource`].
    pub async fn read(&self, resource_type: ResourceType, id: &str) -> DirectoryResult<ResourceRecord> {
        read_resource(self.client.as_ref(), resource_type, id).await
    }
}

impl std::fmt::Debug for Directory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Directory")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
