//! Error types for the provider directory.
//!
//! Errors fall into two groups. Caller errors ([`DirectoryError::InvalidLimit`],
//! [`DirectoryError::UnsupportedFilter`], [`DirectoryError::UnknownResourceType`],
//! [`DirectoryError::InvalidId`]) are raised before any request is sent to the
//! remote server. Remote errors ([`DirectoryError::NotFound`],
//! [`DirectoryError::Upstream`], [`DirectoryError::PartialFetchAborted`]) come
//! back from the [`FhirApi`](crate::client::FhirApi) collaborator.
//!
//! Nothing here is retried. A failed search never yields a truncated listing.

use thiserror::Error;

use crate::resource_type::{MAX_LIMIT, MIN_LIMIT, ResourceType};

/// Result alias for directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// The primary error type for directory operations.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Requested result count outside `[MIN_LIMIT, MAX_LIMIT]`.
    #[error("invalid limit {limit}: must be between {MIN_LIMIT} and {MAX_LIMIT}")]
    InvalidLimit {
        /// The rejected limit.
        limit: i64,
    },

    /// The filter name is not recognised for the resource type.
    #[error("unsupported filter '{filter}' for {resource_type}")]
    UnsupportedFilter {
        /// The resource type being searched.
        resource_type: ResourceType,
        /// The caller-facing filter name.
        filter: String,
    },

    /// The resource type name is not one of the directory resource types.
    #[error("unknown resource type '{name}'")]
    UnknownResourceType {
        /// The rejected name.
        name: String,
    },

    /// The logical id is structurally malformed.
    #[error("invalid resource id '{id}': {reason}")]
    InvalidId {
        /// The rejected id.
        id: String,
        /// Why the id was rejected.
        reason: &'static str,
    },

    /// A single-resource read found no matching record.
    #[error("resource not found: {resource_type}/{id}")]
    NotFound {
        /// The resource type.
        resource_type: ResourceType,
        /// The logical id.
        id: String,
    },

    /// Transport or protocol failure talking to the remote server.
    #[error("upstream error: {0}")]
    Upstream(#[from] ClientError),

    /// A multi-page search failed after one or more pages had been retrieved.
    #[error(
        "search aborted after {pages_fetched} page(s); {records_discarded} record(s) discarded: {source}"
    )]
    PartialFetchAborted {
        /// Pages successfully retrieved before the failure.
        pages_fetched: usize,
        /// Records retrieved and then dropped.
        records_discarded: usize,
        /// The failure that ended the search.
        source: ClientError,
    },
}

impl DirectoryError {
    /// Returns true if the error was raised before contacting the remote server.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            DirectoryError::InvalidLimit { .. }
                | DirectoryError::UnsupportedFilter { .. }
                | DirectoryError::UnknownResourceType { .. }
                | DirectoryError::InvalidId { .. }
        )
    }
}

/// Errors reported by a [`FhirApi`](crate::client::FhirApi) implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The request could not be sent or the connection failed.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("server returned HTTP {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Diagnostics from the response body, if any.
        message: String,
    },

    /// The response body was not the expected FHIR content.
    #[error("malformed response: {0}")]
    Decode(String),

    /// A request URL could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// The request did not complete in time.
    #[error("request timed out")]
    Timeout,
}
