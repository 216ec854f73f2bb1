//! Search query construction.
//!
//! A [`SearchQueryBuilder`] collects caller-facing filters for one resource
//! type, translates them to FHIR search parameters and produces an immutable
//! [`SearchQuery`]. Nothing in this module performs I/O.
//!
//! # Example
//!
//! ```
//! use helios_directory::{ResourceType, SearchQueryBuilder};
//!
//! let query = SearchQueryBuilder::new(ResourceType::Practitioner, 10)?
//!     .with_filter("family", "Smith")?
//!     .with_filter("address_state", "CA")?
//!     .build();
//!
//! assert_eq!(query.filters().get("address-state"), Some("CA"));
//! assert_eq!(query.limit(), 10);
//! # Ok::<(), helios_directory::DirectoryError>(())
//! ```

use crate::error::{DirectoryError, DirectoryResult};
use crate::resource_type::{MAX_LIMIT, MIN_LIMIT, ResourceType};

/// Ordered FHIR search parameters for one query.
///
/// Keys are unique; inserting an existing key replaces its value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    entries: Vec<(&'static str, String)>,
}

impl SearchFilter {
    /// Creates an empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a parameter, overwriting any previous value.
    pub fn insert(&mut self, parameter: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == parameter) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((parameter, value)),
        }
    }

    /// Returns the value for a FHIR search parameter.
    pub fn get(&self, parameter: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == parameter)
            .map(|(_, value)| value.as_str())
    }

    /// Iterates over `(parameter, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.entries.iter().map(|(name, value)| (*name, value.as_str()))
    }

    /// Returns the number of parameters.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// An immutable, validated search for one resource type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    resource_type: ResourceType,
    filters: SearchFilter,
    limit: u32,
}

impl SearchQuery {
    /// Returns the resource type searched.
    pub fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    /// Returns the FHIR search parameters.
    pub fn filters(&self) -> &SearchFilter {
        &self.filters
    }

    /// Returns the maximum number of records the search returns.
    pub fn limit(&self) -> u32 {
        self.limit
    }
}

/// Builds a [`SearchQuery`].
#[derive(Debug, Clone)]
pub struct SearchQueryBuilder {
    query: SearchQuery,
}

impl SearchQueryBuilder {
    /// Starts a query with an explicit limit.
    ///
    /// Fails with [`DirectoryError::InvalidLimit`] unless `1 <= limit <= 1000`.
    /// Out-of-range limits are rejected rather than clamped.
    pub fn new(resource_type: ResourceType, limit: i64) -> DirectoryResult<Self> {
        let limit = validate_limit(limit)?;
        Ok(Self {
            query: SearchQuery {
                resource_type,
                filters: SearchFilter::new(),
                limit,
            },
        })
    }

    /// Starts a query using the resource type's default limit.
    pub fn with_default_limit(resource_type: ResourceType) -> Self {
        Self {
            query: SearchQuery {
                resource_type,
                filters: SearchFilter::new(),
                limit: resource_type.default_limit(),
            },
        }
    }

    /// Adds a filter by its caller-facing name.
    ///
    /// The name is translated to the FHIR search parameter for the query's
    /// resource type. Setting the same filter twice keeps the last value.
    pub fn with_filter(mut self, name: &str, value: impl Into<String>) -> DirectoryResult<Self> {
        let parameter = self.query.resource_type.search_parameter(name)?;
        self.query.filters.insert(parameter, value);
        Ok(self)
    }

    /// Adds a filter only when a value is present.
    ///
    /// `None` and blank strings leave the query unchanged. The filter name is
    /// validated either way.
    pub fn with_optional_filter(self, name: &str, value: Option<&str>) -> DirectoryResult<Self> {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(value) => self.with_filter(name, value),
            None => {
                self.query.resource_type.search_parameter(name)?;
                Ok(self)
            }
        }
    }

    /// Returns the query. May be called any number of times.
    pub fn build(&self) -> SearchQuery {
        self.query.clone()
    }
}

fn validate_limit(limit: i64) -> DirectoryResult<u32> {
    if (i64::from(MIN_LIMIT)..=i64::from(MAX_LIMIT)).contains(&limit) {
        Ok(limit as u32)
    } else {
        Err(DirectoryError::InvalidLimit { limit })
    }
}
