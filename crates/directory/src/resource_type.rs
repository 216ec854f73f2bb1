//! Provider-directory resource types and their search parameter tables.
//!
//! Each [`ResourceType`] owns a static table that maps the caller-facing filter
//! names (snake_case, as exposed by the tool surface) to the FHIR search
//! parameter names understood by the remote server. The tables are written out
//! by hand so the set of supported filters is auditable.
//!
//! | Resource | Filters | Default limit |
//! |----------|---------|---------------|
//! | Practitioner | identifier, family, given, address_state | 25 |
//! | PractitionerRole | practitioner, organization, location, specialty | 100 |
//! | Location | name, address, city, state, postal_code, usage, status | 50 |
//! | Organization | name, type, partof | 25 |
//! | OrganizationAffiliation | primary_organization, participating_organization, role, specialty, location | 100 |
//! | HealthcareService | organization, location, name, category, type, specialty | 25 |
//! | InsurancePlan | name, type, administered_by, owned_by, coverage_area | 25 |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, DirectoryResult};

/// Smallest result limit a search may request.
pub const MIN_LIMIT: u32 = 1;

/// Largest result limit a search may request.
pub const MAX_LIMIT: u32 = 1000;

/// A caller-facing filter name paired with its FHIR search parameter name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterMapping {
    /// Name used by callers (e.g. `address_state`).
    pub filter: &'static str,
    /// FHIR search parameter name (e.g. `address-state`).
    pub parameter: &'static str,
}

const fn map(filter: &'static str, parameter: &'static str) -> FilterMapping {
    FilterMapping { filter, parameter }
}

const PRACTITIONER_FILTERS: &[FilterMapping] = &[
    map("identifier", "identifier"),
    map("family", "family"),
    map("given", "given"),
    map("address_state", "address-state"),
];

const PRACTITIONER_ROLE_FILTERS: &[FilterMapping] = &[
    map("practitioner", "practitioner"),
    map("organization", "organization"),
    map("location", "location"),
    map("specialty", "specialty"),
];

const LOCATION_FILTERS: &[FilterMapping] = &[
    map("name", "name"),
    map("address", "address"),
    map("city", "address-city"),
    map("state", "address-state"),
    map("postal_code", "address-postalcode"),
    map("usage", "usage"),
    map("status", "status"),
];

const ORGANIZATION_FILTERS: &[FilterMapping] = &[
    map("name", "name"),
    map("type", "type"),
    map("partof", "partof"),
];

const ORGANIZATION_AFFILIATION_FILTERS: &[FilterMapping] = &[
    map("primary_organization", "primary-organization"),
    map("participating_organization", "participating-organization"),
    map("role", "role"),
    map("specialty", "specialty"),
    map("location", "location"),
];

const HEALTHCARE_SERVICE_FILTERS: &[FilterMapping] = &[
    map("organization", "organization"),
    map("location", "location"),
    map("name", "name"),
    map("category", "service-category"),
    map("type", "service-type"),
    map("specialty", "specialty"),
];

const INSURANCE_PLAN_FILTERS: &[FilterMapping] = &[
    map("name", "name"),
    map("type", "type"),
    map("administered_by", "administered-by"),
    map("owned_by", "owned-by"),
    map("coverage_area", "coverage-area"),
];

/// The closed set of resource types served by the provider directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    /// An individual engaged in healthcare or related services.
    Practitioner,
    /// What a practitioner does for an organization at given locations.
    PractitionerRole,
    /// A formally or informally recognized grouping of people or organizations.
    Organization,
    /// A physical place where services are provided.
    Location,
    /// A service offered by an organization at a location.
    HealthcareService,
    /// A health insurance product or plan.
    InsurancePlan,
    /// A relationship between two organizations.
    OrganizationAffiliation,
}

impl ResourceType {
    /// Every resource type, in declaration order.
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Practitioner,
        ResourceType::PractitionerRole,
        ResourceType::Organization,
        ResourceType::Location,
        ResourceType::HealthcareService,
        ResourceType::InsurancePlan,
        ResourceType::OrganizationAffiliation,
    ];

    /// Returns the FHIR resource type name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Practitioner => "Practitioner",
            ResourceType::PractitionerRole => "PractitionerRole",
            ResourceType::Organization => "Organization",
            ResourceType::Location => "Location",
            ResourceType::HealthcareService => "HealthcareService",
            ResourceType::InsurancePlan => "InsurancePlan",
            ResourceType::OrganizationAffiliation => "OrganizationAffiliation",
        }
    }

    /// Returns the filter table for this resource type.
    pub fn filters(&self) -> &'static [FilterMapping] {
        match self {
            ResourceType::Practitioner => PRACTITIONER_FILTERS,
            ResourceType::PractitionerRole => PRACTITIONER_ROLE_FILTERS,
            ResourceType::Organization => ORGANIZATION_FILTERS,
            ResourceType::Location => LOCATION_FILTERS,
            ResourceType::HealthcareService => HEALTHCARE_SERVICE_FILTERS,
            ResourceType::InsurancePlan => INSURANCE_PLAN_FILTERS,
            ResourceType::OrganizationAffiliation => ORGANIZATION_AFFILIATION_FILTERS,
        }
    }

    /// Returns the number of results a search returns when the caller
    /// does not ask for a specific limit.
    pub fn default_limit(&self) -> u32 {
        match self {
            ResourceType::Practitioner => 25,
            ResourceType::PractitionerRole => 100,
            ResourceType::Organization => 25,
            ResourceType::Location => 50,
            ResourceType::HealthcareService => 25,
            ResourceType::InsurancePlan => 25,
            ResourceType::OrganizationAffiliation => 100,
        }
    }

    /// Maps a caller-facing filter name to the FHIR search parameter name.
    ///
    /// Fails with [`DirectoryError::UnsupportedFilter`] when the name is not in
    /// this resource type's table.
    pub fn search_parameter(&self, filter: &str) -> DirectoryResult<&'static str> {
        self.filters()
            .iter()
            .find(|m| m.filter == filter)
            .map(|m| m.parameter)
            .ok_or_else(|| DirectoryError::UnsupportedFilter {
                resource_type: *self,
                filter: filter.to_string(),
            })
    }

    /// Returns true if the filter name is supported for this resource type.
    pub fn supports_filter(&self, filter: &str) -> bool {
        self.filters().iter().any(|m| m.filter == filter)
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = DirectoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResourceType::ALL
            .into_iter()
            .find(|rt| rt.as_str() == s)
            .ok_or_else(|| DirectoryError::UnknownResourceType {
                name: s.to_string(),
            })
    }
}
