//! MCP tool implementations for the provider directory.

pub mod read_resource;
pub mod search;
pub mod search_healthcare_service;
pub mod search_insurance_plan;
pub mod search_location;
pub mod search_organization;
pub mod search_organization_affiliation;
pub mod search_practitioner;
pub mod search_practitioner_role;

pub use read_resource::{ReadResourceParams, ReadableType};
pub use search::SearchToolParams;
pub use search_healthcare_service::SearchHealthcareServiceParams;
pub use search_insurance_plan::SearchInsurancePlanParams;
pub use search_location::SearchLocationParams;
pub use search_organization::SearchOrganizationParams;
pub use search_organization_affiliation::SearchOrganizationAffiliationParams;
pub use search_practitioner::SearchPractitionerParams;
pub use search_practitioner_role::SearchPractitionerRoleParams;
