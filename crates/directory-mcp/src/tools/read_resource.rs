//! Read resource tool implementation.

use helios_directory::{Directory, ResourceType, serialize_record};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::search::{error_result, json_result};

/// Resource types the read_resource tool accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, schemars::JsonSchema)]
pub enum ReadableType {
    Practitioner,
    PractitionerRole,
    Organization,
    Location,
    HealthcareService,
    InsurancePlan,
    OrganizationAffiliation,
}

impl From<ReadableType> for ResourceType {
    fn from(value: ReadableType) -> Self {
        match value {
            ReadableType::Practitioner => ResourceType::Practitioner,
            ReadableType::PractitionerRole => ResourceType::PractitionerRole,
            ReadableType::Organization => ResourceType::Organization,
            ReadableType::Location => ResourceType::Location,
            ReadableType::HealthcareService => ResourceType::HealthcareService,
            ReadableType::InsurancePlan => ResourceType::InsurancePlan,
            ReadableType::OrganizationAffiliation => ResourceType::OrganizationAffiliation,
        }
    }
}

/// Parameters for the read_resource tool.
#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
pub struct ReadResourceParams {
    /// The type of resource
    pub resource_type: ReadableType,
    /// The logical ID of the resource
    pub id: String,
}

/// Execute the read_resource tool.
///
/// Returns the resource as a JSON object.
pub async fn execute(directory: &Directory, params: &ReadResourceParams) -> CallToolResult {
    match directory.read(params.resource_type.into(), &params.id).await {
        Ok(record) => json_result(serialize_record(&record)),
        Err(e) => error_result(&e),
    }
}
