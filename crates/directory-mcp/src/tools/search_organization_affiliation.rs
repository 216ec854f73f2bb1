//! OrganizationAffiliation search tool.

use helios_directory::{Directory, ResourceType};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::search::{self, SearchToolParams};

/// Parameters for the search_organization_affiliation tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchOrganizationAffiliationParams {
    /// Reference to the primary organization
    pub primary_organization: Option<String>,
    /// Reference to the participating organization
    pub participating_organization: Option<String>,
    /// Definition of the role the participatingOrganization plays
    pub role: Option<String>,
    /// Specific specialty of the participatingOrganization in the context of the role
    pub specialty: Option<String>,
    /// The location(s) at which the role occurs
    pub location: Option<String>,
    /// Number of results to return (1-1000, default 100)
    #[schemars(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

impl SearchToolParams for SearchOrganizationAffiliationParams {
    const RESOURCE_TYPE: ResourceType = ResourceType::OrganizationAffiliation;

    fn limit(&self) -> Option<i64> {
        self.limit
    }

    fn filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("primary_organization", self.primary_organization.as_deref()),
            (
                "participating_organization",
                self.participating_organization.as_deref(),
            ),
            ("role", self.role.as_deref()),
            ("specialty", self.specialty.as_deref()),
            ("location", self.location.as_deref()),
        ]
    }
}

/// Execute the search_organization_affiliation tool.
pub async fn execute(
    directory: &Directory,
    params: &SearchOrganizationAffiliationParams,
) -> CallToolResult {
    search::execute(directory, params).await
}
