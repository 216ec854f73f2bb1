//! PractitionerRole search tool.

use helios_directory::{Directory, ResourceType};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::search::{self, SearchToolParams};

/// Parameters for the search_practitioner_role tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchPractitionerRoleParams {
    /// Reference to the practitioner (e.g. "Practitioner/123" or just "123")
    pub practitioner: Option<String>,
    /// Reference to the organization
    pub organization: Option<String>,
    /// Reference to the location
    pub location: Option<String>,
    /// Code for specialty
    pub specialty: Option<String>,
    /// Number of results to return (1-1000, default 100)
    #[schemars(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

impl SearchToolParams for SearchPractitionerRoleParams {
    const RESOURCE_TYPE: ResourceType = ResourceType::PractitionerRole;

    fn limit(&self) -> Option<i64> {
        self.limit
    }

    fn filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("practitioner", self.practitioner.as_deref()),
            ("organization", self.organization.as_deref()),
            ("location", self.location.as_deref()),
            ("specialty", self.specialty.as_deref()),
        ]
    }
}

/// Execute the search_practitioner_role tool.
pub async fn execute(
    directory: &Directory,
    params: &SearchPractitionerRoleParams,
) -> CallToolResult {
    search::execute(directory, params).await
}
