//! Organization search tool.

use helios_directory::{Directory, ResourceType};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::search::{self, SearchToolParams};

/// Parameters for the search_organization tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchOrganizationParams {
    /// A portion of the organization's name
    pub name: Option<String>,
    /// A code for the type of organization (e.g., prov | dept | ins | pay)
    pub r#type: Option<String>,
    /// Reference to the parent organization
    pub partof: Option<String>,
    /// Number of results to return (1-1000, default 25)
    #[schemars(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

impl SearchToolParams for SearchOrganizationParams {
    const RESOURCE_TYPE: ResourceType = ResourceType::Organization;

    fn limit(&self) -> Option<i64> {
        self.limit
    }

    fn filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", self.name.as_deref()),
            ("type", self.r#type.as_deref()),
            ("partof", self.partof.as_deref()),
        ]
    }
}

/// Execute the search_organization tool.
pub async fn execute(directory: &Directory, params: &SearchOrganizationParams) -> CallToolResult {
    search::execute(directory, params).await
}
