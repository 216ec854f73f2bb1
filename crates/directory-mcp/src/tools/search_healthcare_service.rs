//! HealthcareService search tool.

use helios_directory::{Directory, ResourceType};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::search::{self, SearchToolParams};

/// Parameters for the search_healthcare_service tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchHealthcareServiceParams {
    /// The organization that provides this Healthcare Service
    pub organization: Option<String>,
    /// The location(s) where this Healthcare Service is provided
    pub location: Option<String>,
    /// A portion of the Healthcare Service name
    pub name: Option<String>,
    /// Service Category of the Healthcare Service
    pub category: Option<String>,
    /// The Code or Name of the Service Type of the Healthcare Service
    pub r#type: Option<String>,
    /// The specialty of the service provided
    pub specialty: Option<String>,
    /// Number of results to return (1-1000, default 25)
    #[schemars(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

impl SearchToolParams for SearchHealthcareServiceParams {
    const RESOURCE_TYPE: ResourceType = ResourceType::HealthcareService;

    fn limit(&self) -> Option<i64> {
        self.limit
    }

    fn filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("organization", self.organization.as_deref()),
            ("location", self.location.as_deref()),
            ("name", self.name.as_deref()),
            ("category", self.category.as_deref()),
            ("type", self.r#type.as_deref()),
            ("specialty", self.specialty.as_deref()),
        ]
    }
}

/// Execute the search_healthcare_service tool.
pub async fn execute(
    directory: &Directory,
    params: &SearchHealthcareServiceParams,
) -> CallToolResult {
    search::execute(directory, params).await
}
