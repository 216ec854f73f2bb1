//! Practitioner search tool.

use helios_directory::{Directory, ResourceType};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::search::{self, SearchToolParams};

/// Parameters for the search_practitioner tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchPractitionerParams {
    /// The identifier of the practitioner; i.e. NPI
    pub identifier: Option<String>,
    /// The family name (surname)
    pub family: Option<String>,
    /// The given name (first name)
    pub given: Option<String>,
    /// The state of the practitioner's address
    pub address_state: Option<String>,
    /// Number of results to return (1-1000, default 25)
    #[schemars(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

impl SearchToolParams for SearchPractitionerParams {
    const RESOURCE_TYPE: ResourceType = ResourceType::Practitioner;

    fn limit(&self) -> Option<i64> {
        self.limit
    }

    fn filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("identifier", self.identifier.as_deref()),
            ("family", self.family.as_deref()),
            ("given", self.given.as_deref()),
            ("address_state", self.address_state.as_deref()),
        ]
    }
}

/// Execute the search_practitioner tool.
pub async fn execute(directory: &Directory, params: &SearchPractitionerParams) -> CallToolResult {
    search::execute(directory, params).await
}
