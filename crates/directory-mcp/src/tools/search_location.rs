//! Location search tool.

use helios_directory::{Directory, ResourceType};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::search::{self, SearchToolParams};

/// Parameters for the search_location tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchLocationParams {
    /// A portion of the location's name or alias
    pub name: Option<String>,
    /// A portion of the address parts
    pub address: Option<String>,
    /// The city specified in an address
    pub city: Option<String>,
    /// The state specified in an address
    pub state: Option<String>,
    /// A postal code specified in an address
    pub postal_code: Option<String>,
    /// Location usage code
    pub usage: Option<String>,
    /// active | suspended | inactive
    pub status: Option<String>,
    /// Number of results to return (1-1000, default 50)
    #[schemars(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

impl SearchToolParams for SearchLocationParams {
    const RESOURCE_TYPE: ResourceType = ResourceType::Location;

    fn limit(&self) -> Option<i64> {
        self.limit
    }

    fn filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", self.name.as_deref()),
            ("address", self.address.as_deref()),
            ("city", self.city.as_deref()),
            ("state", self.state.as_deref()),
            ("postal_code", self.postal_code.as_deref()),
            ("usage", self.usage.as_deref()),
            ("status", self.status.as_deref()),
        ]
    }
}

/// Execute the search_location tool.
pub async fn execute(directory: &Directory, params: &SearchLocationParams) -> CallToolResult {
    search::execute(directory, params).await
}
