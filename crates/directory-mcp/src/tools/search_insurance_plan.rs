//! InsurancePlan search tool.

use helios_directory::{Directory, ResourceType};
use rmcp::model::CallToolResult;
use rmcp::schemars;

use super::search::{self, SearchToolParams};

/// Parameters for the search_insurance_plan tool.
#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
pub struct SearchInsurancePlanParams {
    /// A portion of the insurance plan name
    pub name: Option<String>,
    /// Kind of plan (e.g. medical | dental | mental)
    pub r#type: Option<String>,
    /// Product administrator (Organization)
    pub administered_by: Option<String>,
    /// Product issuer (Organization)
    pub owned_by: Option<String>,
    /// The coverage area for the product (Location)
    pub coverage_area: Option<String>,
    /// Number of results to return (1-1000, default 25)
    #[schemars(range(min = 1, max = 1000))]
    pub limit: Option<i64>,
}

impl SearchToolParams for SearchInsurancePlanParams {
    const RESOURCE_TYPE: ResourceType = ResourceType::InsurancePlan;

    fn limit(&self) -> Option<i64> {
        self.limit
    }

    fn filters(&self) -> Vec<(&'static str, Option<&str>)> {
        vec![
            ("name", self.name.as_deref()),
            ("type", self.r#type.as_deref()),
            ("administered_by", self.administered_by.as_deref()),
            ("owned_by", self.owned_by.as_deref()),
            ("coverage_area", self.coverage_area.as_deref()),
        ]
    }
}

/// Execute the search_insurance_plan tool.
pub async fn execute(directory: &Directory, params: &SearchInsurancePlanParams) -> CallToolResult {
    search::execute(directory, params).await
}
