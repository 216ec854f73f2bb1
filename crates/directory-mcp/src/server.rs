//! Core MCP server implementation for the provider directory.

use helios_directory::{ClientError, Directory, HttpFhirClient};
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt, handler::server::wrapper::Parameters,
    model::*, tool, tool_handler, tool_router, transport::stdio,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::DirectoryConfig;
use crate::tools::{
    self, ReadResourceParams, SearchHealthcareServiceParams, SearchInsurancePlanParams,
    SearchLocationParams, SearchOrganizationAffiliationParams, SearchOrganizationParams,
    SearchPractitionerParams, SearchPractitionerRoleParams,
};

/// Error type for MCP server operations.
#[derive(Error, Debug)]
pub enum ServerError {
    /// The FHIR client could not be created.
    #[error("client setup failed: {0}")]
    Client(#[from] ClientError),

    /// MCP protocol error.
    #[error("MCP error: {0}")]
    Mcp(String),
}

/// MCP server for a FHIR provider directory.
///
/// Exposes one search tool per directory resource type plus a generic read
/// tool. Tool failures are reported as tool error results, never as protocol
/// errors.
#[derive(Clone)]
pub struct DirectoryMcpServer {
    directory: Directory,
    tool_router: rmcp::handler::server::router::tool::ToolRouter<DirectoryMcpServer>,
}

#[tool_router]
impl DirectoryMcpServer {
    /// Creates a server over an existing directory handle.
    pub fn new(directory: Directory) -> Self {
        Self {
            directory,
            tool_router: Self::tool_router(),
        }
    }

    /// Creates a server talking HTTP to the configured FHIR endpoint.
    pub fn from_config(config: &DirectoryConfig) -> Result<Self, ServerError> {
        let client = HttpFhirClient::new(&config.http_client_config())?;
        let directory = Directory::new(client).with_options(config.fetch_options());
        Ok(Self::new(directory))
    }

    /// Returns the directory handle the tools run against.
    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Returns the registered tools.
    pub fn tools(&self) -> Vec<Tool> {
        self.tool_router.list_all()
    }

    #[tool(description = "Search for Practitioners.\n\n\
        Practitioner covers all individuals who are engaged in the healthcare process and \
        healthcare-related services as part of their formal responsibilities and this Resource \
        is used for attribution of activities and responsibilities to these individuals.")]
    async fn search_practitioner(
        &self,
        Parameters(params): Parameters<SearchPractitionerParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "Tool: search_practitioner");
        Ok(tools::search_practitioner::execute(&self.directory, &params).await)
    }

    #[tool(description = "Search for PractitionerRoles.\n\n\
        The PractitionerRole describes the types of services that practitioners provide for an \
        organization at specific location(s).\n\n\
        The PractitionerRole resource can be used in multiple contexts including:\n\
        - Provider Registries where it indicates what a practitioner can perform for an \
        organization (may indicate multiple healthcareservices, locations, and roles)\n\
        - In a Clinical system where it indicates the role, healthcareservice and location \
        details associated with a practitioner that are applicable to the healthcare event \
        (e.g. Observation, Appointment, Condition, CarePlan)\n\
        - In a Clinical system as a point of reference rather than an event, such as a \
        patient's preferred general practitioner (at a specific clinic)")]
    async fn search_practitioner_role(
        &self,
        Parameters(params): Parameters<SearchPractitionerRoleParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "Tool: search_practitioner_role");
        Ok(tools::search_practitioner_role::execute(&self.directory, &params).await)
    }

    #[tool(description = "Search for Locations.\n\n\
        A Location includes both incidental locations (a place which is used for healthcare \
        without prior designation or authorization) and dedicated, formally appointed locations. \
        Locations may be private, public, mobile or fixed and scale from small freezers to full \
        hospital buildings or parking garages.\n\n\
        Examples of Locations are:\n\
        - Building, ward, corridor, room or bed\n\
        - Mobile Clinic\n\
        - Freezer, incubator\n\
        - Vehicle or lift\n\
        - Home, shed, or a garage\n\
        - Road, parking place, a park\n\
        - Ambulance (generic)\n\
        - Ambulance (specific)\n\
        - Patient's Home (generic)\n\
        - Jurisdiction")]
    async fn search_location(
        &self,
        Parameters(params): Parameters<SearchLocationParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "Tool: search_location");
        Ok(tools::search_location::execute(&self.directory, &params).await)
    }

    #[tool(description = "Search for Organizations.\n\n\
        This resource may be used in a shared registry of contact and other information for \
        various organizations or it can be used merely as a support for other resources that \
        need to reference organizations, perhaps as a document, message or as a contained \
        resource. If using a registry approach, it's entirely possible for multiple registries \
        to exist, each dealing with different types or levels of organization.")]
    async fn search_organization(
        &self,
        Parameters(params): Parameters<SearchOrganizationParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "Tool: search_organization");
        Ok(tools::search_organization::execute(&self.directory, &params).await)
    }

    #[tool(description = "Search for OrganizationAffiliations.\n\n\
        A relationship between 2 organizations over a period of time, where the entities are \
        separate business entities. The relationship can optionally include details of \
        locations/services from the participating organization.\n\n\
        The OrganizationAffiliation enables defining non-hierarchical relationships between \
        organizations. For example:\n\
        - One organization may provide services to another organization (e.g. An agency \
        service providing casual staff, a radiology service, a diagnostic lab, catering \
        services, community care services etc.)\n\
        - Two or more organizations may form a partnership or joint venture\n\
        - An organization may be a member of an association, but not owned by it (e.g. a \
        hospital is a member the American Hospital Association, a hospital is a member of a \
        health information exchange network)\n\
        - Spotless Cleaning Services (participatingOrganization) is a supplier (code) to \
        General Hospital (organization)\n\
        - General Hospital (participatingOrganization) is a member (code) of Eastern HIE \
        (organization)")]
    async fn search_organization_affiliation(
        &self,
        Parameters(params): Parameters<SearchOrganizationAffiliationParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "Tool: search_organization_affiliation");
        Ok(tools::search_organization_affiliation::execute(&self.directory, &params).await)
    }

    #[tool(description = "Search for HealthcareServices.\n\n\
        The HealthcareService resource is used to describe a single healthcare service or \
        category of services that are provided by an organization at a location. The location \
        of the services could be virtual, as with telemedicine services.\n\n\
        Common examples of HealthcareServices resources are:\n\
        - Allied Health\n\
        - Clinical Neuropsychologist\n\
        - Podiatry Service\n\
        - Smallville Hospital Emergency Services\n\
        - Respite care provided at a nursing home or hostel\n\
        - 24hr crisis telephone counseling service\n\
        - Information, advice and/or referral services; Disability, Telecommunications\n\
        - Rural TeleHealth Services\n\
        - Hospital in the home\n\
        - Yellow Cabs\n\
        - Pharmacy\n\
        - Active Rehab\n\
        - Social Support\n\
        - Drug and/or alcohol counseling\n\
        - Day Programs, Adult Training & Support Services\n\
        - Consulting psychologists and/or psychology services\n\
        - Group Hydrotherapy\n\
        - Little River Home Maintenance\n\
        - CT Head Scan w/o Contrast\n\
        - CT Head Scan with Contrast\n\
        - CT Head+Chest Scan with Contrast")]
    async fn search_healthcare_service(
        &self,
        Parameters(params): Parameters<SearchHealthcareServiceParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "Tool: search_healthcare_service");
        Ok(tools::search_healthcare_service::execute(&self.directory, &params).await)
    }

    #[tool(description = "Search for InsurancePlans.\n\n\
        A product is a discrete package of health insurance coverage benefits that are offered \
        under a particular network type. A given payer's products typically differ by network \
        type and/or coverage benefits. A plan pairs the health insurance coverage benefits under \
        a product with the particular cost sharing structure offered to a consumer. A given \
        product may comprise multiple plans.\n\n\
        InsurancePlan describes a health insurance offering comprised of a list of covered \
        benefits (i.e. the product), costs associated with those benefits (i.e. the plan), and \
        additional information about the offering, such as who it is owned and administered by, \
        a coverage area, contact information, etc.")]
    async fn search_insurance_plan(
        &self,
        Parameters(params): Parameters<SearchInsurancePlanParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(?params, "Tool: search_insurance_plan");
        Ok(tools::search_insurance_plan::execute(&self.directory, &params).await)
    }

    #[tool(description = "Read a specific FHIR resource by type and ID.")]
    async fn read_resource(
        &self,
        Parameters(params): Parameters<ReadResourceParams>,
    ) -> Result<CallToolResult, McpError> {
        debug!(
            resource_type = ?params.resource_type,
            id = %params.id,
            "Tool: read_resource"
        );
        Ok(tools::read_resource::execute(&self.directory, &params).await)
    }

    /// Serve MCP over stdio (stdin/stdout).
    ///
    /// This method blocks until the connection is closed.
    pub async fn serve_stdio(self) -> Result<(), ServerError> {
        info!(tools = self.tools().len(), "Starting MCP server on stdio");
        let service = self
            .serve(stdio())
            .await
            .map_err(|e| ServerError::Mcp(format!("Failed to start server: {}", e)))?;
        service
            .waiting()
            .await
            .map_err(|e| ServerError::Mcp(format!("Server error: {}", e)))?;
        Ok(())
    }
}

#[tool_handler]
impl ServerHandler for DirectoryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            instructions: Some(
                "FHIR provider directory. Use the search_* tools to find Practitioners, \
                 PractitionerRoles, Organizations, Locations, OrganizationAffiliations, \
                 HealthcareServices and InsurancePlans; each returns a JSON array of matching \
                 resources. Use read_resource to fetch one resource by type and id."
                    .into(),
            ),
        }
    }
}
