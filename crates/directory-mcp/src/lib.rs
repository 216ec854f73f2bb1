//! MCP server for FHIR provider directories.
//!
//! This crate exposes the search and read operations of [`helios_directory`]
//! as MCP (Model Context Protocol) tools over stdio.
//!
//! # Tools
//!
//! | Tool | Resource type |
//! |------|---------------|
//! | `search_practitioner` | Practitioner |
//! | `search_practitioner_role` | PractitionerRole |
//! | `search_location` | Location |
//! | `search_organization` | Organization |
//! | `search_organization_affiliation` | OrganizationAffiliation |
//! | `search_healthcare_service` | HealthcareService |
//! | `search_insurance_plan` | InsurancePlan |
//! | `read_resource` | any of the above |
//!
//! Search tools return a JSON array of resources; `read_resource` returns one
//! resource object. Failures come back as tool error results carrying the
//! error message.

pub mod config;
mod server;
pub mod tools;

pub use config::DirectoryConfig;
pub use server::{DirectoryMcpServer, ServerError};

/// Initializes the tracing subscriber.
///
/// Logs are written to stderr; stdout carries the MCP stream. `RUST_LOG`
/// takes precedence over `level` when set.
///
/// # Arguments
///
/// * `level` - The log level (error, warn, info, debug, trace)
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "helios_directory={level},helios_directory_mcp={level},rmcp=warn"
        ))
    });

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
