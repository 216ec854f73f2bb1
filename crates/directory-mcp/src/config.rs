//! Process configuration for the provider-directory MCP server.
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `FHIR_SERVER_URL` | https://flex.optum.com/fhirpublic/R4 | FHIR base URL of the directory |
//! | `FHIR_LOG_LEVEL` | info | Log level |
//! | `FHIR_REQUEST_TIMEOUT` | 30 | Per-request timeout (seconds) |
//! | `FHIR_SEARCH_TIMEOUT` | (none) | Deadline for a whole multi-page search (seconds) |
//! | `FHIR_MAX_PAGE_SIZE` | 1000 | Upper bound for the `_count` page-size hint |
//! | `FHIR_ACCEPT_INVALID_CERTS` | false | Skip TLS certificate verification |
//!
//! # Example
//!
//! ```rust
//! use helios_directory_mcp::DirectoryConfig;
//!
//! let config = DirectoryConfig {
//!     server_url: "https://directory.example/fhir".to_string(),
//!     search_timeout: Some(60),
//!     ..Default::default()
//! };
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use clap::Parser;
use helios_directory::{
    DEFAULT_FHIR_SERVER_URL, DEFAULT_MAX_PAGE_SIZE, FetchOptions, HttpClientConfig, MAX_LIMIT,
};
use url::Url;

const LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// Configuration for the provider-directory MCP server.
///
/// Built from command line arguments with [`DirectoryConfig::parse`], from
/// environment variables with [`DirectoryConfig::from_env`], or directly.
#[derive(Debug, Clone, Parser)]
#[command(name = "provider-directory-mcp")]
#[command(about = "MCP server for FHIR provider directories")]
pub struct DirectoryConfig {
    /// FHIR base URL of the provider directory.
    #[arg(long, env = "FHIR_SERVER_URL", default_value = DEFAULT_FHIR_SERVER_URL)]
    pub server_url: String,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "FHIR_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Per-request timeout in seconds.
    #[arg(long, env = "FHIR_REQUEST_TIMEOUT", default_value = "30")]
    pub request_timeout: u64,

    /// Deadline for a whole search across all pages, in seconds.
    #[arg(long, env = "FHIR_SEARCH_TIMEOUT")]
    pub search_timeout: Option<u64>,

    /// Upper bound for the page-size hint sent to the server.
    #[arg(long, env = "FHIR_MAX_PAGE_SIZE", default_value = "1000")]
    pub max_page_size: u32,

    /// Skip TLS certificate verification.
    #[arg(long, env = "FHIR_ACCEPT_INVALID_CERTS", default_value = "false")]
    pub accept_invalid_certs: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_FHIR_SERVER_URL.to_string(),
            log_level: "info".to_string(),
            request_timeout: 30,
            search_timeout: None,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            accept_invalid_certs: false,
        }
    }
}

impl DirectoryConfig {
    /// Creates a configuration from environment variables alone.
    pub fn from_env() -> Self {
        Self::try_parse_from(["provider-directory-mcp"]).unwrap_or_default()
    }

    /// Validates the configuration and returns errors if any.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        match Url::parse(&self.server_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(format!(
                "Server URL must use http or https, got '{}'",
                url.scheme()
            )),
            Err(e) => errors.push(format!("Server URL '{}' is invalid: {}", self.server_url, e)),
        }

        if !LOG_LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            errors.push(format!(
                "Log level '{}' is not one of {}",
                self.log_level,
                LOG_LEVELS.join(", ")
            ));
        }

        if self.request_timeout == 0 {
            errors.push("Request timeout cannot be 0".to_string());
        }

        if self.search_timeout == Some(0) {
            errors.push("Search timeout cannot be 0".to_string());
        }

        if self.max_page_size == 0 || self.max_page_size > MAX_LIMIT {
            errors.push(format!(
                "Max page size must be between 1 and {MAX_LIMIT}"
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Creates a configuration suitable for testing.
    pub fn for_testing() -> Self {
        Self {
            server_url: "http://127.0.0.1:0/fhir".to_string(),
            log_level: "debug".to_string(),
            request_timeout: 5,
            search_timeout: Some(10),
            max_page_size: 100,
            accept_invalid_certs: false,
        }
    }

    /// Returns the HTTP client settings.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            base_url: self.server_url.clone(),
            timeout: Duration::from_secs(self.request_timeout),
            accept_invalid_certs: self.accept_invalid_certs,
            ..Default::default()
        }
    }

    /// Returns the pagination settings.
    pub fn fetch_options(&self) -> FetchOptions {
        let options = FetchOptions::default().with_max_page_size(self.max_page_size);
        match self.search_timeout {
            Some(secs) => options.with_deadline(Duration::from_secs(secs)),
            None => options,
        }
    }
}
