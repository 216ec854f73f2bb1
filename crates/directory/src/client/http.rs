//! HTTP implementation of [`FhirApi`] on top of `reqwest`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use super::bundle::SearchBundle;
use super::{FhirApi, PageRequest};
use crate::error::ClientError;
use crate::query::SearchFilter;
use crate::record::{ResourcePage, ResourceRecord};
use crate::resource_type::ResourceType;

const FHIR_JSON: &str = "application/fhir+json";

/// Longest response-body excerpt carried in a [`ClientError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for [`HttpFhirClient`].
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// FHIR base URL (e.g. `https://server.example/fhir/R4`).
    pub base_url: String,

    /// Timeout applied to each HTTP request.
    pub timeout: Duration,

    /// User-Agent header value.
    pub user_agent: String,

    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: crate::DEFAULT_FHIR_SERVER_URL.to_string(),
            timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
            accept_invalid_certs: false,
        }
    }
}

/// A [`FhirApi`] backed by the FHIR RESTful API.
///
/// Searches are sent as `GET [base]/[type]?params&_count=n`; continuation
/// pages follow the Bundle `next` link as given by the server.
#[derive(Debug, Clone)]
pub struct HttpFhirClient {
    http: reqwest::Client,
    base_url: Url,
}

impl HttpFhirClient {
    /// Creates a client from configuration.
    pub fn new(config: &HttpClientConfig) -> Result<Self, ClientError> {
        let base_url = parse_base_url(&config.base_url)?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(FHIR_JSON));

        if config.accept_invalid_certs {
            warn!(base_url = %base_url, "TLS certificate verification is disabled");
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| ClientError::Transport(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { http, base_url })
    }

    /// Returns the normalised base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for the first page of a search.
    pub fn search_url(
        &self,
        resource_type: ResourceType,
        filters: &SearchFilter,
        count: u32,
    ) -> Result<Url, ClientError> {
        let mut url = self.type_url(resource_type)?;
        {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in filters.iter() {
                pairs.append_pair(name, value);
            }
            pairs.append_pair("_count", &count.to_string());
        }
        Ok(url)
    }

    /// Builds the URL for a read interaction.
    pub fn read_url(&self, resource_type: ResourceType, id: &str) -> Result<Url, ClientError> {
        let mut url = self.type_url(resource_type)?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .push(id);
        Ok(url)
    }

    /// Resolves a continuation link, which may be relative to the base URL.
    pub fn resolve_link(&self, link: &str) -> Result<Url, ClientError> {
        match Url::parse(link) {
            Ok(url) => Ok(url),
            Err(url::ParseError::RelativeUrlWithoutBase) => self
                .base_url
                .join(link)
                .map_err(|e| ClientError::InvalidUrl(format!("{link}: {e}"))),
            Err(e) => Err(ClientError::InvalidUrl(format!("{link}: {e}"))),
        }
    }

    fn type_url(&self, resource_type: ResourceType) -> Result<Url, ClientError> {
        self.base_url
            .join(resource_type.as_str())
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))
    }

    /// GETs a URL and parses the JSON body. Any non-success status is an
    /// error, including 404 and 410.
    async fn get_json(&self, url: Url) -> Result<Value, ClientError> {
        debug!(url = %url, "GET");

        let response = self.http.get(url.clone()).send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(map_reqwest_error)?;

        if !status.is_success() {
            debug!(url = %url, status = status.as_u16(), "Request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: error_message(&bytes),
            });
        }

        serde_json::from_slice(&bytes)
            .map_err(|e| ClientError::Decode(format!("response is not JSON: {e}")))
    }
}

#[async_trait]
impl FhirApi for HttpFhirClient {
    async fn search_page(&self, request: PageRequest<'_>) -> Result<ResourcePage, ClientError> {
        let url = match request {
            PageRequest::Initial {
                resource_type,
                filters,
                count,
            } => self.search_url(resource_type, filters, count)?,
            PageRequest::Next { link } => self.resolve_link(link)?,
        };

        let body = self.get_json(url).await?;

        let resource_type = body.get("resourceType").and_then(Value::as_str);
        if resource_type != Some("Bundle") {
            return Err(ClientError::Decode(format!(
                "expected a Bundle, got {}",
                resource_type.unwrap_or("a non-FHIR document")
            )));
        }

        let bundle: SearchBundle = serde_json::from_value(body)
            .map_err(|e| ClientError::Decode(format!("malformed Bundle: {e}")))?;

        Ok(bundle.into_page())
    }

    async fn read(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> Result<Option<ResourceRecord>, ClientError> {
        let url = self.read_url(resource_type, id)?;

        let body = match self.get_json(url).await {
            Ok(body) => body,
            Err(ClientError::Status { status, .. }) if is_absent(status) => return Ok(None),
            Err(e) => return Err(e),
        };

        let record = ResourceRecord::new(body);
        match record.resource_type() {
            Some(rt) if rt == resource_type.as_str() => Ok(Some(record)),
            other => Err(ClientError::Decode(format!(
                "expected {}, got {}",
                resource_type,
                other.unwrap_or("a non-FHIR document")
            ))),
        }
    }
}

/// 404 Not Found or 410 Gone on a read.
fn is_absent(status: u16) -> bool {
    status == StatusCode::NOT_FOUND.as_u16() || status == StatusCode::GONE.as_u16()
}

fn parse_base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if url.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(format!("{raw}: not a base URL")));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout
    } else {
        ClientError::Transport(err.to_string())
    }
}

/// Extracts a readable message from an error response.
///
/// Prefers OperationOutcome diagnostics; falls back to the start of the body.
fn error_message(body: &[u8]) -> String {
    if let Ok(value) = serde_json::from_slice::<Value>(body) {
        let issue = value
            .get("issue")
            .and_then(Value::as_array)
            .and_then(|issues| issues.first());
        if let Some(issue) = issue {
            let text = issue
                .get("diagnostics")
                .and_then(Value::as_str)
                .or_else(|| issue.pointer("/details/text").and_then(Value::as_str));
            if let Some(text) = text {
                return text.to_string();
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> HttpFhirClient {
        HttpFhirClient::new(&HttpClientConfig {
            base_url: base.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let c = client("https://flex.optum.com/fhirpublic/R4");
        assert_eq!(c.base_url().as_str(), "https://flex.optum.com/fhirpublic/R4/");

        let c = client("https://example.org/fhir/");
        assert_eq!(c.base_url().as_str(), "https://example.org/fhir/");
    }

    #[test]
    fn test_invalid_base_url() {
        let err = HttpFhirClient::new(&HttpClientConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, ClientError::InvalidUrl(_)));
    }

    #[test]
    fn test_search_url() {
        let c = client("https://example.org/fhir/R4");
        let mut filters = SearchFilter::new();
        filters.insert("family", "Smith");
        filters.insert("address-state", "CA");

        let url = c
            .search_url(ResourceType::Practitioner, &filters, 10)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://example.org/fhir/R4/Practitioner?family=Smith&address-state=CA&_count=10"
        );
    }

    #[test]
    fn test_search_url_encodes_values() {
        let c = client("https://example.org/fhir");
        let mut filters = SearchFilter::new();
        filters.insert("practitioner", "Practitioner/123");
        filters.insert("name", "St. Mary & Joseph");

        let url = c
            .search_url(ResourceType::PractitionerRole, &filters, 5)
            .unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("practitioner".to_string(), "Practitioner/123".to_string()),
                ("name".to_string(), "St. Mary & Joseph".to_string()),
                ("_count".to_string(), "5".to_string()),
            ]
        );
    }

    #[test]
    fn test_read_url_escapes_id() {
        let c = client("https://example.org/fhir");
        let url = c.read_url(ResourceType::Organization, "a b").unwrap();
        assert_eq!(url.as_str(), "https://example.org/fhir/Organization/a%20b");
    }

    #[test]
    fn test_resolve_link() {
        let c = client("https://example.org/fhir/R4");

        let absolute = c
            .resolve_link("https://other.example/fhir?_getpages=abc&_getpagesoffset=10")
            .unwrap();
        assert_eq!(absolute.host_str(), Some("other.example"));

        let relative = c.resolve_link("Practitioner?page=2").unwrap();
        assert_eq!(
            relative.as_str(),
            "https://example.org/fhir/R4/Practitioner?page=2"
        );
    }

    #[test]
    fn test_error_message_prefers_operation_outcome() {
        let body = br#"{"resourceType":"OperationOutcome","issue":[{"severity":"error","code":"processing","diagnostics":"Unknown search parameter"}]}"#;
        assert_eq!(error_message(body), "Unknown search parameter");

        let body = br#"{"resourceType":"OperationOutcome","issue":[{"severity":"error","details":{"text":"Bad things"}}]}"#;
        assert_eq!(error_message(body), "Bad things");
    }

    #[test]
    fn test_error_message_truncates_plain_text() {
        let body = "x".repeat(2000);
        let msg = error_message(body.as_bytes());
        assert_eq!(msg.len(), MAX_ERROR_BODY + 3);
        assert!(msg.ends_with("..."));

        assert_eq!(error_message(b"  Service Unavailable \n"), "Service Unavailable");
    }

    #[test]
    fn test_only_404_and_410_are_absent() {
        assert!(is_absent(404));
        assert!(is_absent(410));
        assert!(!is_absent(400));
        assert!(!is_absent(500));
    }
}
