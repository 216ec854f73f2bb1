//! Shared test helpers for helios-directory-mcp tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use helios_directory::{
    ClientError, Directory, FhirApi, PageRequest, ResourcePage, ResourceRecord, ResourceType,
};
use rmcp::model::{CallToolResult, RawContent};
use serde_json::{Value, json};

/// Extract the text content from a CallToolResult.
pub fn get_text(result: &CallToolResult) -> String {
    assert_eq!(result.content.len(), 1, "Expected exactly one content item");
    match &result.content[0].raw {
        RawContent::Text(text_content) => text_content.text.clone(),
        _ => panic!("Expected text content"),
    }
}

/// Parse the text content of a CallToolResult as JSON.
pub fn get_json(result: &CallToolResult) -> Value {
    serde_json::from_str(&get_text(result)).expect("Expected JSON text content")
}

/// Check if the result is a success.
pub fn is_success(result: &CallToolResult) -> bool {
    result.is_error == Some(false)
}

/// Check if the result is an error.
pub fn is_error(result: &CallToolResult) -> bool {
    result.is_error == Some(true)
}

/// A search request seen by [`StubDirectory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeenSearch {
    pub resource_type: ResourceType,
    pub params: Vec<(String, String)>,
    pub count: u32,
}

#[derive(Default)]
struct StubState {
    resources: Vec<ResourceRecord>,
    failure: Option<ClientError>,
    searches: Vec<SeenSearch>,
    reads: Vec<(ResourceType, String)>,
}

/// An in-memory directory.
///
/// Every search returns the stored resources of the searched type as a single
/// page, regardless of filters; filters are recorded for inspection.
#[derive(Clone, Default)]
pub struct StubDirectory {
    state: Arc<Mutex<StubState>>,
}

impl StubDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores resources.
    pub fn with_resources(self, resources: impl IntoIterator<Item = Value>) -> Self {
        self.state
            .lock()
            .unwrap()
            .resources
            .extend(resources.into_iter().map(ResourceRecord::new));
        self
    }

    /// Makes every request fail.
    pub fn failing(self, error: ClientError) -> Self {
        self.state.lock().unwrap().failure = Some(error);
        self
    }

    /// Returns a directory handle over this stub.
    pub fn directory(&self) -> Directory {
        Directory::new(self.clone())
    }

    /// Returns every search seen so far.
    pub fn searches(&self) -> Vec<SeenSearch> {
        self.state.lock().unwrap().searches.clone()
    }

    /// Returns every read seen so far.
    pub fn reads(&self) -> Vec<(ResourceType, String)> {
        self.state.lock().unwrap().reads.clone()
    }

    /// Returns the total number of requests seen.
    pub fn request_count(&self) -> usize {
        let state = self.state.lock().unwrap();
        state.searches.len() + state.reads.len()
    }
}

#[async_trait]
impl FhirApi for StubDirectory {
    async fn search_page(&self, request: PageRequest<'_>) -> Result<ResourcePage, ClientError> {
        let mut state = self.state.lock().unwrap();
        let PageRequest::Initial {
            resource_type,
            filters,
            count,
        } = request
        else {
            return Err(ClientError::Transport("unexpected continuation".to_string()));
        };

        state.searches.push(SeenSearch {
            resource_type,
            params: filters
                .iter()
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect(),
            count,
        });

        if let Some(error) = &state.failure {
            return Err(error.clone());
        }

        let records = state
            .resources
            .iter()
            .filter(|r| r.resource_type() == Some(resource_type.as_str()))
            .cloned()
            .collect();
        Ok(ResourcePage::last(records))
    }

    async fn read(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> Result<Option<ResourceRecord>, ClientError> {
        let mut state = self.state.lock().unwrap();
        state.reads.push((resource_type, id.to_string()));

        if let Some(error) = &state.failure {
            return Err(error.clone());
        }

        Ok(state
            .resources
            .iter()
            .find(|r| r.resource_type() == Some(resource_type.as_str()) && r.id() == Some(id))
            .cloned())
    }
}

/// Builds a minimal resource.
pub fn resource(resource_type: &str, id: &str) -> Value {
    json!({
        "resourceType": resource_type,
        "id": id,
        "meta": {"lastUpdated": "2024-05-01T00:00:00Z"}
    })
}

/// A deliberately rich Practitioner, with elements the directory knows nothing about.
pub fn rich_practitioner(id: &str) -> Value {
    json!({
        "resourceType": "Practitioner",
        "id": id,
        "meta": {
            "profile": ["http://hl7.org/fhir/us/davinci-pdex-plan-net/StructureDefinition/plannet-Practitioner"]
        },
        "extension": [{
            "url": "http://hl7.org/fhir/us/davinci-pdex-plan-net/StructureDefinition/endpoint-reference",
            "valueReference": {"reference": "Endpoint/ep-1"}
        }],
        "identifier": [{"system": "http://hl7.org/fhir/sid/us-npi", "value": "1234567893"}],
        "active": true,
        "name": [{"family": "Smith", "given": ["Jane"], "prefix": ["Dr."]}],
        "telecom": [{"system": "phone", "value": "555-0100", "use": "work"}],
        "address": [{"line": ["1 Main St"], "city": "Sacramento", "state": "CA"}],
        "qualification": [{"code": {"coding": [{"system": "http://terminology.hl7.org/CodeSystem/v2-0360", "code": "MD"}]}}]
    })
}
