//! Common test utilities for the directory crate.
//!
//! - [`ScriptedClient`] - In-memory [`FhirApi`] that replays scripted pages
//! - [`fake_server`] - HTTP fake of a FHIR server for client tests
//! - Resource fixtures

#![allow(dead_code)]

pub mod fake_server;

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use helios_directory::{
    ClientError, FhirApi, PageRequest, ResourcePage, ResourceRecord, ResourceType,
};
use serde_json::json;

/// A request observed by [`ScriptedClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recorded {
    /// First page of a search.
    Initial {
        resource_type: ResourceType,
        filters: Vec<(String, String)>,
        count: u32,
    },
    /// Continuation page.
    Next { link: String },
    /// Single-resource read.
    Read { resource_type: ResourceType, id: String },
}

/// An [`FhirApi`] that answers from a script.
///
/// Search calls pop the next scripted page; once the script runs dry every
/// further search fails with a transport error.
#[derive(Default)]
pub struct ScriptedClient {
    pages: Mutex<VecDeque<Result<ResourcePage, ClientError>>>,
    resources: HashMap<(ResourceType, String), ResourceRecord>,
    read_error: Option<ClientError>,
    delay: Option<Duration>,
    requests: Mutex<Vec<Recorded>>,
}

impl ScriptedClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a page.
    pub fn page(self, page: ResourcePage) -> Self {
        self.result(Ok(page))
    }

    /// Queues a failure.
    pub fn failure(self, error: ClientError) -> Self {
        self.result(Err(error))
    }

    fn result(self, result: Result<ResourcePage, ClientError>) -> Self {
        self.pages.lock().unwrap().push_back(result);
        self
    }

    /// Makes a resource readable.
    pub fn resource(mut self, record: ResourceRecord) -> Self {
        let resource_type = record.resource_type().unwrap().parse().unwrap();
        let id = record.id().unwrap().to_string();
        self.resources.insert((resource_type, id), record);
        self
    }

    /// Makes every read fail.
    pub fn read_error(mut self, error: ClientError) -> Self {
        self.read_error = Some(error);
        self
    }

    /// Delays every response.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Returns every request seen so far, in order.
    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    /// Returns the number of requests seen so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    async fn wait(&self) {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl FhirApi for ScriptedClient {
    async fn search_page(&self, request: PageRequest<'_>) -> Result<ResourcePage, ClientError> {
        let recorded = match request {
            PageRequest::Initial {
                resource_type,
                filters,
                count,
            } => Recorded::Initial {
                resource_type,
                filters: filters
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
                count,
            },
            PageRequest::Next { link } => Recorded::Next {
                link: link.to_string(),
            },
        };
        self.requests.lock().unwrap().push(recorded);

        self.wait().await;

        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ClientError::Transport("script exhausted".to_string())))
    }

    async fn read(
        &self,
        resource_type: ResourceType,
        id: &str,
    ) -> Result<Option<ResourceRecord>, ClientError> {
        self.requests.lock().unwrap().push(Recorded::Read {
            resource_type,
            id: id.to_string(),
        });

        self.wait().await;

        if let Some(error) = &self.read_error {
            return Err(error.clone());
        }
        Ok(self.resources.get(&(resource_type, id.to_string())).cloned())
    }
}

/// Builds a minimal resource of the given type.
pub fn resource(resource_type: &str, id: &str) -> ResourceRecord {
    ResourceRecord::new(json!({
        "resourceType": resource_type,
        "id": id,
        "meta": {"lastUpdated": "2024-03-01T12:00:00Z"}
    }))
}

/// Builds `count` Practitioner records with ids `{prefix}-0`, `{prefix}-1`, ...
pub fn practitioners(prefix: &str, count: usize) -> Vec<ResourceRecord> {
    (0..count)
        .map(|i| {
            ResourceRecord::new(json!({
                "resourceType": "Practitioner",
                "id": format!("{prefix}-{i}"),
                "name": [{"family": "Smith", "given": [format!("Given{i}")]}],
                "address": [{"state": "CA"}]
            }))
        })
        .collect()
}

/// Returns the ids of the given records, in order.
pub fn ids<'a>(records: impl IntoIterator<Item = &'a ResourceRecord>) -> Vec<String> {
    records
        .into_iter()
        .map(|r| r.id().unwrap_or_default().to_string())
        .collect()
}
