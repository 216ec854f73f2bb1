//! A small fake FHIR server.
//!
//! Serves searchset Bundles under `/fhir/{type}`, paging with
//! `_getpagesoffset` and `_count` the way HAPI-style servers do, and reads
//! under `/fhir/{type}/{id}`. A type with no stored resources searches as an
//! empty Bundle; any other path answers 404. Every request URI is recorded.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;

const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Default)]
struct FakeState {
    base_url: String,
    resources: Mutex<HashMap<String, Vec<Value>>>,
    failures: Mutex<HashMap<String, StatusCode>>,
    fail_from_offset: Mutex<Option<usize>>,
    relative_links: Mutex<bool>,
    requests: Mutex<Vec<String>>,
}

/// A running fake server. Shuts down when dropped.
pub struct FakeFhirServer {
    base_url: String,
    state: Arc<FakeState>,
    handle: tokio::task::JoinHandle<()>,
}

impl FakeFhirServer {
    /// Starts a server on an ephemeral local port.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}/fhir");

        let state = Arc::new(FakeState {
            base_url: base_url.clone(),
            ..Default::default()
        });

        let app = Router::new()
            .route("/fhir/{resource_type}", get(search))
            .route("/fhir/{resource_type}/{id}", get(read))
            .fallback(unrouted)
            .with_state(Arc::clone(&state));

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            state,
            handle,
        }
    }

    /// The FHIR base URL of this server.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Stores resources, grouped by their `resourceType`.
    pub fn with_resources(self, resources: impl IntoIterator<Item = Value>) -> Self {
        {
            let mut stored = self.state.resources.lock().unwrap();
            for resource in resources {
                let resource_type = resource["resourceType"].as_str().unwrap().to_string();
                stored.entry(resource_type).or_default().push(resource);
            }
        }
        self
    }

    /// Makes every search and read of a type answer with `status`.
    pub fn failing(self, resource_type: &str, status: StatusCode) -> Self {
        self.state
            .failures
            .lock()
            .unwrap()
            .insert(resource_type.to_string(), status);
        self
    }

    /// Makes every continuation page at or past `offset` fail with 500.
    pub fn failing_from_offset(self, offset: usize) -> Self {
        *self.state.fail_from_offset.lock().unwrap() = Some(offset);
        self
    }

    /// Emits `next` links relative to the base URL.
    pub fn with_relative_links(self) -> Self {
        *self.state.relative_links.lock().unwrap() = true;
        self
    }

    /// Returns the path and query of every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.requests.lock().unwrap().clone()
    }
}

impl Drop for FakeFhirServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn operation_outcome(status: StatusCode, diagnostics: &str) -> Response {
    let body = json!({
        "resourceType": "OperationOutcome",
        "issue": [{"severity": "error", "code": "processing", "diagnostics": diagnostics}]
    });
    (status, [(header::CONTENT_TYPE, "application/fhir+json")], body.to_string()).into_response()
}

fn fhir_json(body: Value) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/fhir+json")],
        body.to_string(),
    )
        .into_response()
}

async fn search(
    State(state): State<Arc<FakeState>>,
    Path(resource_type): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    uri: Uri,
) -> Response {
    state.requests.lock().unwrap().push(uri.to_string());

    if let Some(status) = state.failures.lock().unwrap().get(&resource_type) {
        return operation_outcome(*status, "search failed");
    }

    let all = state
        .resources
        .lock()
        .unwrap()
        .get(&resource_type)
        .cloned()
        .unwrap_or_default();

    let offset: usize = params
        .get("_getpagesoffset")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let count: usize = params
        .get("_count")
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE);

    if let Some(fail_from) = *state.fail_from_offset.lock().unwrap() {
        if offset > 0 && offset >= fail_from {
            return operation_outcome(StatusCode::INTERNAL_SERVER_ERROR, "page expired");
        }
    }

    let entries: Vec<Value> = all
        .iter()
        .skip(offset)
        .take(count)
        .map(|resource| {
            json!({
                "fullUrl": format!("{}/{}/{}", state.base_url, resource_type, resource["id"].as_str().unwrap_or_default()),
                "resource": resource,
                "search": {"mode": "match"}
            })
        })
        .collect();

    let origin = state.base_url.trim_end_matches("/fhir");
    let mut links = vec![json!({"relation": "self", "url": format!("{origin}{uri}")})];
    let next_offset = offset + count;
    if next_offset < all.len() {
        let relative = format!("{resource_type}?_getpagesoffset={next_offset}&_count={count}");
        let url = if *state.relative_links.lock().unwrap() {
            relative
        } else {
            format!("{}/{}", state.base_url, relative)
        };
        links.push(json!({"relation": "next", "url": url}));
    }

    fhir_json(json!({
        "resourceType": "Bundle",
        "type": "searchset",
        "total": all.len(),
        "link": links,
        "entry": entries
    }))
}

async fn unrouted(State(state): State<Arc<FakeState>>, uri: Uri) -> Response {
    state.requests.lock().unwrap().push(uri.to_string());
    operation_outcome(StatusCode::NOT_FOUND, &format!("No endpoint at {}", uri.path()))
}

async fn read(
    State(state): State<Arc<FakeState>>,
    Path((resource_type, id)): Path<(String, String)>,
    uri: Uri,
) -> Response {
    state.requests.lock().unwrap().push(uri.to_string());

    if let Some(status) = state.failures.lock().unwrap().get(&resource_type) {
        return operation_outcome(*status, "read failed");
    }

    let found = state
        .resources
        .lock()
        .unwrap()
        .get(&resource_type)
        .and_then(|all| all.iter().find(|r| r["id"] == id.as_str()).cloned());

    match found {
        Some(resource) => fhir_json(resource),
        None => operation_outcome(
            StatusCode::NOT_FOUND,
            &format!("Resource {resource_type}/{id} is not known"),
        ),
    }
}
