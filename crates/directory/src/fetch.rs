//! The fetch-all pagination engine.
//!
//! [`fetch_all`] walks a FHIR searchset page by page until either the query's
//! limit is reached or the server reports no further pages. Pages are
//! requested strictly one at a time and only while more records are needed,
//! so the number of records retrieved is bounded by the limit.
//!
//! Failures are all-or-nothing. If any page request fails the records
//! gathered so far are dropped and the error is returned; a partial listing is
//! never handed back as if it were complete.

use std::time::Duration;

use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use crate::client::{FhirApi, PageRequest};
use crate::error::{ClientError, DirectoryError, DirectoryResult};
use crate::query::SearchQuery;
use crate::record::{ResourcePage, ResourceSet};

/// Default upper bound for the `_count` page-size hint.
pub const DEFAULT_MAX_PAGE_SIZE: u32 = 1000;

/// Tuning for [`fetch_all`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Upper bound for the page-size hint sent to the server.
    pub max_page_size: u32,

    /// Time allowed for the whole search, across all pages.
    pub deadline: Option<Duration>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            deadline: None,
        }
    }
}

impl FetchOptions {
    /// Sets the page-size bound.
    pub fn with_max_page_size(mut self, max_page_size: u32) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Sets the overall deadline.
    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

#[derive(Debug)]
enum Cursor {
    Start,
    Next(String),
    Done,
}

/// A lazy, finite sequence of result pages for one query.
///
/// Each call to [`Pages::next_page`] issues at most one request. The sequence
/// ends after the last page, an empty page, a repeated continuation link, or
/// any error, and cannot be restarted.
pub struct Pages<'a> {
    client: &'a dyn FhirApi,
    query: &'a SearchQuery,
    cursor: Cursor,
    fetched: usize,
}

impl<'a> Pages<'a> {
    /// Creates the page sequence for a query. No request is sent yet.
    pub fn new(client: &'a dyn FhirApi, query: &'a SearchQuery) -> Self {
        Self {
            client,
            query,
            cursor: Cursor::Start,
            fetched: 0,
        }
    }

    /// Returns the number of pages retrieved so far.
    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }

    /// Returns true once the sequence can yield no more pages.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.cursor, Cursor::Done)
    }

    /// Fetches the next page.
    ///
    /// `count` is the page-size hint for the first page; continuation links
    /// are followed as given by the server. Returns `Ok(None)` once exhausted.
    pub async fn next_page(&mut self, count: u32) -> Result<Option<ResourcePage>, ClientError> {
        // Leave the cursor at Done so a failed or cancelled request ends the walk.
        let cursor = std::mem::replace(&mut self.cursor, Cursor::Done);

        let page = match &cursor {
            Cursor::Start => {
                let request = PageRequest::Initial {
                    resource_type: self.query.resource_type(),
                    filters: self.query.filters(),
                    count,
                };
                self.client.search_page(request).await?
            }
            Cursor::Next(link) => {
                self.client
                    .search_page(PageRequest::Next { link: link.as_str() })
                    .await?
            }
            Cursor::Done => return Ok(None),
        };
        self.fetched += 1;

        self.cursor = match (&page.next, &cursor) {
            (None, _) => Cursor::Done,
            (Some(_), _) if page.records.is_empty() => {
                debug!(page = self.fetched, "Empty page with a next link; stopping");
                Cursor::Done
            }
            (Some(next), Cursor::Next(current)) if next == current => {
                warn!(link = %next, "Server returned the same continuation link twice; stopping");
                Cursor::Done
            }
            (Some(next), _) => Cursor::Next(next.clone()),
        };

        Ok(Some(page))
    }
}

/// Executes a search and returns at most `query.limit()` records.
///
/// Records keep the order in which the server delivered them. Zero matches
/// is an empty set, not an error.
///
/// # Errors
///
/// - [`DirectoryError::Upstream`] if the first page fails.
/// - [`DirectoryError::PartialFetchAborted`] if a later page fails, or the
///   deadline passes after at least one page arrived.
pub async fn fetch_all(
    client: &dyn FhirApi,
    query: &SearchQuery,
    options: &FetchOptions,
) -> DirectoryResult<ResourceSet> {
    let limit = query.limit() as usize;
    let max_page_size = options.max_page_size.max(1);
    let deadline = options.deadline.map(|d| Instant::now() + d);

    let mut pages = Pages::new(client, query);
    let mut records = Vec::new();

    while records.len() < limit {
        let remaining = limit - records.len();
        let count = u32::try_from(remaining)
            .unwrap_or(u32::MAX)
            .min(max_page_size);

        let result = match deadline {
            Some(deadline) => timeout_at(deadline, pages.next_page(count))
                .await
                .unwrap_or(Err(ClientError::Timeout)),
            None => pages.next_page(count).await,
        };

        match result {
            Ok(Some(page)) => {
                debug!(
                    resource_type = %query.resource_type(),
                    page = pages.pages_fetched(),
                    records = page.records.len(),
                    has_next = page.has_next(),
                    "Fetched page"
                );
                records.extend(page.records.into_iter().take(remaining));
            }
            Ok(None) => break,
            Err(source) => {
                let pages_fetched = pages.pages_fetched();
                warn!(
                    resource_type = %query.resource_type(),
                    pages_fetched,
                    records = records.len(),
                    error = %source,
                    "Search failed"
                );
                return Err(if pages_fetched == 0 {
                    DirectoryError::Upstream(source)
                } else {
                    DirectoryError::PartialFetchAborted {
                        pages_fetched,
                        records_discarded: records.len(),
                        source,
                    }
                });
            }
        }
    }

    info!(
        resource_type = %query.resource_type(),
        filters = query.filters().len(),
        limit,
        pages = pages.pages_fetched(),
        records = records.len(),
        "Search complete"
    );

    Ok(ResourceSet::from(records))
}
