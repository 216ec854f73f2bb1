//! Shared plumbing for the search tools.

use helios_directory::{
    Directory, DirectoryError, DirectoryResult, ResourceType, SearchQuery, SearchQueryBuilder,
    serialize_set,
};
use rmcp::model::{CallToolResult, Content};
use tracing::warn;

/// Parameters of a resource-type search tool.
pub trait SearchToolParams {
    /// The resource type the tool searches.
    const RESOURCE_TYPE: ResourceType;

    /// The requested result count, if given.
    fn limit(&self) -> Option<i64>;

    /// Caller-facing filter names paired with their values.
    fn filters(&self) -> Vec<(&'static str, Option<&str>)>;
}

/// Builds the validated query for a set of tool parameters.
///
/// A missing limit falls back to the resource type's default. Filters with no
/// value, or a blank one, are left out.
pub fn build_query<P: SearchToolParams>(params: &P) -> DirectoryResult<SearchQuery> {
    let mut builder = match params.limit() {
        Some(limit) => SearchQueryBuilder::new(P::RESOURCE_TYPE, limit)?,
        None => SearchQueryBuilder::with_default_limit(P::RESOURCE_TYPE),
    };

    for (name, value) in params.filters() {
        builder = builder.with_optional_filter(name, value)?;
    }

    Ok(builder.build())
}

/// Runs a search tool and renders the result as a JSON array.
pub async fn execute<P: SearchToolParams>(directory: &Directory, params: &P) -> CallToolResult {
    let query = match build_query(params) {
        Ok(query) => query,
        Err(e) => return error_result(&e),
    };

    match directory.search(&query).await {
        Ok(set) => json_result(serialize_set(&set)),
        Err(e) => error_result(&e),
    }
}

/// Renders a directory error as a tool error result.
pub fn error_result(error: &DirectoryError) -> CallToolResult {
    if !error.is_caller_error() {
        warn!(error = %error, "Tool call failed");
    }
    CallToolResult::error(vec![Content::text(error.to_string())])
}

/// Wraps serialized output as a tool result.
pub fn json_result(text: Result<String, serde_json::Error>) -> CallToolResult {
    match text {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => {
            warn!(error = %e, "Failed to serialize tool output");
            CallToolResult::error(vec![Content::text(format!(
                "failed to serialize result: {e}"
            ))])
        }
    }
}
