//! Single-resource reads.

use tracing::debug;

use crate::client::FhirApi;
use crate::error::{DirectoryError, DirectoryResult};
use crate::record::ResourceRecord;
use crate::resource_type::ResourceType;

/// Reads one resource by type and logical id. Always a single round trip.
///
/// # Errors
///
/// - [`DirectoryError::InvalidId`] if the id is empty or could not be a
///   single URL path segment. No request is sent.
/// - [`DirectoryError::NotFound`] if the server has no such resource.
/// - [`DirectoryError::Upstream`] for transport or protocol failures.
pub async fn read_resource(
    client: &dyn FhirApi,
    resource_type: ResourceType,
    id: &str,
) -> DirectoryResult<ResourceRecord> {
    validate_id(id)?;

    debug!(resource_type = %resource_type, id = %id, "Reading resource");

    client
        .read(resource_type, id)
        .await?
        .ok_or_else(|| DirectoryError::NotFound {
            resource_type,
            id: id.to_string(),
        })
}

/// Checks that a logical id is structurally usable.
///
/// Content is otherwise left to the server to judge.
pub fn validate_id(id: &str) -> DirectoryResult<()> {
    let reason = if id.is_empty() {
        Some("must not be empty")
    } else if id.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else if id.contains(['/', '?', '#']) {
        Some("must not contain '/', '?' or '#'")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(DirectoryError::InvalidId {
            id: id.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}
