//! Shared query parameter types for API handlers.

use serde::Deserialize;

/// Query parameters accepted by the list endpoints.
///
/// Values are kept as raw strings; `todo_core::listing` decides what an
/// unparsable value means for each one.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Page number, or `last`.
    pub page: Option<String>,
    pub page_size: Option<String>,
    /// Free-text search. Ignored by the v1 collection.
    pub search: Option<String>,
    /// Comma-separated sort fields, `-` prefix for descending.
    pub ordering: Option<String>,
}
