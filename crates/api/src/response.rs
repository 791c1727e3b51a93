//! Shared response envelope types for API handlers.

use serde::{Deserialize, Serialize};
use todo_core::listing::{page_link, Page};

/// Page-number pagination envelope returned by list endpoints.
///
/// ```json
/// { "count": 42, "next": "/v2/todo/?page=3", "previous": "/v2/todo/?page=1", "results": [] }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Total number of matching records across all pages.
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    /// Wrap one page of results, deriving `next`/`previous` links from the
    /// request path and query string.
    pub fn new(count: i64, page: &Page, path: &str, query: Option<&str>, results: Vec<T>) -> Self {
        let next = page
            .has_next()
            .then(|| page_link(path, query, page.number + 1));
        let previous = page
            .has_previous()
            .then(|| page_link(path, query, page.number - 1));
        Self {
            count,
            next,
            previous,
            results,
        }
    }
}
