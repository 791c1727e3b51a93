pub mod health;
pub mod root;
pub mod todo;

use axum::Router;

use crate::state::AppState;

/// Build the resource route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                        API root: links to both collections
///
/// /v2/todo/                list (search, ordering, pages), create
/// /v2/todo/{id}/           retrieve, update, partial update, delete
///
/// /v1/todo/                list (ordering, pages), create (single or batch)
/// /v1/todo/{id}/           retrieve, update, partial update (201), delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(root::router())
        .merge(todo::router())
}
