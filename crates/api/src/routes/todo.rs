//! Route definitions for the two `/todo` collections.

use axum::routing::get;
use axum::Router;

use crate::handlers::{todo_v1, todo_v2};
use crate::state::AppState;

pub const V1_PREFIX: &str = "/v1/todo/";
pub const V2_PREFIX: &str = "/v2/todo/";

/// Routes for both collections. Paths keep their trailing slash.
///
/// ```text
/// GET    /v2/todo/          -> todo_v2::list
/// POST   /v2/todo/          -> todo_v2::create
/// GET    /v2/todo/{id}/     -> todo_v2::retrieve
/// PUT    /v2/todo/{id}/     -> todo_v2::update
/// PATCH  /v2/todo/{id}/     -> todo_v2::partial_update
/// DELETE /v2/todo/{id}/     -> todo_v2::destroy
///
/// GET    /v1/todo/          -> todo_v1::list
/// POST   /v1/todo/          -> todo_v1::create
/// GET    /v1/todo/{id}/     -> todo_v1::retrieve
/// PUT    /v1/todo/{id}/     -> todo_v1::update
/// PATCH  /v1/todo/{id}/     -> todo_v1::partial_update
/// DELETE /v1/todo/{id}/     -> todo_v1::destroy
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(V2_PREFIX, get(todo_v2::list).post(todo_v2::create))
        .route(
            "/v2/todo/{id}/",
            get(todo_v2::retrieve)
                .put(todo_v2::update)
                .patch(todo_v2::partial_update)
                .delete(todo_v2::destroy),
        )
        .route(V1_PREFIX, get(todo_v1::list).post(todo_v1::create))
        .route(
            "/v1/todo/{id}/",
            get(todo_v1::retrieve)
                .put(todo_v1::update)
                .patch(todo_v1::partial_update)
                .delete(todo_v1::destroy),
        )
}
