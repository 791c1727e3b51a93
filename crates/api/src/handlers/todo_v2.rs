//! Handlers for the `/v2/todo/` collection.

use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde_json::Value;
use todo_core::listing::SortField;
use todo_core::todo::PayloadMode;
use todo_db::models::todo::Todo;

use super::todo::{self as ops, ListOptions};
use crate::error::AppResult;
use crate::query::ListParams;
use crate::response::Paginated;
use crate::state::AppState;

/// Search across title and body; order by title or id.
pub const LIST_OPTIONS: ListOptions = ListOptions {
    sort_fields: &[SortField::Title, SortField::Id],
    searchable: true,
};

/// GET /v2/todo/
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<Todo>>> {
    let page = ops::list_page(&state, &uri, &params, LIST_OPTIONS).await?;
    Ok(Json(page))
}

/// POST /v2/todo/
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let payload = ops::json_body(payload)?;
    let todo = ops::create_one(&state, &payload).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// GET /v2/todo/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Todo>> {
    let todo = ops::load(&state, &id).await?;
    Ok(Json(todo))
}

/// PUT /v2/todo/{id}/
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let payload = ops::json_body(payload)?;
    let todo = ops::update(&state, &id, &payload, PayloadMode::Full).await?;
    Ok(Json(todo))
}

/// PATCH /v2/todo/{id}/
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let payload = ops::json_body(payload)?;
    let todo = ops::update(&state, &id, &payload, PayloadMode::Partial).await?;
    Ok(Json(todo))
}

/// DELETE /v2/todo/{id}/
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    ops::destroy(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
