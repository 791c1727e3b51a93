//! Handlers for the `/v1/todo/` collection.
//!
//! Differs from v2: there is no search, `body` is sortable, create also
//! accepts a JSON array (an all-or-nothing batch insert), and a successful
//! PATCH answers 201 Created instead of 200.

use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
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

/// Ordering only; `search` is ignored.
pub const LIST_OPTIONS: ListOptions = ListOptions {
    sort_fields: &[SortField::Id, SortField::Title, SortField::Body],
    searchable: false,
};

/// GET /v1/todo/
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Paginated<Todo>>> {
    let page = ops::list_page(&state, &uri, &params, LIST_OPTIONS).await?;
    Ok(Json(page))
}

/// POST /v1/todo/
///
/// A JSON object creates one todo; a JSON array creates one per element,
/// or none if any element is invalid.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Response> {
    let payload = ops::json_body(payload)?;

    let response = match &payload {
        Value::Array(items) => {
            let todos = ops::create_batch(&state, items).await?;
            (StatusCode::CREATED, Json(todos)).into_response()
        }
        single => {
            let todo = ops::create_one(&state, single).await?;
            (StatusCode::CREATED, Json(todo)).into_response()
        }
    };

    Ok(response)
}

/// GET /v1/todo/{id}/
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Todo>> {
    let todo = ops::load(&state, &id).await?;
    Ok(Json(todo))
}

/// PUT /v1/todo/{id}/
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<Json<Todo>> {
    let payload = ops::json_body(payload)?;
    let todo = ops::update(&state, &id, &payload, PayloadMode::Full).await?;
    Ok(Json(todo))
}

/// PATCH /v1/todo/{id}/
///
/// Answers 201 Created on success, unlike v2.
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Todo>)> {
    let payload = ops::json_body(payload)?;
    let todo = ops::update(&state, &id, &payload, PayloadMode::Partial).await?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// DELETE /v1/todo/{id}/
pub async fn destroy(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    ops::destroy(&state, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
