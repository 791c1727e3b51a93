//! Operations shared by both `/todo` collections.
//!
//! The v1 and v2 handlers differ only in list options, batch support, and
//! one status code; everything that touches the store lives here.

use axum::extract::rejection::JsonRejection;
use axum::http::Uri;
use axum::Json;
use serde_json::Value;
use todo_core::error::CoreError;
use todo_core::listing::{
    parse_ordering, search_terms, PageRequest, SortField, TodoFilter, TodoListQuery,
};
use todo_core::todo::{self, decode_batch, decode_create, decode_update, PayloadMode};
use todo_core::types::DbId;
use todo_db::models::todo::Todo;

use crate::error::{AppError, AppResult};
use crate::query::ListParams;
use crate::response::Paginated;
use crate::state::AppState;

/// How a collection interprets list query parameters.
#[derive(Debug, Clone, Copy)]
pub struct ListOptions {
    /// Fields accepted by `?ordering=`.
    pub sort_fields: &'static [SortField],
    /// Whether `?search=` is honoured.
    pub searchable: bool,
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: todo::ENTITY,
        id,
    })
}

/// Parse a path id. Anything that is not an `i64` cannot name a record.
pub fn parse_id(raw: &str) -> AppResult<DbId> {
    raw.parse().map_err(|_| {
        AppError::Core(CoreError::UnknownId {
            entity: todo::ENTITY,
            raw: raw.to_string(),
        })
    })
}

/// Unwrap a JSON body, turning extractor rejections into the standard error body.
pub fn json_body(payload: Result<Json<Value>, JsonRejection>) -> AppResult<Value> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

/// Fetch one page of todos according to the collection's list options.
pub async fn list_page(
    state: &AppState,
    uri: &Uri,
    params: &ListParams,
    options: ListOptions,
) -> AppResult<Paginated<Todo>> {
    let request = PageRequest::from_params(
        params.page.as_deref(),
        params.page_size.as_deref(),
        state.config.default_page_size,
        state.config.max_page_size,
    )?;

    let filter = TodoFilter {
        search_terms: if options.searchable {
            search_terms(params.search.as_deref())
        } else {
            Vec::new()
        },
    };
    let ordering = parse_ordering(params.ordering.as_deref(), options.sort_fields);

    let count = state.store.count(&filter).await?;
    let page = request.resolve(count)?;

    let query = TodoListQuery {
        filter,
        ordering,
        limit: page.size,
        offset: page.offset(),
    };
    let results = state.store.list(&query).await?;

    tracing::debug!(
        count,
        page = page.number,
        returned = results.len(),
        "Listed todos",
    );

    Ok(Paginated::new(count, &page, uri.path(), uri.query(), results))
}

/// Load a todo by its raw path id or fail with 404.
pub async fn load(state: &AppState, raw_id: &str) -> AppResult<Todo> {
    find(state, parse_id(raw_id)?).await
}

async fn find(state: &AppState, id: DbId) -> AppResult<Todo> {
    state
        .store
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))
}

/// Validate and persist a single payload.
pub async fn create_one(state: &AppState, payload: &Value) -> AppResult<Todo> {
    let input = decode_create(payload).map_err(CoreError::InvalidFields)?;
    let todo = state.store.create(&input).await?;

    tracing::info!(todo_id = todo.id, status = todo.status, "Todo created");

    Ok(todo)
}

/// Validate every element, then persist all of them or none.
pub async fn create_batch(state: &AppState, payloads: &[Value]) -> AppResult<Vec<Todo>> {
    let inputs = decode_batch(payloads).map_err(CoreError::InvalidBatch)?;
    let todos = state.store.create_many(&inputs).await?;

    tracing::info!(count = todos.len(), "Todo batch created");

    Ok(todos)
}

/// Apply a full or partial update to an existing todo.
///
/// A missing record is reported before any validation problem.
pub async fn update(
    state: &AppState,
    raw_id: &str,
    payload: &Value,
    mode: PayloadMode,
) -> AppResult<Todo> {
    let id = parse_id(raw_id)?;
    find(state, id).await?;

    let changes = decode_update(payload, mode).map_err(CoreError::InvalidFields)?;
    let todo = state
        .store
        .update(id, &changes)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(todo_id = id, ?mode, "Todo updated");

    Ok(todo)
}

/// Permanently delete a todo.
pub async fn destroy(state: &AppState, raw_id: &str) -> AppResult<()> {
    let id = parse_id(raw_id)?;
    if !state.store.delete(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(todo_id = id, "Todo deleted");

    Ok(())
}
