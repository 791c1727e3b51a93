//! Repository for the `todos` table.

use sqlx::{PgExecutor, PgPool};
use todo_core::listing::{OrderTerm, SortField, TodoFilter, TodoListQuery};
use todo_core::types::DbId;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, body, status, created_at, updated_at, done_at, deleted_at";

/// Provides CRUD and list operations for todos.
pub struct TodoRepo;

impl TodoRepo {
    /// Insert a new todo, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateTodo) -> Result<Todo, sqlx::Error> {
        Self::insert(pool, input).await
    }

    /// Insert several todos in one transaction.
    ///
    /// Either every row is inserted or none is. Rows come back in input order.
    pub async fn create_many(
        pool: &PgPool,
        inputs: &[CreateTodo],
    ) -> Result<Vec<Todo>, sqlx::Error> {
        let mut tx = pool.begin().await?;
        let mut created = Vec::with_capacity(inputs.len());
        for input in inputs {
            created.push(Self::insert(&mut *tx, input).await?);
        }
        tx.commit().await?;
        tracing::debug!(count = created.len(), "Committed todo batch");
        Ok(created)
    }

    async fn insert<'e, E: PgExecutor<'e>>(
        executor: E,
        input: &CreateTodo,
    ) -> Result<Todo, sqlx::Error> {
        let query = format!(
            "INSERT INTO todos (title, body, status)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.status)
            .fetch_one(executor)
            .await
    }

    /// Find a todo by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM todos WHERE id = $1");
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Count the todos that pass `filter`.
    pub async fn count(pool: &PgPool, filter: &TodoFilter) -> Result<i64, sqlx::Error> {
        let query = format!("SELECT COUNT(*) FROM todos {}", where_clause(filter));
        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for term in &filter.search_terms {
            q = q.bind(like_pattern(term));
        }
        q.fetch_one(pool).await
    }

    /// Fetch one page of todos that pass the query's filter, in the requested order.
    pub async fn list(pool: &PgPool, params: &TodoListQuery) -> Result<Vec<Todo>, sqlx::Error> {
        let bind_idx = params.filter.search_terms.len() + 1;
        let query = format!(
            "SELECT {COLUMNS} FROM todos \
             {where_clause} \
             ORDER BY {order_clause} \
             LIMIT ${bind_idx} OFFSET ${next_idx}",
            where_clause = where_clause(&params.filter),
            order_clause = order_clause(&params.ordering),
            bind_idx = bind_idx,
            next_idx = bind_idx + 1,
        );

        let mut q = sqlx::query_as::<_, Todo>(&query);
        for term in &params.filter.search_terms {
            q = q.bind(like_pattern(term));
        }
        q.bind(params.limit).bind(params.offset).fetch_all(pool).await
    }

    /// Update a todo. Only non-`None` fields in `input` are applied;
    /// `updated_at` is always bumped.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateTodo,
    ) -> Result<Option<Todo>, sqlx::Error> {
        let query = format!(
            "UPDATE todos SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                status = COALESCE($4, status),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Todo>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .bind(input.status)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a todo by ID. Returns `true` if a row was removed.
    pub async fn hard_delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// One `ILIKE` condition per search term, all of which must hold.
///
/// Placeholders start at `$1`; callers bind [`like_pattern`] for each term in order.
fn where_clause(filter: &TodoFilter) -> String {
    if filter.search_terms.is_empty() {
        return String::new();
    }
    let conditions: Vec<String> = (1..=filter.search_terms.len())
        .map(|idx| format!("(title ILIKE ${idx} ESCAPE '\\' OR body ILIKE ${idx} ESCAPE '\\')"))
        .collect();
    format!("WHERE {}", conditions.join(" AND "))
}

/// Wrap a term for substring matching, escaping `LIKE` metacharacters.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Render the `ORDER BY` list. `id` is appended as a tie-breaker so paging is stable.
///
/// Column names come from [`SortField`], never from client text.
fn order_clause(ordering: &[OrderTerm]) -> String {
    let mut parts: Vec<String> = ordering
        .iter()
        .map(|term| {
            let direction = if term.descending { "DESC" } else { "ASC" };
            format!("{} {direction}", term.field.as_str())
        })
        .collect();
    if !ordering.iter().any(|term| term.field == SortField::Id) {
        parts.push("id ASC".to_string());
    }
    parts.join(", ")
}
