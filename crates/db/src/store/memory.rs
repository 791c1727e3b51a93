use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use todo_core::listing::{OrderTerm, SortField, TodoFilter, TodoListQuery};
use todo_core::types::DbId;

use super::{StoreResult, TodoStore};
use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

/// [`TodoStore`] holding records in process memory.
///
/// Every operation holds the lock for its whole duration, so each one is
/// atomic with respect to the others. Records are lost on restart.
///
/// Text columns sort by byte order (`String::cmp`), not by a database
/// collation, so mixed-case titles may order differently than in PostgreSQL.
#[derive(Clone, Default)]
pub struct InMemoryTodoStore {
    inner: Arc<RwLock<Inner>>,
}

#[derive(Default)]
struct Inner {
    last_id: DbId,
    rows: BTreeMap<DbId, Todo>,
}

impl Inner {
    fn insert(&mut self, input: &CreateTodo) -> Todo {
        self.last_id += 1;
        let now = Utc::now();
        let todo = Todo {
            id: self.last_id,
            title: input.title.clone(),
            body: input.body.clone(),
            status: input.status,
            created_at: now,
            updated_at: now,
            done_at: None,
            deleted_at: None,
        };
        self.rows.insert(todo.id, todo.clone());
        todo
    }
}

impl InMemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for InMemoryTodoStore {
    async fn create(&self, input: &CreateTodo) -> StoreResult<Todo> {
        Ok(self.inner.write().await.insert(input))
    }

    async fn create_many(&self, inputs: &[CreateTodo]) -> StoreResult<Vec<Todo>> {
        let mut inner = self.inner.write().await;
        Ok(inputs.iter().map(|input| inner.insert(input)).collect())
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Todo>> {
        Ok(self.inner.read().await.rows.get(&id).cloned())
    }

    async fn count(&self, filter: &TodoFilter) -> StoreResult<i64> {
        let inner = self.inner.read().await;
        let count = inner
            .rows
            .values()
            .filter(|todo| filter.matches(&todo.title, &todo.body))
            .count();
        Ok(i64::try_from(count).unwrap_or(i64::MAX))
    }

    async fn list(&self, query: &TodoListQuery) -> StoreResult<Vec<Todo>> {
        let inner = self.inner.read().await;
        let mut matched: Vec<&Todo> = inner
            .rows
            .values()
            .filter(|todo| query.filter.matches(&todo.title, &todo.body))
            .collect();
        matched.sort_by(|a, b| compare(a, b, &query.ordering));

        let offset = usize::try_from(query.offset).unwrap_or(0);
        let limit = usize::try_from(query.limit).unwrap_or(0);
        Ok(matched
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn update(&self, id: DbId, input: &UpdateTodo) -> StoreResult<Option<Todo>> {
        let mut inner = self.inner.write().await;
        let Some(todo) = inner.rows.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(title) = &input.title {
            todo.title = title.clone();
        }
        if let Some(body) = &input.body {
            todo.body = body.clone();
        }
        if let Some(status) = input.status {
            todo.status = status;
        }
        todo.updated_at = Utc::now().max(todo.created_at);
        Ok(Some(todo.clone()))
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        Ok(self.inner.write().await.rows.remove(&id).is_some())
    }

    async fn health_check(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Compare two records by the ordering terms, falling back to `id`.
fn compare(a: &Todo, b: &Todo, ordering: &[OrderTerm]) -> Ordering {
    ordering
        .iter()
        .map(|term| {
            let ord = match term.field {
                SortField::Id => a.id.cmp(&b.id),
                SortField::Title => a.title.cmp(&b.title),
                SortField::Body => a.body.cmp(&b.body),
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };
            if term.descending {
                ord.reverse()
            } else {
                ord
            }
        })
        .find(|ord| ord.is_ne())
        .unwrap_or_else(|| a.id.cmp(&b.id))
}
