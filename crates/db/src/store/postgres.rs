use async_trait::async_trait;
use todo_core::listing::{TodoFilter, TodoListQuery};
use todo_core::types::DbId;

use super::{StoreResult, TodoStore};
use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::repositories::TodoRepo;
use crate::DbPool;

/// [`TodoStore`] backed by PostgreSQL through [`TodoRepo`].
#[derive(Clone)]
pub struct PgTodoStore {
    pool: DbPool,
}

impl PgTodoStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn create(&self, input: &CreateTodo) -> StoreResult<Todo> {
        TodoRepo::create(&self.pool, input).await
    }

    async fn create_many(&self, inputs: &[CreateTodo]) -> StoreResult<Vec<Todo>> {
        TodoRepo::create_many(&self.pool, inputs).await
    }

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Todo>> {
        TodoRepo::find_by_id(&self.pool, id).await
    }

    async fn count(&self, filter: &TodoFilter) -> StoreResult<i64> {
        TodoRepo::count(&self.pool, filter).await
    }

    async fn list(&self, query: &TodoListQuery) -> StoreResult<Vec<Todo>> {
        TodoRepo::list(&self.pool, query).await
    }

    async fn update(&self, id: DbId, input: &UpdateTodo) -> StoreResult<Option<Todo>> {
        TodoRepo::update(&self.pool, id, input).await
    }

    async fn delete(&self, id: DbId) -> StoreResult<bool> {
        TodoRepo::hard_delete(&self.pool, id).await
    }

    async fn health_check(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await
    }
}
