//! The persistence seam used by the API layer.

mod memory;
mod postgres;

use async_trait::async_trait;
use todo_core::listing::{TodoFilter, TodoListQuery};
use todo_core::types::DbId;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};

pub use memory::InMemoryTodoStore;
pub use postgres::PgTodoStore;

/// Store operations return the driver error type so both implementations
/// surface failures the same way.
pub type StoreResult<T> = Result<T, sqlx::Error>;

/// Typed CRUD and query operations over todo records.
///
/// Implementations own the records exclusively; callers only ever receive
/// copies.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Persist one record and return it with its assigned `id` and timestamps.
    async fn create(&self, input: &CreateTodo) -> StoreResult<Todo>;

    /// Persist several records atomically, returning them in input order.
    async fn create_many(&self, inputs: &[CreateTodo]) -> StoreResult<Vec<Todo>>;

    async fn find_by_id(&self, id: DbId) -> StoreResult<Option<Todo>>;

    /// Number of records passing `filter`.
    async fn count(&self, filter: &TodoFilter) -> StoreResult<i64>;

    /// One page of records passing the filter, in the requested order.
    async fn list(&self, query: &TodoListQuery) -> StoreResult<Vec<Todo>>;

    /// Apply the supplied fields and bump `updated_at`.
    ///
    /// Returns `None` if the record does not exist.
    async fn update(&self, id: DbId, input: &UpdateTodo) -> StoreResult<Option<Todo>>;

    /// Permanently remove a record. Returns `false` if it did not exist.
    async fn delete(&self, id: DbId) -> StoreResult<bool>;

    /// Check the backing store is reachable.
    async fn health_check(&self) -> StoreResult<()>;
}
