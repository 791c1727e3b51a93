//! Todo entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::types::{DbId, Timestamp};

pub use todo_core::todo::{CreateTodo, UpdateTodo};

/// A row from the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Todo {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub status: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    /// Never set by the service.
    pub done_at: Option<Timestamp>,
    /// Never set by the service; delete is permanent.
    pub deleted_at: Option<Timestamp>,
}
