//! Domain model structs and DTOs.
//!
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - The create and update DTOs, decoded and validated in `todo_core`

pub mod todo;
