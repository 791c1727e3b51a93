//! Request handlers.
//!
//! `todo_v2` is the full-featured collection (search, ordering, pagination);
//! `todo_v1` is the hand-rolled variant with batch create. Both delegate to
//! the shared operations in `todo`, which call the store and map errors via
//! [`crate::error::AppError`].

pub mod todo;
pub mod todo_v1;
pub mod todo_v2;
