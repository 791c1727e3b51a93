//! Domain rules for the todo record service.
//!
//! This crate has no I/O. It owns the record-level types, the error taxonomy,
//! request payload decoding (including the writable-field allow-list), status
//! validation, and the list query grammar shared by both API variants.

pub mod error;
pub mod listing;
pub mod todo;
pub mod types;
pub mod validation;
