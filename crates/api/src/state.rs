use std::sync::Arc;

use todo_db::store::TodoStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Todo persistence (PostgreSQL or in-memory, chosen at startup).
    pub store: Arc<dyn TodoStore>,
    /// Server configuration (page sizes are read by list handlers).
    pub config: Arc<ServerConfig>,
}
