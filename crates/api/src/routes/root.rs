use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Links to every registered collection, keyed by prefix.
#[derive(Serialize)]
pub struct ApiRoot {
    #[serde(rename = "v1/todo")]
    pub v1_todo: &'static str,
    #[serde(rename = "v2/todo")]
    pub v2_todo: &'static str,
}

/// GET / -- lists the collection endpoints.
async fn api_root() -> Json<ApiRoot> {
    Json(ApiRoot {
        v1_todo: super::todo::V1_PREFIX,
        v2_todo: super::todo::V2_PREFIX,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(api_root))
}
