//! HTTP integration tests over the PostgreSQL store.
//!
//! Each test gets a fresh database with the `todo-db` migrations applied.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, seed, titles};
use serde_json::json;
use sqlx::PgPool;

#[sqlx::test(migrations = "../db/migrations")]
async fn health_reports_store_healthy(pool: PgPool) {
    let app = common::build_pg_test_app(pool);

    let json = body_json(get(&app, "/health").await).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["store_healthy"], true);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_patch_and_delete(pool: PgPool) {
    let app = common::build_pg_test_app(pool);
    let created = seed(&app, "/v2/todo/", "Buy milk", "2%", 0).await;
    let uri = format!("/v2/todo/{}/", created["id"]);

    let response = patch_json(&app, &uri, &json!({"status": 1})).await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], 1);
    assert_eq!(updated["title"], "Buy milk");
    assert_eq!(updated["body"], "2%");
    assert_eq!(updated["created_at"], created["created_at"]);

    assert_eq!(delete(&app, &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn batch_is_all_or_nothing(pool: PgPool) {
    let app = common::build_pg_test_app(pool);

    let response = post_json(
        &app,
        "/v1/todo/",
        &json!([
            {"title": "ok", "body": "", "status": 0},
            {"title": "bad", "body": "", "status": -1}
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(get(&app, "/v1/todo/").await).await["count"], 0);

    let response = post_json(
        &app,
        "/v1/todo/",
        &json!([
            {"title": "a", "body": "", "status": 0},
            {"title": "b", "body": "", "status": 1}
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created.as_array().unwrap().len(), 2);

    let list = body_json(get(&app, "/v1/todo/").await).await;
    assert_eq!(list["count"], 2);
    assert_eq!(titles(&list), vec!["a", "b"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn search_and_ordering(pool: PgPool) {
    let app = common::build_pg_test_app(pool);
    seed(&app, "/v2/todo/", "buy milk", "", 0).await;
    seed(&app, "/v2/todo/", "groceries", "MILK and eggs", 0).await;
    seed(&app, "/v2/todo/", "50% off", "", 0).await;

    let list = body_json(get(&app, "/v2/todo/?search=milk&ordering=-title").await).await;
    assert_eq!(list["count"], 2);
    assert_eq!(titles(&list), vec!["groceries", "buy milk"]);

    let list = body_json(get(&app, "/v2/todo/?search=50%25").await).await;
    assert_eq!(titles(&list), vec!["50% off"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn pagination_over_database(pool: PgPool) {
    let app = common::build_pg_test_app(pool);
    for i in 0..3 {
        seed(&app, "/v2/todo/", &format!("t{i}"), "", 0).await;
    }

    let list = body_json(get(&app, "/v2/todo/?page_size=2&page=2").await).await;
    assert_eq!(list["count"], 3);
    assert_eq!(titles(&list), vec!["t2"]);
    assert_eq!(list["previous"], "/v2/todo/?page_size=2");

    assert_eq!(
        get(&app, "/v2/todo/?page_size=2&page=3").await.status(),
        StatusCode::NOT_FOUND
    );
}
