//! Integration tests for the `/v1/todo/` collection.

mod common;

use axum::http::StatusCode;
use common::{body_json, delete, get, patch_json, post_json, put_json, seed, titles};
use serde_json::json;

const V1: &str = "/v1/todo/";

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[tokio::test]
async fn single_object_creates_one_todo() {
    let app = common::build_test_app();

    let response = post_json(&app, V1, &json!({"title": "Buy milk", "body": "", "status": 0})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert!(created.is_object());
    assert_eq!(created["title"], "Buy milk");
}

#[tokio::test]
async fn array_creates_every_element_in_order() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        V1,
        &json!([
            {"title": "a", "body": "", "status": 0},
            {"title": "b", "body": "x", "status": 1}
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let created = created.as_array().unwrap();
    assert_eq!(created.len(), 2);
    assert_eq!(created[0]["title"], "a");
    assert_eq!(created[1]["title"], "b");
    assert_ne!(created[0]["id"], created[1]["id"]);

    let list = body_json(get(&app, V1).await).await;
    assert_eq!(list["count"], 2);
}

#[tokio::test]
async fn batch_with_one_invalid_element_persists_nothing() {
    let app = common::build_test_app();

    let response = post_json(
        &app,
        V1,
        &json!([
            {"title": "ok", "body": "", "status": 0},
            {"title": "bad", "body": "", "status": -1}
        ]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"][0], json!({}));
    assert_eq!(json["fields"][1]["status"], json!(["Value cannot be negative"]));

    let list = body_json(get(&app, V1).await).await;
    assert_eq!(list["count"], 0);
}

#[tokio::test]
async fn empty_batch_creates_nothing() {
    let app = common::build_test_app();

    let response = post_json(&app, V1, &json!([])).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn batch_element_that_is_not_an_object_is_reported() {
    let app = common::build_test_app();

    let response = post_json(&app, V1, &json!([1])).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert!(json["fields"][0]["non_field_errors"].is_array());
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

#[tokio::test]
async fn patch_answers_created() {
    let app = common::build_test_app();
    let created = seed(&app, V1, "t", "b", 0).await;
    let uri = format!("{V1}{}/", created["id"]);

    let response = patch_json(&app, &uri, &json!({"status": 4})).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let updated = body_json(response).await;
    assert_eq!(updated["status"], 4);
    assert_eq!(updated["title"], "t");
}

#[tokio::test]
async fn put_answers_ok() {
    let app = common::build_test_app();
    let created = seed(&app, V1, "t", "b", 0).await;
    let uri = format!("{V1}{}/", created["id"]);

    let response = put_json(&app, &uri, &json!({"title": "u", "body": "v", "status": 1})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["title"], "u");
}

#[tokio::test]
async fn delete_removes_record() {
    let app = common::build_test_app();
    let created = seed(&app, V1, "t", "b", 0).await;
    let uri = format!("{V1}{}/", created["id"]);

    assert_eq!(delete(&app, &uri).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(get(&app, &uri).await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn collections_share_one_store() {
    let app = common::build_test_app();
    let created = seed(&app, V1, "shared", "", 0).await;

    let response = get(&app, &format!("/v2/todo/{}/", created["id"])).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

#[tokio::test]
async fn ordering_by_body_is_supported() {
    let app = common::build_test_app();
    seed(&app, V1, "first", "z", 0).await;
    seed(&app, V1, "second", "a", 0).await;

    let list = body_json(get(&app, "/v1/todo/?ordering=body").await).await;
    assert_eq!(titles(&list), vec!["second", "first"]);

    let list = body_json(get(&app, "/v1/todo/?ordering=-title").await).await;
    assert_eq!(titles(&list), vec!["second", "first"]);
}

#[tokio::test]
async fn search_parameter_is_ignored() {
    let app = common::build_test_app();
    seed(&app, V1, "Buy milk", "", 0).await;
    seed(&app, V1, "Walk dog", "", 0).await;

    let list = body_json(get(&app, "/v1/todo/?search=milk").await).await;
    assert_eq!(list["count"], 2);
}
