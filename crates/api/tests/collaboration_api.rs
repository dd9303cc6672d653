//! HTTP-level tests for task comments and the activity log.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_project, create_task, delete_auth, get_auth, post_json_auth, register};
use serde_json::json;

#[tokio::test]
async fn comment_is_listed_with_one_comment_activity() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let project_id = create_project(&app, &alice, None).await;
    let task = create_task(&app, &alice, json!({ "title": "Fix login bug", "projectId": project_id })).await;
    let task_id = task["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/comments"),
        json!({ "content": "  Looks good to me  " }),
        &alice.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let comment = body_json(response).await["data"].clone();
    assert_eq!(comment["content"], "Looks good to me");
    assert_eq!(comment["authorName"], "Alice");

    let comments = get_auth(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/comments"),
        &alice.token,
    )
    .await;
    let comments = body_json(comments).await["data"].clone();
    assert_eq!(comments.as_array().unwrap().len(), 1);
    assert_eq!(comments[0]["id"], comment["id"]);

    let activity = get_auth(
        app,
        &format!("/api/v1/tasks/{task_id}/activities"),
        &alice.token,
    )
    .await;
    assert_eq!(activity.status(), StatusCode::OK);
    let activity = body_json(activity).await["data"].clone();
    let comment_entries: Vec<_> = activity
        .as_array()
        .unwrap()
        .iter()
        .filter(|a| a["kind"] == "comment")
        .collect();
    assert_eq!(comment_entries.len(), 1);
    assert_eq!(comment_entries[0]["userName"], "Alice");
}

#[tokio::test]
async fn blank_comment_is_rejected() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let project_id = create_project(&app, &alice, None).await;
    let task = create_task(&app, &alice, json!({ "title": "Fix login bug", "projectId": project_id })).await;
    let task_id = task["id"].as_i64().unwrap();

    let response = post_json_auth(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/comments"),
        json!({ "content": "   " }),
        &alice.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let comments = get_auth(app, &format!("/api/v1/tasks/{task_id}/comments"), &alice.token).await;
    assert!(body_json(comments).await["data"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn comments_require_a_live_task() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let project_id = create_project(&app, &alice, None).await;
    let task = create_task(&app, &alice, json!({ "title": "Old idea", "projectId": project_id })).await;
    let task_id = task["id"].as_i64().unwrap();
    delete_auth(app.clone(), &format!("/api/v1/tasks/{task_id}"), &alice.token).await;

    let on_trashed = post_json_auth(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/comments"),
        json!({ "content": "Still relevant?" }),
        &alice.token,
    )
    .await;
    assert_eq!(on_trashed.status(), StatusCode::NOT_FOUND);

    // History of a trashed task stays readable.
    let history = get_auth(
        app.clone(),
        &format!("/api/v1/tasks/{task_id}/comments"),
        &alice.token,
    )
    .await;
    assert_eq!(history.status(), StatusCode::OK);

    let missing = get_auth(app, "/api/v1/tasks/999/activities", &alice.token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}
