//! HTTP-level tests for projects and the membership registry.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_project, delete_auth, get_auth, post_json_auth, put_json_auth, register,
};
use serde_json::json;

#[tokio::test]
async fn owner_and_team_leader_become_members() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let bob = register(&app, "Bob").await;

    let project_id = create_project(&app, &alice, Some(bob.id)).await;

    let response = get_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/members"),
        &alice.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let members = body_json(response).await["data"].clone();
    let members = members.as_array().unwrap();
    assert_eq!(members.len(), 2);

    let owner = members.iter().find(|m| m["userId"] == alice.id).unwrap();
    assert_eq!(owner["isOwner"], true);
    let leader = members.iter().find(|m| m["userId"] == bob.id).unwrap();
    assert_eq!(leader["isTeamLeader"], true);

    let listed = get_auth(app, "/api/v1/projects", &bob.token).await;
    let listed = body_json(listed).await["data"].clone();
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["id"], project_id);
}

#[tokio::test]
async fn project_name_is_required() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;

    let response = post_json_auth(
        app,
        "/api/v1/projects",
        json!({ "name": "   " }),
        &alice.token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn adding_a_member_twice_is_idempotent() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let carol = register(&app, "Carol").await;
    let project_id = create_project(&app, &alice, None).await;
    let uri = format!("/api/v1/projects/{project_id}/members");

    let first = post_json_auth(app.clone(), &uri, json!({ "userId": carol.id }), &alice.token).await;
    assert_eq!(first.status(), StatusCode::CREATED);
    let first = body_json(first).await["data"].clone();

    let second = post_json_auth(app.clone(), &uri, json!({ "userId": carol.id }), &alice.token).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await["data"].clone();
    assert_eq!(first["id"], second["id"]);
    assert_eq!(first["createdAt"], second["createdAt"]);

    let members = get_auth(app, &uri, &alice.token).await;
    assert_eq!(body_json(members).await["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn adding_an_unknown_user_is_rejected() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let project_id = create_project(&app, &alice, None).await;

    let response = post_json_auth(
        app,
        &format!("/api/v1/projects/{project_id}/members"),
        json!({ "userId": 4242 }),
        &alice.token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn team_leader_may_manage_members_but_others_may_not() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let bob = register(&app, "Bob").await;
    let carol = register(&app, "Carol").await;
    let dave = register(&app, "Dave").await;
    let project_id = create_project(&app, &alice, Some(bob.id)).await;
    let uri = format!("/api/v1/projects/{project_id}/members");

    let by_leader = post_json_auth(app.clone(), &uri, json!({ "userId": carol.id }), &bob.token).await;
    assert_eq!(by_leader.status(), StatusCode::CREATED);

    let by_member = post_json_auth(app.clone(), &uri, json!({ "userId": dave.id }), &carol.token).await;
    assert_eq!(by_member.status(), StatusCode::FORBIDDEN);
    assert_eq!(body_json(by_member).await["code"], "FORBIDDEN");

    let removal = delete_auth(
        app.clone(),
        &format!("{uri}/{}", bob.id),
        &carol.token,
    )
    .await;
    assert_eq!(removal.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn owner_cannot_be_removed() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let bob = register(&app, "Bob").await;
    let project_id = create_project(&app, &alice, Some(bob.id)).await;

    let response = delete_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/members/{}", alice.id),
        &bob.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let members = get_auth(
        app,
        &format!("/api/v1/projects/{project_id}/members"),
        &alice.token,
    )
    .await;
    assert_eq!(body_json(members).await["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn removing_a_non_member_succeeds() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let carol = register(&app, "Carol").await;
    let project_id = create_project(&app, &alice, None).await;
    let uri = format!("/api/v1/projects/{project_id}/members/{}", carol.id);

    post_json_auth(
        app.clone(),
        &format!("/api/v1/projects/{project_id}/members"),
        json!({ "userId": carol.id }),
        &alice.token,
    )
    .await;

    let first = delete_auth(app.clone(), &uri, &alice.token).await;
    assert_eq!(first.status(), StatusCode::NO_CONTENT);
    let second = delete_auth(app, &uri, &alice.token).await;
    assert_eq!(second.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn non_members_cannot_read_a_project() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let eve = register(&app, "Eve").await;
    let project_id = create_project(&app, &alice, None).await;

    let response = get_auth(app.clone(), &format!("/api/v1/projects/{project_id}"), &eve.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let missing = get_auth(app, "/api/v1/projects/999", &eve.token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn owner_updates_and_deletes_the_project() {
    let app = common::build_test_app(common::test_pool().await);
    let alice = register(&app, "Alice").await;
    let bob = register(&app, "Bob").await;
    let project_id = create_project(&app, &alice, Some(bob.id)).await;
    let uri = format!("/api/v1/projects/{project_id}");

    let by_leader = put_json_auth(app.clone(), &uri, json!({ "name": "Hijacked" }), &bob.token).await;
    assert_eq!(by_leader.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(
        app.clone(),
        &uri,
        json!({ "name": "Website v2", "teamLeaderId": null }),
        &alice.token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let project = body_json(response).await["data"].clone();
    assert_eq!(project["name"], "Website v2");
    assert!(project["teamLeaderId"].is_null());

    let by_bob = delete_auth(app.clone(), &uri, &bob.token).await;
    assert_eq!(by_bob.status(), StatusCode::FORBIDDEN);

    let deleted = delete_auth(app.clone(), &uri, &alice.token).await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let gone = get_auth(app, &uri, &alice.token).await;
    assert_eq!(gone.status(), StatusCode::NOT_FOUND);
}
