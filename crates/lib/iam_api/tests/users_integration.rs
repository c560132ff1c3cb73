//! Integration tests: user routes behind the access-token middleware.

mod common;

use axum::http::StatusCode;
use common::{app, send, signed_in};
use serde_json::json;

#[tokio::test]
async fn users_routes_require_a_token() {
    let app = app();
    let (status, _) = send(&app, "GET", "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/users", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_token_is_not_accepted_for_users_routes() {
    let app = app();
    let (_, refresh) = signed_in(&app, "a@b.com").await;
    let (status, _) = send(&app, "GET", "/users", Some(refresh.as_str()), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_get_and_create_users() {
    let app = app();
    let (access, _) = signed_in(&app, "a@b.com").await;

    let (status, json) = send(&app, "GET", "/users", Some(access.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    let list = json["data"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["email"], "a@b.com");
    assert_eq!(list[0]["status"], "active");
    assert!(list[0].get("passwordHash").is_none());

    let (status, created) = send(
        &app,
        "POST",
        "/users",
        Some(access.as_str()),
        Some(json!({
            "firstName": "John",
            "lastName": "Doe",
            "email": "john@example.com",
            "password": "secure-password",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["message"], "User created successfully");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/users/{id}"), Some(access.as_str()), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);

    let (_, json) = send(&app, "GET", "/users", Some(access.as_str()), None).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn create_user_with_taken_email_is_conflict() {
    let app = app();
    let (access, _) = signed_in(&app, "a@b.com").await;
    let (status, _) = send(
        &app,
        "POST",
        "/users",
        Some(access.as_str()),
        Some(json!({
            "firstName": "A",
            "lastName": "B",
            "email": "a@b.com",
            "password": "pw123456",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn get_unknown_user_is_not_found() {
    let app = app();
    let (access, _) = signed_in(&app, "a@b.com").await;

    let unknown = "4d2efde6-448a-4c26-a69a-26c2f9a6de4a";
    let (status, json) = send(&app, "GET", &format!("/users/{unknown}"), Some(access.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["message"], "User account not found");

    let (status, _) = send(&app, "GET", "/users/not-a-uuid", Some(access.as_str()), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
