//! Shared helpers for router-level integration tests.

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::Duration;
use iam_api::AppState;
use iam_api::config::ApiConfig;
use iam_core::config::AuthConfig;
use serde_json::Value;
use tower::ServiceExt;

pub fn test_config() -> ApiConfig {
    let mut auth = AuthConfig::new("iam-test", "iam-api-test", b"integration-test-secret");
    auth.access_token_ttl = Duration::minutes(5);
    ApiConfig {
        bind_addr: "127.0.0.1:0".into(),
        auth,
        bcrypt_cost: 4,
        request_logging: false,
    }
}

pub fn app() -> Router {
    let state = AppState::new(test_config()).expect("valid test config");
    iam_api::router(state)
}

/// Send a request and return the status with the parsed JSON body (`Null` if empty).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    bearer: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = bearer {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let resp = app.clone().oneshot(req).await.expect("request");
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("read body");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

pub fn signup_body(email: &str) -> Value {
    serde_json::json!({
        "firstName": "A",
        "lastName": "B",
        "email": email,
        "password": "pw123456",
        "confirmPassword": "pw123456",
    })
}

/// Sign up and sign in `email`, returning `(access_token, refresh_token)`.
pub async fn signed_in(app: &Router, email: &str) -> (String, String) {
    let (status, _) = send(app, "POST", "/auth/signup", None, Some(signup_body(email))).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, json) = send(
        app,
        "POST",
        "/auth/signin",
        None,
        Some(serde_json::json!({"email": email, "password": "pw123456"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    (
        json["data"]["accessToken"].as_str().unwrap().to_string(),
        json["data"]["refreshToken"].as_str().unwrap().to_string(),
    )
}
