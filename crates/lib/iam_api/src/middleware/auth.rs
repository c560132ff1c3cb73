//! Authentication middleware: Bearer token extraction and JWT verification.

use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use iam_core::models::auth::Claims;

use crate::AppState;
use crate::error::AppError;

/// Claims of the verified access token, stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub Claims);

/// The raw `Authorization` header value.
pub fn authorization_header(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))
}

/// Axum middleware: extracts `Authorization: Bearer <token>`, verifies it is a
/// valid access token, and injects `AuthenticatedUser` into request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header = authorization_header(request.headers())?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization scheme".into()))?;

    let claims = state.auth.authenticate(token)?;

    request.extensions_mut().insert(AuthenticatedUser(claims));

    Ok(next.run(request).await)
}
