//! Authentication request handlers.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::authorization_header;
use crate::models::{SigninRequest, SignupRequest, SuccessResponse, TokenResponse};
use crate::services::auth;

/// `POST /auth/signup`: create a new user account.
pub async fn signup_handler(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<SuccessResponse>)> {
    body.validate()?;
    auth::signup(&state.auth, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(SuccessResponse::new("User signed up successfully")),
    ))
}

/// `POST /auth/signin`: authenticate with email + password.
pub async fn signin_handler(
    State(state): State<AppState>,
    Json(body): Json<SigninRequest>,
) -> AppResult<Json<TokenResponse>> {
    body.validate()?;
    let pair = auth::signin(&state.auth, &body.email, &body.password).await?;
    Ok(Json(TokenResponse::new(
        "Signed in user successfully",
        pair.into(),
    )))
}

/// `POST /auth/signout`: end the session of the presented access token.
pub async fn signout_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<SuccessResponse>> {
    let authorization = authorization_header(&headers)?;
    auth::signout(&state.auth, authorization)?;
    Ok(Json(SuccessResponse::new("Signed out successfully")))
}

/// `POST /auth/refresh`: exchange a refresh token for a new token pair.
pub async fn refresh_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> AppResult<Json<TokenResponse>> {
    let authorization = authorization_header(&headers)?;
    let pair = auth::refresh(&state.auth, authorization)?;
    Ok(Json(TokenResponse::new(
        "Tokens refreshed successfully",
        pair.into(),
    )))
}
