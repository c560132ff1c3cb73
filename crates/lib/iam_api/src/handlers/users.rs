//! User management handlers. All routes require an access token.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use tracing::debug;

use crate::AppState;
use crate::error::AppResult;
use crate::middleware::auth::AuthenticatedUser;
use crate::models::{CreateUserRequest, ListUsersResponse, UserResponse};
use crate::services::users;

/// `GET /users`: list all users.
pub async fn list_users_handler(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
) -> AppResult<Json<ListUsersResponse>> {
    debug!(caller = %caller.0.sub, "listing users");
    let all = users::list(&state.auth)?;
    Ok(Json(ListUsersResponse::new(
        "User's list fetched successfully",
        all,
    )))
}

/// `GET /users/{id}`: fetch one user.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserResponse>> {
    let user = users::get_by_id(&state.auth, &id)?;
    Ok(Json(UserResponse::new("User fetched successfully", user)))
}

/// `POST /users`: create a user.
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    body.validate()?;
    let user = users::create(&state.auth, body).await?;
    Ok((
        StatusCode::CREATED,
        Json(UserResponse::new("User created successfully", user)),
    ))
}
