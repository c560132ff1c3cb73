//! User service: list/get/create over the shared user store.

use iam_core::auth::service::AuthService;
use iam_core::models::user::User;
use iam_core::redact::redact_email;
use tracing::{info, warn};
use uuid::Uuid;

use super::blocking;
use crate::error::{AppError, AppResult};
use crate::models::CreateUserRequest;

const USER_NOT_FOUND: &str = "User account not found";

/// All users, in no particular order.
pub fn list(auth: &AuthService) -> AppResult<Vec<User>> {
    info!("list users request received");
    let users = auth
        .store()
        .list()
        .inspect_err(|e| warn!(error = %e, "list users failed"))?;
    info!(total_users = users.len(), "list users request successful");
    Ok(users)
}

/// A single user by ID. IDs that are not UUIDs cannot exist, so they are not found.
pub fn get_by_id(auth: &AuthService, id: &str) -> AppResult<User> {
    info!(user_id = %id, "get user request received");
    if Uuid::parse_str(id).is_err() {
        warn!(user_id = %id, "get user failed: malformed id");
        return Err(AppError::NotFound(USER_NOT_FOUND.into()));
    }
    let user = auth.store().query_by_id(id).map_err(|e| {
        warn!(user_id = %id, error = %e, "get user failed");
        AppError::from(e)
    })?;
    info!(user_id = %id, "get user request successful");
    Ok(user)
}

/// Create a user directly (no password confirmation step).
pub async fn create(auth: &AuthService, req: CreateUserRequest) -> AppResult<User> {
    let email = redact_email(&req.email);
    info!(email = %email, "create user request received");

    let store = auth.store().clone();
    let user = blocking(move || store.create(req.into()).map_err(AppError::from))
        .await
        .inspect_err(|e| warn!(email = %email, error = %e, "create user failed"))?;

    info!(email = %email, user_id = %user.id, "create user request successful");
    Ok(user)
}
