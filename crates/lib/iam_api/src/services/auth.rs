//! Authentication service: signup/signin/signout/refresh flows delegating
//! to `iam_core::auth::service`.

use iam_core::auth::service::AuthService;
use iam_core::models::auth::TokenPair;
use iam_core::models::user::User;
use iam_core::redact::{redact_email, redact_sensitive};
use tracing::{info, warn};

use super::blocking;
use crate::error::{AppError, AppResult};
use crate::models::SignupRequest;

/// Register a new user account.
pub async fn signup(auth: &AuthService, req: SignupRequest) -> AppResult<User> {
    let email = redact_email(&req.email);
    info!(
        email = %email,
        first_name = %req.first_name,
        last_name = %req.last_name,
        "signup request received"
    );

    let auth = auth.clone();
    let user = blocking(move || auth.signup(req.into()).map_err(AppError::from))
        .await
        .inspect_err(|e| warn!(email = %email, error = %e, "signup failed"))?;

    info!(email = %email, user_id = %user.id, "signup request successful");
    Ok(user)
}

/// Authenticate with email + password.
pub async fn signin(auth: &AuthService, email: &str, password: &str) -> AppResult<TokenPair> {
    let redacted = redact_email(email);
    info!(email = %redacted, "signin request received");

    let auth = auth.clone();
    let (email, password) = (email.to_string(), password.to_string());
    let pair = blocking(move || auth.signin(&email, &password).map_err(AppError::from))
        .await
        .inspect_err(|e| warn!(email = %redacted, error = %e, "signin failed"))?;

    info!(email = %redacted, "signin request successful");
    Ok(pair)
}

/// End the session for the access token in `authorization`.
///
/// Nothing is revoked; the token stays valid until it expires.
pub fn signout(auth: &AuthService, authorization: &str) -> AppResult<()> {
    info!(token = %redact_sensitive(authorization), "signout request received");
    auth.signout(authorization)
        .inspect_err(|e| warn!(error = %e, "signout failed"))?;
    info!("signout request successful");
    Ok(())
}

/// Exchange the refresh token in `authorization` for a new token pair.
pub fn refresh(auth: &AuthService, authorization: &str) -> AppResult<TokenPair> {
    info!(token = %redact_sensitive(authorization), "refresh request received");
    let pair = auth
        .refresh(authorization)
        .inspect_err(|e| warn!(error = %e, "refresh failed"))?;
    info!("refresh request successful");
    Ok(pair)
}
