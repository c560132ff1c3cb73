//! Signup, signin and signout on top of a [`UserStore`] and a [`TokenManager`].
//!
//! Signout does not revoke anything: a signed-out access token stays valid
//! until it expires, so repeated signouts with the same token all succeed.

use std::sync::Arc;

use super::AuthError;
use super::jwt::TokenManager;
use super::password::verify_password;
use crate::models::auth::{Claims, TokenKind, TokenPair};
use crate::models::user::{CreateUser, User};
use crate::store::UserStore;

const TOKEN_TYPE_BEARER: &str = "Bearer";

/// Signup input.
#[derive(Debug, Clone)]
pub struct SignupInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Authentication workflow. Cheap to clone; clones share the same store.
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn UserStore>,
    tokens: TokenManager,
}

impl AuthService {
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenManager) -> Self {
        Self { store, tokens }
    }

    /// The user store this service reads and writes.
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// The token manager this service issues and checks tokens with.
    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Register a new user.
    pub fn signup(&self, input: SignupInput) -> Result<User, AuthError> {
        if input.password != input.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }

        let user = self.store.create(CreateUser {
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
        })?;
        Ok(user)
    }

    /// Check credentials and issue an access/refresh token pair.
    ///
    /// An unknown email is `NotFound`; a wrong password is `InvalidCredentials`.
    pub fn signin(&self, email: &str, password: &str) -> Result<TokenPair, AuthError> {
        let creds = self.store.query_credentials_by_email(email)?;
        if !verify_password(password, &creds.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }
        self.issue_pair(&creds.user.id)
    }

    /// End a session presented as `Bearer <access token>`.
    ///
    /// Refresh tokens are refused. The subject must still exist.
    pub fn signout(&self, bearer: &str) -> Result<(), AuthError> {
        let claims = self.tokens.parse(bearer)?;
        if claims.token_type != TokenKind::Access {
            return Err(AuthError::InvalidToken);
        }
        self.store.query_by_id(&claims.sub)?;
        Ok(())
    }

    /// Exchange `Bearer <refresh token>` for a fresh token pair.
    pub fn refresh(&self, bearer: &str) -> Result<TokenPair, AuthError> {
        let claims = self.tokens.parse(bearer)?;
        if claims.token_type != TokenKind::Refresh {
            return Err(AuthError::InvalidToken);
        }
        let user = self.store.query_by_id(&claims.sub)?;
        self.issue_pair(&user.id)
    }

    /// Verify a raw access token (no scheme prefix) for a protected request.
    pub fn authenticate(&self, token: &str) -> Result<Claims, AuthError> {
        let claims = self.tokens.verify(token)?;
        if claims.token_type != TokenKind::Access {
            return Err(AuthError::InvalidToken);
        }
        Ok(claims)
    }

    fn issue_pair(&self, subject: &str) -> Result<TokenPair, AuthError> {
        let access_token = self
            .tokens
            .generate(&self.tokens.standard_claims(subject, TokenKind::Access))?;
        let refresh_token = self
            .tokens
            .generate(&self.tokens.standard_claims(subject, TokenKind::Refresh))?;

        Ok(TokenPair {
            access_token,
            refresh_token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.tokens.lifetime_secs(TokenKind::Access),
        })
    }
}
