//! Authentication logic.
//!
//! Provides password hashing, JWT issuance/verification and the
//! signup/signin/signout workflow that the API layer drives.

pub mod jwt;
pub mod password;
pub mod service;

use thiserror::Error;

use crate::store::StoreError;
use self::jwt::TokenError;

/// Authentication workflow errors.
///
/// `InvalidToken` deliberately carries no detail about which check failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Password and confirmation password do not match")]
    PasswordMismatch,

    #[error("Password must be at most 72 bytes")]
    PasswordTooLong,

    #[error("Email address is already registered")]
    EmailExists,

    #[error("User account not found")]
    NotFound,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::AlreadyExists(_) => AuthError::EmailExists,
            StoreError::NotFound(_) => AuthError::NotFound,
            StoreError::PasswordTooLong => AuthError::PasswordTooLong,
            StoreError::Internal(msg) => AuthError::Internal(msg),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Invalid => AuthError::InvalidToken,
            TokenError::Signing(msg) => AuthError::Internal(msg),
        }
    }
}
