//! API request/response models.
//!
//! Wire shapes use camelCase and wrap payloads in a `{success, message, data}`
//! envelope. Domain types live in `iam_core::models`.

use iam_core::auth::service::SignupInput;
use iam_core::models::auth::TokenPair;
use iam_core::models::user::{CreateUser, User};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::validation::{validate_email, validate_name, validate_password};

/// Error body returned for every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// `POST /auth/signup` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignupRequest {
    pub fn validate(&self) -> AppResult<()> {
        validate_name("firstName", &self.first_name)?;
        validate_name("lastName", &self.last_name)?;
        validate_email(&self.email)?;
        validate_password("password", &self.password)?;
        validate_password("confirmPassword", &self.confirm_password)
    }
}

impl From<SignupRequest> for SignupInput {
    fn from(req: SignupRequest) -> Self {
        SignupInput {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
        }
    }
}

/// `POST /auth/signin` body.
#[derive(Debug, Clone, Deserialize)]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

impl SigninRequest {
    pub fn validate(&self) -> AppResult<()> {
        validate_email(&self.email)?;
        validate_password("password", &self.password)
    }
}

/// `POST /users` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(&self) -> AppResult<()> {
        validate_name("firstName", &self.first_name)?;
        validate_name("lastName", &self.last_name)?;
        validate_email(&self.email)?;
        validate_password("password", &self.password)
    }
}

impl From<CreateUserRequest> for CreateUser {
    fn from(req: CreateUserRequest) -> Self {
        CreateUser {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Body-less success envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
    pub message: String,
}

impl SuccessResponse {
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}

/// Issued tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPayload {
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<TokenPair> for TokenPayload {
    fn from(pair: TokenPair) -> Self {
        Self {
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
            token_type: pair.token_type,
            expires_in: pair.expires_in,
        }
    }
}

/// Success envelope carrying `data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
}

impl<T> DataResponse<T> {
    pub fn new(message: &str, data: T) -> Self {
        Self {
            success: true,
            message: message.to_string(),
            data,
        }
    }
}

pub type TokenResponse = DataResponse<TokenPayload>;
pub type UserResponse = DataResponse<User>;
pub type ListUsersResponse = DataResponse<Vec<User>>;

/// `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub users: usize,
}
