//! Request field validation.

use iam_core::auth::password::MAX_PASSWORD_BYTES;

use crate::error::{AppError, AppResult};

const NAME_MAX_LEN: usize = 50;
const PASSWORD_MIN_LEN: usize = 8;
const PASSWORD_MAX_LEN: usize = 128;

/// 1-50 characters, ASCII letters and whitespace only.
pub fn validate_name(field: &str, value: &str) -> AppResult<()> {
    let len = value.chars().count();
    if len == 0 || len > NAME_MAX_LEN {
        return Err(AppError::Validation(format!(
            "{field} must be between 1 and {NAME_MAX_LEN} characters"
        )));
    }
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} must not be blank")));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_ascii_whitespace())
    {
        return Err(AppError::Validation(format!(
            "{field} may only contain letters and spaces"
        )));
    }
    Ok(())
}

/// A single `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> AppResult<()> {
    let invalid = || AppError::Validation("email must be a valid email address".into());

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}

/// 8-128 characters, and no more than bcrypt's 72-byte input limit.
pub fn validate_password(field: &str, value: &str) -> AppResult<()> {
    let len = value.chars().count();
    if !(PASSWORD_MIN_LEN..=PASSWORD_MAX_LEN).contains(&len) {
        return Err(AppError::Validation(format!(
            "{field} must be between {PASSWORD_MIN_LEN} and {PASSWORD_MAX_LEN} characters"
        )));
    }
    if value.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::Validation(format!(
            "{field} must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }
    Ok(())
}
