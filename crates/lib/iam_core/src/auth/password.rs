//! Password hashing via bcrypt.
//!
//! bcrypt only looks at the first 72 bytes of its input. Longer passwords are
//! refused at hash time rather than silently truncated, so two passwords that
//! share a 72-byte prefix can never verify against each other.

use bcrypt::BcryptError;

use super::AuthError;

/// Default bcrypt cost factor.
pub const BCRYPT_COST: u32 = 10;

/// Smallest and largest cost bcrypt accepts.
pub const BCRYPT_COST_RANGE: std::ops::RangeInclusive<u32> = 4..=31;

/// Longest password bcrypt hashes without truncation.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hash a password with an explicit bcrypt cost (4..=31).
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, AuthError> {
    bcrypt::non_truncating_hash(password, cost).map_err(|e| match e {
        BcryptError::Truncation(_) => AuthError::PasswordTooLong,
        e => AuthError::Internal(format!("bcrypt hash: {e}")),
    })
}

/// Verify a password against a bcrypt hash.
///
/// A password too long to have been hashed never matches.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    match bcrypt::non_truncating_verify(password, hash) {
        Ok(matched) => Ok(matched),
        Err(BcryptError::Truncation(_)) => Ok(false),
        Err(e) => Err(AuthError::Internal(format!("bcrypt verify: {e}"))),
    }
}
