//! # iam_core
//!
//! Core identity logic for the IAM API: the in-memory user store, the JWT
//! token manager and the signup/signin/signout workflow built on both.

pub mod auth;
pub mod config;
pub mod models;
pub mod redact;
pub mod store;

/// Returns the crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
