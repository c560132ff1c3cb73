//! Authentication configuration consumed by the token manager.

use chrono::Duration;
use thiserror::Error;

/// Default access token lifetime: 15 minutes.
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Default refresh token lifetime: 7 days.
pub const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;

/// Default tolerance for clock drift when checking `iat`/`nbf`/`exp`.
pub const DEFAULT_CLOCK_SKEW_SECS: i64 = 5;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid configuration value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Token issuance settings. Immutable for the lifetime of the process.
#[derive(Clone)]
pub struct AuthConfig {
    /// Value of the `iss` claim.
    pub issuer: String,
    /// Value of the `aud` claim.
    pub audience: String,
    /// HMAC signing secret.
    pub secret: Vec<u8>,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    /// Leeway applied to time-based claim checks.
    pub clock_skew: Duration,
}

impl AuthConfig {
    /// Build a config with default lifetimes and clock skew.
    pub fn new(issuer: impl Into<String>, audience: impl Into<String>, secret: &[u8]) -> Self {
        Self {
            issuer: issuer.into(),
            audience: audience.into(),
            secret: secret.to_vec(),
            access_token_ttl: Duration::seconds(DEFAULT_ACCESS_TOKEN_TTL_SECS),
            refresh_token_ttl: Duration::seconds(DEFAULT_REFRESH_TOKEN_TTL_SECS),
            clock_skew: Duration::seconds(DEFAULT_CLOCK_SKEW_SECS),
        }
    }

    /// Check that every value is present and every duration is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.issuer.trim().is_empty() {
            return Err(ConfigError::Missing("issuer"));
        }
        if self.audience.trim().is_empty() {
            return Err(ConfigError::Missing("audience"));
        }
        if self.secret.is_empty() {
            return Err(ConfigError::Missing("secret"));
        }
        if self.access_token_ttl <= Duration::zero() {
            return Err(ConfigError::Invalid {
                key: "access_token_ttl",
                reason: "must be positive".into(),
            });
        }
        if self.refresh_token_ttl <= Duration::zero() {
            return Err(ConfigError::Invalid {
                key: "refresh_token_ttl",
                reason: "must be positive".into(),
            });
        }
        if self.clock_skew < Duration::zero() {
            return Err(ConfigError::Invalid {
                key: "clock_skew",
                reason: "must not be negative".into(),
            });
        }
        Ok(())
    }
}

// Keeps the secret out of logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("clock_skew", &self.clock_skew)
            .finish()
    }
}
