//! API server configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::Duration;
use iam_core::auth::password::{BCRYPT_COST, BCRYPT_COST_RANGE};
use iam_core::config::{
    AuthConfig, ConfigError, DEFAULT_ACCESS_TOKEN_TTL_SECS, DEFAULT_CLOCK_SKEW_SECS,
    DEFAULT_REFRESH_TOKEN_TTL_SECS,
};
use rand::distr::Alphanumeric;
use rand::{Rng, rng};
use tracing::{info, warn};

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_ISSUER: &str = "iam";
const DEFAULT_AUDIENCE: &str = "iam-api";

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:8080").
    pub bind_addr: String,
    /// Token issuance settings.
    pub auth: AuthConfig,
    /// bcrypt cost used when hashing new passwords.
    pub bcrypt_cost: u32,
    /// Emit a tracing span per HTTP request.
    pub request_logging: bool,
}

impl ApiConfig {
    /// Reads configuration from environment variables with sensible defaults.
    ///
    /// | Variable                     | Default                          |
    /// |------------------------------|----------------------------------|
    /// | `BIND_ADDR`                  | `127.0.0.1:8080`                 |
    /// | `AUTH_ISSUER`                | `iam`                            |
    /// | `AUTH_AUDIENCE`              | `iam-api`                        |
    /// | `JWT_SECRET` / `AUTH_SECRET` | generated & persisted to file    |
    /// | `ACCESS_TOKEN_TTL_SECS`      | `900`                            |
    /// | `REFRESH_TOKEN_TTL_SECS`     | `604800`                         |
    /// | `CLOCK_SKEW_SECS`            | `5`                              |
    /// | `BCRYPT_COST`                | `10`                             |
    /// | `REQUEST_LOGGING`            | `true`                           |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ApiConfig::from_env`], reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = non_empty(&lookup, "JWT_SECRET")
            .or_else(|| non_empty(&lookup, "AUTH_SECRET"))
            .unwrap_or_else(|| resolve_persisted_secret(&jwt_secret_path()));

        let auth = AuthConfig {
            issuer: lookup("AUTH_ISSUER").unwrap_or_else(|| DEFAULT_ISSUER.into()),
            audience: lookup("AUTH_AUDIENCE").unwrap_or_else(|| DEFAULT_AUDIENCE.into()),
            secret: secret.into_bytes(),
            access_token_ttl: Duration::seconds(parse_or(
                &lookup,
                "ACCESS_TOKEN_TTL_SECS",
                DEFAULT_ACCESS_TOKEN_TTL_SECS,
            )?),
            refresh_token_ttl: Duration::seconds(parse_or(
                &lookup,
                "REFRESH_TOKEN_TTL_SECS",
                DEFAULT_REFRESH_TOKEN_TTL_SECS,
            )?),
            clock_skew: Duration::seconds(parse_or(
                &lookup,
                "CLOCK_SKEW_SECS",
                DEFAULT_CLOCK_SKEW_SECS,
            )?),
        };
        auth.validate()?;

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", BCRYPT_COST)?;
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                reason: format!(
                    "{bcrypt_cost} is outside {}..={}",
                    BCRYPT_COST_RANGE.start(),
                    BCRYPT_COST_RANGE.end()
                ),
            });
        }

        Ok(Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into()),
            auth,
            bcrypt_cost,
            request_logging: parse_or(&lookup, "REQUEST_LOGGING", true)?,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|v| !v.is_empty())
}

/// Parse `key` if set; malformed values are an error rather than a silent default.
fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: format!("{raw:?}: {e}"),
        }),
    }
}

/// Read the secret at `path`, or generate and persist a new one.
pub fn resolve_persisted_secret(path: &Path) -> String {
    if let Ok(existing) = std::fs::read_to_string(path) {
        let trimmed = existing.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }
    let secret: String = rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect();
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(path = %parent.display(), error = %e, "could not create JWT secret directory");
        }
    }
    match std::fs::write(path, &secret) {
        Ok(()) => info!(path = %path.display(), "generated new JWT secret"),
        Err(e) => warn!(path = %path.display(), error = %e, "could not persist JWT secret"),
    }
    secret
}

/// Path to the persisted JWT secret file.
fn jwt_secret_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("iam")
        .join("jwt-secret")
}
