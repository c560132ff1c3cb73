//! JWT token generation and verification.
//!
//! Tokens are HS256-signed and carry [`Claims`]. Verification accepts exactly
//! the configured algorithm, issuer and audience, and every failure collapses
//! into [`TokenError::Invalid`] so callers cannot tell which check tripped.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use thiserror::Error;
use uuid::Uuid;

use crate::config::{AuthConfig, ConfigError};
use crate::models::auth::{Claims, TokenKind};

/// The only algorithm tokens are signed with or accepted in.
const SIGNING_ALGORITHM: Algorithm = Algorithm::HS256;

/// Offset of `nbf` from `iat`, absorbing clock granularity between issuers.
const NOT_BEFORE_GRACE_SECS: i64 = 1;

const BEARER_SCHEME: &str = "Bearer";

/// Token manager errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid or expired token")]
    Invalid,

    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Issues and validates signed access/refresh tokens.
///
/// Holds only immutable configuration, so one instance can be cloned into
/// every request handler without locking.
#[derive(Clone)]
pub struct TokenManager {
    config: AuthConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenManager {
    /// Build a manager from a validated config.
    pub fn new(config: AuthConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut validation = Validation::new(SIGNING_ALGORITHM);
        validation.set_issuer(&[&config.issuer]);
        validation.set_audience(&[&config.audience]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = config.clock_skew.num_seconds().max(0) as u64;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(&config.secret),
            decoding_key: DecodingKey::from_secret(&config.secret),
            validation,
            config,
        })
    }

    /// Lifetime in seconds of tokens of the given kind.
    pub fn lifetime_secs(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.config.access_token_ttl.num_seconds(),
            TokenKind::Refresh => self.config.refresh_token_ttl.num_seconds(),
        }
    }

    /// Build claims for `subject` with issuer, audience and lifetimes from config.
    pub fn standard_claims(&self, subject: &str, kind: TokenKind) -> Claims {
        let now = Utc::now().timestamp();
        Claims {
            jti: Uuid::new_v4().to_string(),
            sub: subject.to_string(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
            iat: now,
            nbf: now + NOT_BEFORE_GRACE_SECS,
            exp: now + self.lifetime_secs(kind),
            token_type: kind,
        }
    }

    /// Sign `claims` into a compact JWT.
    pub fn generate(&self, claims: &Claims) -> Result<String, TokenError> {
        encode(&Header::new(SIGNING_ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(format!("jwt encode: {e}")))
    }

    /// Validate a `Bearer <token>` value and return its claims.
    ///
    /// Anything other than exactly two space-separated parts with the
    /// `Bearer` scheme is rejected before the signature is looked at.
    pub fn parse(&self, bearer: &str) -> Result<Claims, TokenError> {
        let mut parts = bearer.split(' ');
        let (Some(scheme), Some(token), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(TokenError::Invalid);
        };
        if scheme != BEARER_SCHEME || token.is_empty() {
            return Err(TokenError::Invalid);
        }
        self.verify(token)
    }

    /// Validate a raw token (no scheme prefix) and return its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|_| TokenError::Invalid)?
            .claims;

        let now = Utc::now().timestamp();
        let skew = self.config.clock_skew.num_seconds();

        // jsonwebtoken does not check `iat`.
        if claims.iat > now + skew {
            return Err(TokenError::Invalid);
        }
        // jsonwebtoken still accepts a token at exactly `exp + leeway`.
        if claims.exp <= now - skew {
            return Err(TokenError::Invalid);
        }

        Ok(claims)
    }
}

impl std::fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenManager")
            .field("config", &self.config)
            .field("algorithm", &SIGNING_ALGORITHM)
            .finish_non_exhaustive()
    }
}
