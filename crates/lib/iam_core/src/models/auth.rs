//! Token domain models.

use serde::{Deserialize, Serialize};

/// Token purpose discriminator, carried in the `tokenType` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenKind {
    #[serde(rename = "ACCESS_TOKEN")]
    Access,
    #[serde(rename = "REFRESH_TOKEN")]
    Refresh,
}

/// JWT claims embedded in access and refresh tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Token ID, unique per issuance.
    pub jti: String,
    /// Subject: user ID.
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Issued at (unix timestamp).
    pub iat: i64,
    /// Not before (unix timestamp).
    pub nbf: i64,
    /// Expiry (unix timestamp).
    pub exp: i64,
    #[serde(rename = "tokenType")]
    pub token_type: TokenKind,
}

/// Access + refresh token pair issued at signin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    /// Always `"Bearer"`.
    pub token_type: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_kind_uses_wire_names() {
        assert_eq!(
            serde_json::to_string(&TokenKind::Access).unwrap(),
            "\"ACCESS_TOKEN\""
        );
        assert_eq!(
            serde_json::to_string(&TokenKind::Refresh).unwrap(),
            "\"REFRESH_TOKEN\""
        );
    }

    #[test]
    fn unknown_token_kind_is_rejected() {
        let parsed: Result<TokenKind, _> = serde_json::from_str("\"ID_TOKEN\"");
        assert!(parsed.is_err());
    }
}
