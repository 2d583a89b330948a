//! Stateless bearer token issuance and validation.
//!
//! Tokens are HS256 JWTs embedding the subject, role, issue time, and expiry.
//! Validation is a pure function of the token string and the process signing
//! key; nothing is looked up elsewhere, which keeps bearer verification
//! horizontally scalable.

use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use super::error::AuthError;
use super::types::Role;

/// Claims carried by every bearer token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (administrator username)
    pub sub: String,
    /// Administrator role at issue time
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiry (Unix timestamp)
    pub exp: i64,
}

/// Issues and validates signed bearer tokens with a symmetric process-wide key.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_seconds: i64,
    validation: Validation,
}

impl TokenIssuer {
    #[must_use]
    pub fn new(signing_key: &SecretString, token_ttl_seconds: i64) -> Self {
        let secret = signing_key.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        // Expiry is exact: a token is rejected the moment the clock passes exp.
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            token_ttl_seconds,
            validation,
        }
    }

    /// Produce a signed token for `username` carrying `role`.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Internal` if signing fails.
    pub fn issue(&self, username: &str, role: Role) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: username.to_string(),
            role,
            iat: now,
            exp: now + self.token_ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|err| AuthError::Internal(anyhow::anyhow!("failed to sign token: {err}")))
    }

    /// Check signature integrity and expiry, returning the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenExpired` when the clock is past `exp`, and
    /// `AuthError::TokenInvalid` for bad signatures or malformed structure.
    pub fn validate(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::TokenInvalid,
            })
    }
}
