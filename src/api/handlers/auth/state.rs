//! Auth configuration and shared state.

use secrecy::SecretString;

use super::token::TokenIssuer;

const DEFAULT_TOKEN_TTL_SECONDS: i64 = 30 * 60;
const DEFAULT_REFRESH_TTL_SECONDS: i64 = 7 * 24 * 60 * 60;

#[derive(Clone)]
pub struct AuthConfig {
    signing_key: SecretString,
    frontend_origin: String,
    token_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl AuthConfig {
    #[must_use]
    pub fn new(signing_key: SecretString, frontend_origin: String) -> Self {
        Self {
            signing_key,
            frontend_origin,
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
            refresh_ttl_seconds: DEFAULT_REFRESH_TTL_SECONDS,
        }
    }

    #[must_use]
    pub fn with_token_ttl_seconds(mut self, seconds: i64) -> Self {
        self.token_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn with_refresh_ttl_seconds(mut self, seconds: i64) -> Self {
        self.refresh_ttl_seconds = seconds;
        self
    }

    #[must_use]
    pub fn frontend_origin(&self) -> &str {
        &self.frontend_origin
    }

    pub(crate) fn signing_key(&self) -> &SecretString {
        &self.signing_key
    }

    pub(crate) fn token_ttl_seconds(&self) -> i64 {
        self.token_ttl_seconds
    }

    pub(crate) fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("signing_key", &"***")
            .field("frontend_origin", &self.frontend_origin)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish()
    }
}

/// Process-wide auth state: configuration plus the token issuer built from it.
pub struct AuthState {
    config: AuthConfig,
    issuer: TokenIssuer,
}

impl AuthState {
    #[must_use]
    pub fn new(config: AuthConfig) -> Self {
        let issuer = TokenIssuer::new(config.signing_key(), config.token_ttl_seconds());
        Self { config, issuer }
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    #[must_use]
    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults_and_builders() {
        let config = AuthConfig::new(
            SecretString::from("secret"),
            "http://localhost:5173".to_string(),
        );
        assert_eq!(config.token_ttl_seconds(), 1800);
        assert_eq!(config.refresh_ttl_seconds(), 604_800);

        let config = config
            .with_token_ttl_seconds(60)
            .with_refresh_ttl_seconds(120);
        assert_eq!(config.token_ttl_seconds(), 60);
        assert_eq!(config.refresh_ttl_seconds(), 120);
        assert_eq!(config.frontend_origin(), "http://localhost:5173");
    }

    #[test]
    fn debug_redacts_signing_key() {
        let config = AuthConfig::new(
            SecretString::from("super-secret"),
            "http://localhost:5173".to_string(),
        );
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("***"));
    }
}
