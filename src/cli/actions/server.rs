use crate::api::{self, handlers::auth::AuthConfig};
use anyhow::Result;
use secrecy::SecretString;

#[derive(Debug)]
pub struct Args {
    pub port: u16,
    pub dsn: String,
    pub cors_origin: String,
    pub token_signing_key: SecretString,
    pub token_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

/// Execute the server action.
///
/// # Errors
///
/// Returns an error if the database is unreachable or the server fails to start.
pub async fn execute(args: Args) -> Result<()> {
    let auth_config = AuthConfig::new(args.token_signing_key, args.cors_origin)
        .with_token_ttl_seconds(args.token_ttl_seconds)
        .with_refresh_ttl_seconds(args.refresh_ttl_seconds);

    api::new(args.port, args.dsn, auth_config).await
}
