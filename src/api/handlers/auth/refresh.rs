//! Refresh session persistence.
//!
//! At most one live session exists per username: creating a session first
//! deletes whatever sessions that username already has. The delete and the
//! insert are two independent statements on purpose; concurrent logins for
//! the same username may briefly leave an extra row, an accepted gap rather
//! than something to paper over with locking.

use anyhow::{Context, Result};
use base64ct::{Base64UrlUnpadded, Encoding};
use chrono::{DateTime, Duration, Utc};
use rand::{rngs::OsRng, RngCore};
use sqlx::{PgPool, Row};
use tracing::Instrument;

use super::error::AuthError;

/// One refresh session row. The token is the primary key; the username is a
/// secondary lookup key for bulk invalidation.
#[derive(Debug, Clone)]
pub(crate) struct RefreshSession {
    pub(crate) token: String,
    pub(crate) username: String,
    pub(crate) expires_at: DateTime<Utc>,
}

/// Generate an unguessable opaque refresh token (32 random bytes, base64url).
pub(crate) fn generate_refresh_token() -> Result<String> {
    let mut bytes = [0u8; 32];
    OsRng
        .try_fill_bytes(&mut bytes)
        .context("failed to generate refresh token")?;
    Ok(Base64UrlUnpadded::encode_string(&bytes))
}

/// Create a fresh session for `username`, superseding any existing one.
pub(crate) async fn create_session(
    pool: &PgPool,
    username: &str,
    refresh_ttl_seconds: i64,
) -> Result<RefreshSession> {
    delete_all_for_username(pool, username).await?;

    let session = RefreshSession {
        token: generate_refresh_token()?,
        username: username.to_string(),
        expires_at: Utc::now() + Duration::seconds(refresh_ttl_seconds),
    };

    let query = r"
        INSERT INTO refresh_sessions
            (token, username, expires_at)
        VALUES ($1, $2, $3)
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query(query)
        .bind(&session.token)
        .bind(&session.username)
        .bind(session.expires_at)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to insert refresh session")?;

    Ok(session)
}

/// Exact-match lookup by token.
pub(crate) async fn find_by_token(pool: &PgPool, token: &str) -> Result<Option<RefreshSession>> {
    let query = "SELECT token, username, expires_at FROM refresh_sessions WHERE token = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(token)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to look up refresh session")?;

    Ok(row.map(|row| RefreshSession {
        token: row.get("token"),
        username: row.get("username"),
        expires_at: row.get("expires_at"),
    }))
}

/// Fail an expired session, deleting it as a side effect; pass a live one
/// through unchanged. This is the only mutation triggered by a read path.
pub(crate) async fn verify_not_expired(
    pool: &PgPool,
    session: RefreshSession,
) -> Result<RefreshSession, AuthError> {
    if session.expires_at < Utc::now() {
        delete_by_token(pool, &session.token)
            .await
            .map_err(AuthError::Internal)?;
        return Err(AuthError::RefreshTokenExpired);
    }
    Ok(session)
}

async fn delete_by_token(pool: &PgPool, token: &str) -> Result<()> {
    let query = "DELETE FROM refresh_sessions WHERE token = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(token)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete refresh session")?;

    Ok(())
}

/// Remove every session for `username`. Idempotent: deleting nothing is fine.
pub(crate) async fn delete_all_for_username(pool: &PgPool, username: &str) -> Result<()> {
    let query = "DELETE FROM refresh_sessions WHERE username = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    sqlx::query(query)
        .bind(username)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete refresh sessions for username")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_token_decodes_to_32_bytes() {
        let decoded_len = generate_refresh_token()
            .ok()
            .and_then(|token| Base64UrlUnpadded::decode_vec(&token).ok())
            .map(|bytes| bytes.len());
        assert_eq!(decoded_len, Some(32));
    }

    #[test]
    fn refresh_tokens_are_unique() {
        let first = generate_refresh_token().expect("token");
        let second = generate_refresh_token().expect("token");
        assert_ne!(first, second);
    }
}
