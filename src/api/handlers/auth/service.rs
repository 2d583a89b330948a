//! Login and refresh orchestration.
//!
//! Handlers translate the returned [`AuthError`] values to status codes at
//! the boundary; nothing in here touches HTTP.

use sqlx::PgPool;

use super::error::AuthError;
use super::state::AuthState;
use super::types::{LoginRequest, LoginResponse, TokenRefreshRequest, TokenRefreshResponse};
use super::{password, refresh, storage};

/// Verify credentials, issue a bearer token, and open a (superseding)
/// refresh session.
pub(crate) async fn login(
    pool: &PgPool,
    state: &AuthState,
    request: LoginRequest,
) -> Result<LoginResponse, AuthError> {
    let admin = storage::find_admin_by_username(pool, &request.username)
        .await
        .map_err(AuthError::Internal)?;

    // Unknown username and wrong password are indistinguishable to the client.
    let Some(admin) = admin else {
        return Err(AuthError::InvalidCredentials);
    };
    if !password::verify_password(&request.password, &admin.password_hash) {
        return Err(AuthError::InvalidCredentials);
    }

    let token = state.issuer().issue(&admin.username, admin.role)?;
    let session = refresh::create_session(
        pool,
        &admin.username,
        state.config().refresh_ttl_seconds(),
    )
    .await
    .map_err(AuthError::Internal)?;

    Ok(LoginResponse {
        username: admin.username,
        name: admin.display_name,
        role: admin.role,
        token,
        refresh_token: session.token,
    })
}

/// Re-issue a bearer token against a live refresh session.
///
/// The refresh token itself is not rotated: the response carries the same
/// opaque string the client presented.
pub(crate) async fn refresh_token(
    pool: &PgPool,
    state: &AuthState,
    request: TokenRefreshRequest,
) -> Result<TokenRefreshResponse, AuthError> {
    if request.refresh_token.trim().is_empty() {
        return Err(AuthError::InvalidRequest("refreshToken must not be blank"));
    }

    let session = refresh::find_by_token(pool, &request.refresh_token)
        .await
        .map_err(AuthError::Internal)?
        .ok_or(AuthError::RefreshTokenNotFound)?;

    let session = refresh::verify_not_expired(pool, session).await?;

    // The role is re-read from the credential store so a reissued token never
    // carries a stale role from login time.
    let admin = storage::find_admin_by_username(pool, &session.username)
        .await
        .map_err(AuthError::Internal)?
        .ok_or(AuthError::RefreshTokenNotFound)?;

    let access_token = state.issuer().issue(&admin.username, admin.role)?;

    Ok(TokenRefreshResponse {
        access_token,
        refresh_token: session.token,
    })
}
