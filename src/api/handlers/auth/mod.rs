//! Authentication handlers and supporting modules.
//!
//! Login verifies credentials, issues a bearer token, and opens a refresh
//! session (superseding any previous one for that username). Refresh
//! re-verifies the stored session and reissues only the bearer token.
//! Both endpoints sit outside the authorization gate.

pub mod error;
pub mod gate;
mod password;
mod refresh;
mod service;
mod state;
mod storage;
pub mod token;
pub mod types;

pub use error::AuthError;
pub use gate::Identity;
pub use state::{AuthConfig, AuthState};

use axum::{extract::Extension, http::StatusCode, Json};
use sqlx::PgPool;
use std::sync::Arc;

use types::{LoginRequest, LoginResponse, TokenRefreshRequest, TokenRefreshResponse};

pub(crate) use password::hash_password;
pub(crate) use storage::{count_admins, insert_admin, Administrator};

#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Invalid username or password")
    ),
    tag = "auth"
)]
pub async fn login(
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
    Json(request): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), AuthError> {
    let response = service::login(&pool, &state, request).await?;
    Ok((StatusCode::OK, Json(response)))
}

#[utoipa::path(
    post,
    path = "/api/auth/refreshToken",
    request_body = TokenRefreshRequest,
    responses(
        (status = 200, description = "New bearer token issued", body = TokenRefreshResponse),
        (status = 400, description = "Blank refresh token"),
        (status = 401, description = "Refresh token not found or expired")
    ),
    tag = "auth"
)]
pub async fn refresh_token(
    Extension(pool): Extension<PgPool>,
    Extension(state): Extension<Arc<AuthState>>,
    Json(request): Json<TokenRefreshRequest>,
) -> Result<(StatusCode, Json<TokenRefreshResponse>), AuthError> {
    let response = service::refresh_token(&pool, &state, request).await?;
    Ok((StatusCode::OK, Json(response)))
}
