//! Error taxonomy for the authentication and session flows.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;
use std::fmt;
use tracing::error;

/// Failures produced by the authentication service and the token issuer.
///
/// Everything client-facing collapses to a status code plus a generic message
/// at the boundary; internal detail never leaves the process.
#[derive(Debug)]
pub enum AuthError {
    /// Bad username or password. Deliberately indistinguishable between
    /// "no such user" and "wrong password".
    InvalidCredentials,

    /// Bearer token failed signature or structural checks.
    TokenInvalid,

    /// Bearer token is past its expiry.
    TokenExpired,

    /// No refresh session exists for the presented token.
    RefreshTokenNotFound,

    /// The refresh session existed but was past its expiry (and is now gone).
    RefreshTokenExpired,

    /// Malformed request body.
    InvalidRequest(&'static str),

    /// Unexpected failure (store unavailable, signing misconfigured).
    Internal(anyhow::Error),
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "Invalid username or password"),
            Self::TokenInvalid => write!(f, "Invalid token"),
            Self::TokenExpired => write!(f, "Token has expired"),
            Self::RefreshTokenNotFound => write!(f, "Refresh token not found"),
            Self::RefreshTokenExpired => {
                write!(f, "Refresh token has expired, please sign in again")
            }
            Self::InvalidRequest(message) => write!(f, "{message}"),
            Self::Internal(err) => write!(f, "Internal error: {err}"),
        }
    }
}

impl std::error::Error for AuthError {}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidCredentials
            | Self::TokenInvalid
            | Self::TokenExpired
            | Self::RefreshTokenNotFound
            | Self::RefreshTokenExpired => StatusCode::UNAUTHORIZED,
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if let Self::Internal(err) = &self {
            error!("auth failure: {err:?}");
            // Do not leak internals to the client.
            return (status, Json(json!({"error": "Internal server error"}))).into_response();
        }

        (status, Json(json!({"error": self.to_string()}))).into_response()
    }
}
