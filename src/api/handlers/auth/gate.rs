//! Per-request authorization gate.
//!
//! The gate runs once per inbound request, before any handler:
//!
//! 1. Extract the bearer token from the `Authorization` header. A missing,
//!    malformed, or expired token leaves the request unauthenticated; the
//!    filter itself never aborts on extraction.
//! 2. A valid token establishes [`Identity`] in the request extensions.
//! 3. The route policy table decides what the matched route requires, and the
//!    gate rejects with 401 (no identity) or 403 (insufficient role) before
//!    dispatch. Handlers never see unauthorized requests.

use axum::{
    extract::Request,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
    Extension,
};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

use super::state::AuthState;
use super::types::Role;

/// Request-scoped authenticated identity established from a valid bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub role: Role,
}

/// What a route requires before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Access {
    /// No identity needed.
    Public,
    /// Any authenticated identity.
    Authenticated,
    /// An authenticated identity holding this role.
    Require(Role),
}

/// Route policy table. Mutating employee operations need the elevated role;
/// reads accept any authenticated role; login and refresh are always open.
static ROUTE_POLICY: &[(Method, &str, Access)] = &[
    (Method::POST, "/api/auth/login", Access::Public),
    (Method::POST, "/api/auth/refreshToken", Access::Public),
    (Method::GET, "/api/employees", Access::Authenticated),
    (Method::GET, "/api/employees/{id}", Access::Authenticated),
    (
        Method::POST,
        "/api/employees",
        Access::Require(Role::SuperAdmin),
    ),
    (
        Method::PUT,
        "/api/employees/{id}",
        Access::Require(Role::SuperAdmin),
    ),
    (
        Method::DELETE,
        "/api/employees/{id}",
        Access::Require(Role::SuperAdmin),
    ),
];

/// Resolve the access rule for a request. Unlisted `/api/...` routes still
/// require authentication; everything else (health, docs) is open.
pub(crate) fn route_access(method: &Method, path: &str) -> Access {
    for (rule_method, pattern, access) in ROUTE_POLICY {
        if rule_method == method && path_matches(pattern, path) {
            return *access;
        }
    }

    if path == "/api" || path.starts_with("/api/") {
        Access::Authenticated
    } else {
        Access::Public
    }
}

/// Segment-wise match; `{...}` placeholders match exactly one non-empty segment.
fn path_matches(pattern: &str, path: &str) -> bool {
    let mut pattern_segments = pattern.trim_matches('/').split('/');
    let mut path_segments = path.trim_matches('/').split('/');

    loop {
        match (pattern_segments.next(), path_segments.next()) {
            (None, None) => return true,
            (Some(expected), Some(actual)) => {
                let is_placeholder = expected.starts_with('{') && expected.ends_with('}');
                if is_placeholder {
                    if actual.is_empty() {
                        return false;
                    }
                } else if expected != actual {
                    return false;
                }
            }
            _ => return false,
        }
    }
}

/// The middleware itself.
pub async fn authorize(
    Extension(state): Extension<Arc<AuthState>>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_bearer_token(request.headers()) {
        match state.issuer().validate(&token) {
            Ok(claims) => {
                request.extensions_mut().insert(Identity {
                    username: claims.sub,
                    role: claims.role,
                });
            }
            // Invalid or expired tokens leave the request unauthenticated;
            // the policy check below decides whether that matters.
            Err(err) => debug!("bearer token rejected: {err}"),
        }
    }

    let access = route_access(request.method(), request.uri().path());
    let identity = request.extensions().get::<Identity>().cloned();

    match (access, identity) {
        (Access::Public, _) | (Access::Authenticated, Some(_)) => next.run(request).await,
        (Access::Require(required), Some(identity)) => {
            if identity.role == required {
                next.run(request).await
            } else {
                forbidden()
            }
        }
        (_, None) => unauthorized(),
    }
}

pub(crate) fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let trimmed = value.trim();
    let token = trimmed
        .strip_prefix("Bearer ")
        .or_else(|| trimmed.strip_prefix("bearer "))?
        .trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"error": "Authentication required"})),
    )
        .into_response()
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"error": "Insufficient role"})),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::auth::state::AuthConfig;
    use axum::http::{header::AUTHORIZATION, HeaderValue};
    use axum::{body::Body, middleware, routing::get, routing::post, Router};
    use secrecy::SecretString;
    use tower::ServiceExt;

    fn auth_state(token_ttl_seconds: i64) -> Arc<AuthState> {
        Arc::new(AuthState::new(
            AuthConfig::new(
                SecretString::from("gate-test-signing-key-32-characters"),
                "http://localhost:5173".to_string(),
            )
            .with_token_ttl_seconds(token_ttl_seconds),
        ))
    }

    fn app(state: Arc<AuthState>) -> Router {
        Router::new()
            .route(
                "/api/employees",
                get(|| async { "listed" }).post(|| async { "created" }),
            )
            .route("/api/auth/login", post(|| async { "login" }))
            .route("/health", get(|| async { "ok" }))
            .layer(middleware::from_fn(authorize))
            .layer(Extension(state))
    }

    fn request(method: Method, path: &str, bearer: Option<&str>) -> Request {
        let mut builder = Request::builder().method(method).uri(path);
        if let Some(token) = bearer {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }
        builder.body(Body::empty()).expect("request")
    }

    #[test]
    fn policy_table_covers_the_route_contract() {
        assert_eq!(
            route_access(&Method::POST, "/api/auth/login"),
            Access::Public
        );
        assert_eq!(
            route_access(&Method::POST, "/api/auth/refreshToken"),
            Access::Public
        );
        assert_eq!(
            route_access(&Method::GET, "/api/employees"),
            Access::Authenticated
        );
        assert_eq!(
            route_access(&Method::GET, "/api/employees/42"),
            Access::Authenticated
        );
        assert_eq!(
            route_access(&Method::POST, "/api/employees"),
            Access::Require(Role::SuperAdmin)
        );
        assert_eq!(
            route_access(&Method::PUT, "/api/employees/42"),
            Access::Require(Role::SuperAdmin)
        );
        assert_eq!(
            route_access(&Method::DELETE, "/api/employees/42"),
            Access::Require(Role::SuperAdmin)
        );
        // Unlisted API routes still need an identity; non-API routes do not.
        assert_eq!(
            route_access(&Method::GET, "/api/unknown"),
            Access::Authenticated
        );
        assert_eq!(route_access(&Method::GET, "/health"), Access::Public);
    }

    #[test]
    fn path_matching_handles_placeholders() {
        assert!(path_matches("/api/employees/{id}", "/api/employees/7"));
        assert!(!path_matches("/api/employees/{id}", "/api/employees"));
        assert!(!path_matches("/api/employees/{id}", "/api/employees/7/x"));
        assert!(path_matches("/api/employees", "/api/employees"));
    }

    #[test]
    fn bearer_extraction_is_lenient_about_case_and_whitespace() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));
        assert_eq!(extract_bearer_token(&headers), Some("abc".to_string()));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer  xyz "));
        assert_eq!(extract_bearer_token(&headers), Some("xyz".to_string()));

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic abc"));
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer_token(&headers), None);
    }

    #[tokio::test]
    async fn missing_token_is_rejected_on_protected_routes() {
        let app = app(auth_state(60));
        let response = app
            .oneshot(request(Method::GET, "/api/employees", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn malformed_token_is_rejected_like_no_token() {
        let app = app(auth_state(60));
        let response = app
            .oneshot(request(Method::GET, "/api/employees", Some("not-a-jwt")))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn expired_token_is_rejected_like_no_token() {
        let state = auth_state(-10);
        let token = state
            .issuer()
            .issue("admin", Role::SuperAdmin)
            .expect("token");
        let response = app(state)
            .oneshot(request(Method::GET, "/api/employees", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn valid_token_passes_reads_for_any_role() {
        let state = auth_state(60);
        let token = state.issuer().issue("user", Role::ReadOnly).expect("token");
        let response = app(state)
            .oneshot(request(Method::GET, "/api/employees", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn read_only_role_cannot_mutate() {
        let state = auth_state(60);
        let token = state.issuer().issue("user", Role::ReadOnly).expect("token");
        let response = app(state)
            .oneshot(request(Method::POST, "/api/employees", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn elevated_role_can_mutate() {
        let state = auth_state(60);
        let token = state
            .issuer()
            .issue("admin", Role::SuperAdmin)
            .expect("token");
        let response = app(state)
            .oneshot(request(Method::POST, "/api/employees", Some(&token)))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn login_and_health_stay_open() {
        let state = auth_state(60);
        let response = app(state.clone())
            .oneshot(request(Method::POST, "/api/auth/login", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = app(state)
            .oneshot(request(Method::GET, "/health", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }
}
