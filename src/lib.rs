//! # Rosterd (HR Roster API)
//!
//! `rosterd` is a small HR record service. Administrators authenticate with a
//! username and password, receive a short-lived signed bearer token plus a
//! longer-lived refresh token, and manage an employee roster through
//! role-gated CRUD endpoints.
//!
//! ## Authentication & Sessions
//!
//! Bearer tokens are self-contained HS256 JWTs carrying the subject, role,
//! issue time, and expiry. They are never persisted: validation is a pure
//! function of the token and the process signing key, so no shared session
//! storage is needed per request.
//!
//! Refresh sessions are server-tracked rows with **at most one live session
//! per username**: a new login supersedes any previous session. Refreshing
//! re-verifies the stored session and reissues only the bearer token; the
//! refresh token string itself is not rotated.
//!
//! ## Authorization
//!
//! A per-request gate extracts and validates the bearer token, establishes the
//! caller identity, and enforces a data-driven route policy: login and refresh
//! are open, reads require any authenticated role, and mutations require
//! `SUPER_ADMIN`.

pub mod api;
pub mod cli;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
