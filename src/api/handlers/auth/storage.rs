//! Database helpers for administrator credentials.

use anyhow::{anyhow, Context, Result};
use sqlx::{PgPool, Row};
use tracing::Instrument;

use super::types::Role;

/// One credential store record. Created only by seeding; immutable afterwards.
#[derive(Debug, Clone)]
pub(crate) struct Administrator {
    pub(crate) username: String,
    pub(crate) password_hash: String,
    pub(crate) display_name: String,
    pub(crate) role: Role,
}

/// Look up an administrator by username.
pub(crate) async fn find_admin_by_username(
    pool: &PgPool,
    username: &str,
) -> Result<Option<Administrator>> {
    let query = "SELECT username, password_hash, display_name, role FROM admins WHERE username = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(username)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to look up administrator")?;

    let Some(row) = row else {
        return Ok(None);
    };

    let role_text: String = row.get("role");
    let role = role_text
        .parse::<Role>()
        .map_err(|err| anyhow!("corrupt administrator record: {err}"))?;

    Ok(Some(Administrator {
        username: row.get("username"),
        password_hash: row.get("password_hash"),
        display_name: row.get("display_name"),
        role,
    }))
}

pub(crate) async fn count_admins(pool: &PgPool) -> Result<i64> {
    let query = "SELECT COUNT(*) AS total FROM admins";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to count administrators")?;

    Ok(row.get("total"))
}

/// Insert an administrator record. Used only during bootstrap seeding.
pub(crate) async fn insert_admin(pool: &PgPool, admin: &Administrator) -> Result<()> {
    let query = r"
        INSERT INTO admins
            (username, password_hash, display_name, role)
        VALUES ($1, $2, $3, $4)
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    sqlx::query(query)
        .bind(&admin.username)
        .bind(&admin.password_hash)
        .bind(&admin.display_name)
        .bind(admin.role.as_str())
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to insert administrator")?;

    Ok(())
}
