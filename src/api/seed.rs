//! Startup bootstrap: schema application and first-run seed data.
//!
//! Seeding only runs against empty tables, so restarting the service never
//! duplicates or resets records.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use sqlx::{PgPool, Row};
use tracing::info;

use super::handlers::auth::{self, types::Role, Administrator};
use super::handlers::employees::{self, NewEmployee};

const SCHEMA_SQL: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/db/sql/schema.sql"));

/// Apply the schema. Statements are `IF NOT EXISTS`, so this is idempotent.
pub async fn apply_schema(pool: &PgPool) -> Result<()> {
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(pool)
        .await
        .context("failed to apply schema")?;
    Ok(())
}

/// Seed administrators and sample employees when their tables are empty.
pub async fn ensure_seed_data(pool: &PgPool) -> Result<()> {
    if auth::count_admins(pool).await? == 0 {
        seed_admins(pool).await?;
        info!("Seeded default administrators");
    }

    if count_employees(pool).await? == 0 {
        seed_employees(pool).await?;
        info!("Seeded sample employees");
    }

    Ok(())
}

async fn seed_admins(pool: &PgPool) -> Result<()> {
    // Development bootstrap credentials, mirrored in the README. Change them
    // before exposing the service anywhere that matters.
    let admins = [
        Administrator {
            username: "admin".to_string(),
            password_hash: auth::hash_password("admin123")?,
            display_name: "Administrator".to_string(),
            role: Role::SuperAdmin,
        },
        Administrator {
            username: "user".to_string(),
            password_hash: auth::hash_password("user123")?,
            display_name: "Read Only User".to_string(),
            role: Role::ReadOnly,
        },
    ];

    for admin in &admins {
        auth::insert_admin(pool, admin).await?;
    }

    Ok(())
}

async fn seed_employees(pool: &PgPool) -> Result<()> {
    let employees = [
        NewEmployee {
            name: "Kim Chulsoo".to_string(),
            department: "Engineering".to_string(),
            position: "Team Lead".to_string(),
            email: "chulsoo.kim@example.com".to_string(),
            joined_date: NaiveDate::from_ymd_opt(2023, 1, 1)
                .context("invalid seed joined_date")?,
        },
        NewEmployee {
            name: "Lee Younghee".to_string(),
            department: "People Operations".to_string(),
            position: "Associate".to_string(),
            email: "younghee.lee@example.com".to_string(),
            joined_date: NaiveDate::from_ymd_opt(2023, 5, 15)
                .context("invalid seed joined_date")?,
        },
    ];

    for employee in &employees {
        employees::insert_employee(pool, employee).await?;
    }

    Ok(())
}

async fn count_employees(pool: &PgPool) -> Result<i64> {
    let row = sqlx::query("SELECT COUNT(*) AS total FROM employees")
        .fetch_one(pool)
        .await
        .context("failed to count employees")?;
    Ok(row.get("total"))
}
