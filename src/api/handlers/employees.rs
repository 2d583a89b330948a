//! Employee roster CRUD.
//!
//! Plain field-level persistence; the authorization gate has already enforced
//! role requirements before any of these handlers run.

use anyhow::{Context, Result};
use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Row};
use tracing::{error, Instrument};
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub department: String,
    pub position: String,
    pub email: String,
    pub joined_date: NaiveDate,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub department: String,
    pub position: String,
    pub email: String,
    pub joined_date: NaiveDate,
}

/// Partial update: absent fields keep their current values.
#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    pub name: Option<String>,
    pub department: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub joined_date: Option<NaiveDate>,
}

#[utoipa::path(
    get,
    path = "/api/employees",
    responses(
        (status = 200, description = "All employee records", body = [Employee]),
        (status = 401, description = "Not authenticated")
    ),
    tag = "employees"
)]
pub async fn list(Extension(pool): Extension<PgPool>) -> Response {
    match list_employees(&pool).await {
        Ok(employees) => (StatusCode::OK, Json(employees)).into_response(),
        Err(err) => {
            error!("failed to list employees: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Employee record", body = Employee),
        (status = 404, description = "No such employee")
    ),
    tag = "employees"
)]
pub async fn get_by_id(Extension(pool): Extension<PgPool>, Path(id): Path<i64>) -> Response {
    match find_employee(&pool, id).await {
        Ok(Some(employee)) => (StatusCode::OK, Json(employee)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("failed to fetch employee {id}: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = NewEmployee,
    responses(
        (status = 200, description = "Created record", body = Employee),
        (status = 403, description = "Requires the elevated role")
    ),
    tag = "employees"
)]
pub async fn create(
    Extension(pool): Extension<PgPool>,
    Json(new_employee): Json<NewEmployee>,
) -> Response {
    match insert_employee(&pool, &new_employee).await {
        Ok(employee) => (StatusCode::OK, Json(employee)).into_response(),
        Err(err) => {
            error!("failed to create employee: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    request_body = EmployeeUpdate,
    responses(
        (status = 200, description = "Updated record", body = Employee),
        (status = 404, description = "No such employee")
    ),
    tag = "employees"
)]
pub async fn update(
    Extension(pool): Extension<PgPool>,
    Path(id): Path<i64>,
    Json(changes): Json<EmployeeUpdate>,
) -> Response {
    match update_employee(&pool, id, &changes).await {
        Ok(Some(employee)) => (StatusCode::OK, Json(employee)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("failed to update employee {id}: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    responses(
        (status = 200, description = "Deleted"),
        (status = 404, description = "No such employee")
    ),
    tag = "employees"
)]
pub async fn delete(Extension(pool): Extension<PgPool>, Path(id): Path<i64>) -> Response {
    match delete_employee(&pool, id).await {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => StatusCode::NOT_FOUND.into_response(),
        Err(err) => {
            error!("failed to delete employee {id}: {err:?}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn employee_from_row(row: &sqlx::postgres::PgRow) -> Employee {
    Employee {
        id: row.get("id"),
        name: row.get("name"),
        department: row.get("department"),
        position: row.get("position"),
        email: row.get("email"),
        joined_date: row.get("joined_date"),
    }
}

async fn list_employees(pool: &PgPool) -> Result<Vec<Employee>> {
    let query =
        "SELECT id, name, department, position, email, joined_date FROM employees ORDER BY id";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let rows = sqlx::query(query)
        .fetch_all(pool)
        .instrument(span)
        .await
        .context("failed to list employees")?;

    Ok(rows.iter().map(employee_from_row).collect())
}

async fn find_employee(pool: &PgPool, id: i64) -> Result<Option<Employee>> {
    let query =
        "SELECT id, name, department, position, email, joined_date FROM employees WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "SELECT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to fetch employee")?;

    Ok(row.as_ref().map(employee_from_row))
}

pub(crate) async fn insert_employee(pool: &PgPool, new_employee: &NewEmployee) -> Result<Employee> {
    let query = r"
        INSERT INTO employees
            (name, department, position, email, joined_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, department, position, email, joined_date
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "INSERT",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(&new_employee.name)
        .bind(&new_employee.department)
        .bind(&new_employee.position)
        .bind(&new_employee.email)
        .bind(new_employee.joined_date)
        .fetch_one(pool)
        .instrument(span)
        .await
        .context("failed to insert employee")?;

    Ok(employee_from_row(&row))
}

async fn update_employee(
    pool: &PgPool,
    id: i64,
    changes: &EmployeeUpdate,
) -> Result<Option<Employee>> {
    let query = r"
        UPDATE employees
        SET name        = COALESCE($2, name),
            department  = COALESCE($3, department),
            position    = COALESCE($4, position),
            email       = COALESCE($5, email),
            joined_date = COALESCE($6, joined_date)
        WHERE id = $1
        RETURNING id, name, department, position, email, joined_date
    ";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "UPDATE",
        db.statement = query
    );
    let row = sqlx::query(query)
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.department.as_deref())
        .bind(changes.position.as_deref())
        .bind(changes.email.as_deref())
        .bind(changes.joined_date)
        .fetch_optional(pool)
        .instrument(span)
        .await
        .context("failed to update employee")?;

    Ok(row.as_ref().map(employee_from_row))
}

async fn delete_employee(pool: &PgPool, id: i64) -> Result<bool> {
    let query = "DELETE FROM employees WHERE id = $1";
    let span = tracing::info_span!(
        "db.query",
        db.system = "postgresql",
        db.operation = "DELETE",
        db.statement = query
    );
    let result = sqlx::query(query)
        .bind(id)
        .execute(pool)
        .instrument(span)
        .await
        .context("failed to delete employee")?;

    Ok(result.rows_affected() > 0)
}
