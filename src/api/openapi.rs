//! Generated API document, driven by the `#[utoipa::path]` annotations on the
//! handlers.

use utoipa::OpenApi;

use super::handlers::auth::types::{
    LoginRequest, LoginResponse, Role, TokenRefreshRequest, TokenRefreshResponse,
};
use super::handlers::employees::{Employee, EmployeeUpdate, NewEmployee};
use super::handlers::health::Health;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "rosterd",
        description = "HR roster API with token-based administrator authentication"
    ),
    paths(
        super::handlers::health::health,
        super::handlers::auth::login,
        super::handlers::auth::refresh_token,
        super::handlers::employees::list,
        super::handlers::employees::get_by_id,
        super::handlers::employees::create,
        super::handlers::employees::update,
        super::handlers::employees::delete,
    ),
    components(schemas(
        Role,
        LoginRequest,
        LoginResponse,
        TokenRefreshRequest,
        TokenRefreshResponse,
        Employee,
        NewEmployee,
        EmployeeUpdate,
        Health,
    )),
    tags(
        (name = "auth", description = "Login and refresh endpoints"),
        (name = "employees", description = "Role-gated employee roster CRUD"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;
