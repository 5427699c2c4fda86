//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every users route, the health probes and the wire
//! schemas. Swagger UI serves it at `/docs` in debug builds and
//! `openapi-dump` prints it for external tooling.

use utoipa::OpenApi;

use crate::domain::ErrorCode;
use crate::inbound::http::ErrorResponse;
use crate::inbound::http::users::{
    CreateUserRequest, GetUsersResponse, UpdateUserRequest, UserResponse,
};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users service API",
        description = "CRUD operations over users, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserResponse,
        GetUsersResponse,
        CreateUserRequest,
        UpdateUserRequest,
        ErrorResponse,
        ErrorCode
    )),
    tags(
        (name = "users", description = "User CRUD"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
