//! Users API handlers.
//!
//! ```text
//! GET    /v1/users
//! GET    /v1/users/{id}
//! POST   /v1/users {"name":"A","email":"a@x.com","age":30}
//! PUT    /v1/users {"id":1,"name":"A","email":"a@x.com","age":31}
//! DELETE /v1/users/{id}
//! ```
//!
//! Payloads are validated before any port is called. Path ids that are not
//! integers are rejected as `ErrInvalidID`.

use actix_web::{HttpResponse, Scope, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    Age, EmailAddress, Error, NewUser, User, UserId, UserName, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorResponse;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, JsonObject, decode_object, field_error, json_config, parse_path_id, required,
};

const ID: FieldName = FieldName::new("id");
const NAME: FieldName = FieldName::new("name");
const EMAIL: FieldName = FieldName::new("email");
const AGE: FieldName = FieldName::new("age");

/// Stored user as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i64,
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = 36)]
    pub age: i32,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.get(),
            name: user.name.into(),
            email: user.email.into(),
            age: user.age.get(),
        }
    }
}

/// Response body for `GET /v1/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct GetUsersResponse {
    pub users: Vec<UserResponse>,
}

/// Request body for `POST /v1/users`. Unknown fields are ignored; the body
/// must be a JSON object.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 36)]
    pub age: Option<i32>,
}

/// Request body for `PUT /v1/users`: a full replace keyed by `id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 1)]
    pub id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Ada Lovelace")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "ada@example.com")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 37)]
    pub age: Option<i32>,
}

fn parse_fields(
    name: Option<String>,
    email: Option<String>,
    age: Option<i32>,
) -> Result<(UserName, EmailAddress, Age), Error> {
    let name = required(name, NAME, UserValidationError::EmptyName)?;
    let name = UserName::new(name).map_err(|err| field_error(NAME, err))?;
    let email = required(email, EMAIL, UserValidationError::MissingEmail)?;
    let email = EmailAddress::new(email).map_err(|err| field_error(EMAIL, err))?;
    let age = required(age, AGE, UserValidationError::MissingAge)?;
    let age = Age::new(age).map_err(|err| field_error(AGE, err))?;
    Ok((name, email, age))
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = Error;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        let (name, email, age) = parse_fields(value.name, value.email, value.age)?;
        Ok(Self { name, email, age })
    }
}

impl TryFrom<UpdateUserRequest> for User {
    type Error = Error;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        let id = required(value.id, ID, UserValidationError::MissingId)?;
        let id = UserId::assigned(id).map_err(|err| field_error(ID, err))?;
        let (name, email, age) = parse_fields(value.name, value.email, value.age)?;
        Ok(Self {
            id,
            name,
            email,
            age,
        })
    }
}

/// Mount the users routes under `/v1`.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_service::inbound::http::users::users_scope;
///
/// let app = App::new().service(users_scope());
/// ```
pub fn users_scope() -> Scope {
    web::scope("/v1")
        .app_data(json_config())
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user)
}

/// List every user.
#[utoipa::path(
    get,
    path = "/v1/users",
    responses(
        (status = 200, description = "Users", body = GetUsersResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<GetUsersResponse>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(GetUsersResponse {
        users: users.into_iter().map(UserResponse::from).collect(),
    }))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 400, description = "Identifier is not an integer", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_path_id(&path)?;
    let user = state.users.get_user(id).await?;
    Ok(web::Json(user.into()))
}

/// Create a user; the store assigns the identifier.
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "Created", body = UserResponse),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<JsonObject>,
) -> ApiResult<HttpResponse> {
    let request: CreateUserRequest = decode_object(payload.into_inner())?;
    let new_user = NewUser::try_from(request)?;
    let user = state.users_command.create_user(new_user).await?;
    info!(user_id = %user.id, "user created");
    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// Replace name, email and age of an existing user.
#[utoipa::path(
    put,
    path = "/v1/users",
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated; empty body"),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 409, description = "Email already in use", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users")]
pub async fn update_user(
    state: web::Data<HttpState>,
    payload: web::Json<JsonObject>,
) -> ApiResult<HttpResponse> {
    let request: UpdateUserRequest = decode_object(payload.into_inner())?;
    let user = User::try_from(request)?;
    let id = user.id;
    state.users_command.update_user(user).await?;
    info!(user_id = %id, "user updated");
    Ok(HttpResponse::Ok().finish())
}

/// Hard-delete a user.
#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    params(("id" = i64, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted; empty body"),
        (status = 400, description = "Identifier is not an integer", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_path_id(&path)?;
    state.users_command.delete_user(id).await?;
    info!(user_id = %id, "user deleted");
    Ok(HttpResponse::Ok().finish())
}
