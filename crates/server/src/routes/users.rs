use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use service::auth::{domain::LoginInput, domain::LoginSession, errors::AuthError};
use service::user::domain::{NewUser, UserPatch, UserView};
use tracing::{error, info};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath};
use crate::metrics::record_login;
use crate::state::ServerState;

pub const LOGIN_FAILED_MESSAGE: &str = "Invalid username or password";

#[derive(Serialize)]
struct LoginSuccess {
    success: bool,
    #[serde(flatten)]
    session: LoginSession,
}

#[derive(Serialize)]
struct LoginFailure {
    success: bool,
    message: &'static str,
}

#[utoipa::path(
    post, path = "/user/add", tag = "user", operation_id = "create_user",
    request_body = crate::openapi::NewUserDoc,
    responses(
        (status = 200, description = "Created", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Username taken")
    )
)]
pub async fn create(State(state): State<ServerState>, ApiJson(input): ApiJson<NewUser>) -> Result<Json<UserView>, JsonApiError> {
    Ok(Json(state.users.create(input).await?))
}

#[utoipa::path(
    get, path = "/user/getall", tag = "user", operation_id = "list_users",
    responses((status = 200, description = "All users", body = [crate::openapi::UserDoc]))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<UserView>>, JsonApiError> {
    let users = state.users.list().await?;
    info!(count = users.len(), "list users");
    Ok(Json(users))
}

#[utoipa::path(
    get, path = "/user/{id}", tag = "user", operation_id = "get_user",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<Json<UserView>, JsonApiError> {
    Ok(Json(state.users.get(id).await?))
}

#[utoipa::path(
    get, path = "/user/name/{username}", tag = "user", operation_id = "get_user_by_username",
    params(("username" = String, Path, description = "Exact username")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::UserDoc),
        (status = 404, description = "Plain-text message")
    )
)]
pub async fn get_by_username(State(state): State<ServerState>, ApiPath(username): ApiPath<String>) -> Response {
    match state.users.get_by_uname(&username).await {
        Ok(Some(user)) => Json(user).into_response(),
        Ok(None) => (StatusCode::NOT_FOUND, format!("User not found with username {username}")).into_response(),
        Err(e) => JsonApiError::from(e).into_response(),
    }
}

#[utoipa::path(
    put, path = "/user/update/{id}", tag = "user", operation_id = "update_user",
    params(("id" = i32, Path, description = "User ID")),
    request_body = crate::openapi::UserPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::UserDoc),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Username taken")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<UserPatch>,
) -> Result<Json<UserView>, JsonApiError> {
    Ok(Json(state.users.update(id, patch).await?))
}

#[utoipa::path(
    delete, path = "/user/delete/{id}", tag = "user", operation_id = "delete_user",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "Confirmation text"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(State(state): State<ServerState>, ApiPath(id): ApiPath<i32>) -> Result<String, JsonApiError> {
    state.users.delete(id).await?;
    Ok(format!("User with ID {id} has been deleted"))
}

#[utoipa::path(
    post, path = "/user/login", tag = "auth", operation_id = "login",
    request_body = crate::openapi::LoginRequest,
    responses(
        (status = 200, description = "Logged in", body = crate::openapi::LoginSuccessDoc),
        (status = 401, description = "Invalid username or password", body = crate::openapi::LoginFailureDoc)
    )
)]
pub async fn login(State(state): State<ServerState>, ApiJson(input): ApiJson<LoginInput>) -> Response {
    match state.auth.login(input).await {
        Ok(session) => {
            record_login("success");
            (StatusCode::OK, Json(LoginSuccess { success: true, session })).into_response()
        }
        Err(AuthError::Unauthorized) => {
            record_login("rejected");
            (StatusCode::UNAUTHORIZED, Json(LoginFailure { success: false, message: LOGIN_FAILED_MESSAGE }))
                .into_response()
        }
        Err(e) => {
            record_login("error");
            error!(err = %e, code = e.code(), "login failed");
            JsonApiError::internal().into_response()
        }
    }
}
