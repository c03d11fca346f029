use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, Confirmation};
use crate::features::users::dtos::SaveUserDto;
use crate::features::users::models::{User, UserId};
use crate::features::users::services::UserService;
use crate::shared::types::{ApiResponse, Meta};

fn users_response(users: Vec<User>, message: Option<String>) -> Json<ApiResponse<Vec<User>>> {
    let total = users.len();
    Json(ApiResponse::success(
        Some(users),
        message,
        Some(Meta::total(total)),
    ))
}

/// List console users
#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "Users", body = ApiResponse<Vec<User>>)
    ),
    tag = "users"
)]
pub async fn list_users(
    State(service): State<Arc<UserService>>,
) -> Result<Json<ApiResponse<Vec<User>>>> {
    let users = service.list().await?;
    Ok(users_response(users, None))
}

/// Create a user, returns the re-fetched list
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = SaveUserDto,
    responses(
        (status = 201, description = "User created", body = ApiResponse<Vec<User>>),
        (status = 400, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(service): State<Arc<UserService>>,
    AppJson(dto): AppJson<SaveUserDto>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<User>>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let users = service.save(None, dto).await?;
    Ok((
        StatusCode::CREATED,
        users_response(users, Some("User created".to_string())),
    ))
}

/// Edit a user, returns the re-fetched list
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID")
    ),
    request_body = SaveUserDto,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<Vec<User>>),
        (status = 400, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn update_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<UserId>,
    AppJson(dto): AppJson<SaveUserDto>,
) -> Result<Json<ApiResponse<Vec<User>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let users = service.save(Some(id), dto).await?;
    Ok(users_response(users, Some("User updated".to_string())))
}

/// Delete a user. Requires `?confirm=true` or the `X-Confirm-Delete` header.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(
        ("id" = i64, Path, description = "User ID"),
        ("confirm" = Option<bool>, Query, description = "Confirm the deletion")
    ),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<Vec<User>>),
        (status = 428, description = "Deletion not confirmed")
    ),
    tag = "users"
)]
pub async fn delete_user(
    State(service): State<Arc<UserService>>,
    Path(id): Path<UserId>,
    Confirmation(confirmed): Confirmation,
) -> Result<Json<ApiResponse<Vec<User>>>> {
    let users = service.delete(id, confirmed).await?;
    Ok(users_response(users, Some("User deleted".to_string())))
}
