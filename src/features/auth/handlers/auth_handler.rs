use crate::core::error::{AppError, Result};
use crate::core::extractor::AppJson;
use crate::features::auth::dtos::{
    ConfirmRequestDto, LoginCodeSentDto, LoginRequestDto, SessionDto,
};
use crate::features::auth::services::AuthService;
use crate::shared::types::ApiResponse;
use axum::{extract::State, Json};
use std::sync::Arc;
use validator::Validate;

/// Request a one-time login code by e-mail
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Code sent", body = ApiResponse<LoginCodeSentDto>),
        (status = 400, description = "Validation error"),
        (status = 429, description = "Code requested too often")
    ),
    tag = "auth"
)]
pub async fn login(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginCodeSentDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let sent = service.request_code(dto).await?;
    Ok(Json(ApiResponse::success(
        Some(sent),
        Some("Code sent, check your inbox".to_string()),
        None,
    )))
}

/// Confirm the one-time code and open the console session
#[utoipa::path(
    post,
    path = "/api/auth/confirm",
    request_body = ConfirmRequestDto,
    responses(
        (status = 200, description = "Session opened", body = ApiResponse<SessionDto>),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Invalid or expired code"),
        (status = 429, description = "Too many attempts")
    ),
    tag = "auth"
)]
pub async fn confirm(
    State(service): State<Arc<AuthService>>,
    AppJson(dto): AppJson<ConfirmRequestDto>,
) -> Result<Json<ApiResponse<SessionDto>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let session = service.confirm(dto).await?;
    Ok(Json(ApiResponse::success(Some(session), None, None)))
}

/// Close the console session
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Session closed", body = ApiResponse<SessionDto>)
    ),
    tag = "auth"
)]
pub async fn logout(State(service): State<Arc<AuthService>>) -> Json<ApiResponse<SessionDto>> {
    Json(ApiResponse::success(Some(service.logout().await), None, None))
}

/// Report whether the console holds an access token
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session state", body = ApiResponse<SessionDto>)
    ),
    tag = "auth"
)]
pub async fn get_session(State(service): State<Arc<AuthService>>) -> Json<ApiResponse<SessionDto>> {
    Json(ApiResponse::success(Some(service.session().await), None, None))
}
