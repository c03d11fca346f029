use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, Confirmation};
use crate::features::brands::dtos::SaveBrandDto;
use crate::features::brands::models::{Brand, BrandId};
use crate::features::brands::services::BrandService;
use crate::shared::types::{ApiResponse, Meta};

/// List brands ordered by id
#[utoipa::path(
    get,
    path = "/api/brands",
    responses(
        (status = 200, description = "Brands", body = ApiResponse<Vec<Brand>>),
        (status = 502, description = "Catalog service unavailable")
    ),
    tag = "brands"
)]
pub async fn list_brands(
    State(service): State<Arc<BrandService>>,
) -> Result<Json<ApiResponse<Vec<Brand>>>> {
    let brands = service.list().await?;
    let total = brands.len();
    Ok(Json(ApiResponse::success(
        Some(brands),
        None,
        Some(Meta::total(total)),
    )))
}

/// Create a brand
#[utoipa::path(
    post,
    path = "/api/brands",
    request_body = SaveBrandDto,
    responses(
        (status = 201, description = "Brand created", body = ApiResponse<Brand>),
        (status = 400, description = "Validation error")
    ),
    tag = "brands"
)]
pub async fn create_brand(
    State(service): State<Arc<BrandService>>,
    AppJson(dto): AppJson<SaveBrandDto>,
) -> Result<(StatusCode, Json<ApiResponse<Brand>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let brand = service.save(None, dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            Some(brand),
            Some("Brand created".to_string()),
            None,
        )),
    ))
}

/// Edit a brand
#[utoipa::path(
    patch,
    path = "/api/brands/{id}",
    params(
        ("id" = i64, Path, description = "Brand ID")
    ),
    request_body = SaveBrandDto,
    responses(
        (status = 200, description = "Brand updated", body = ApiResponse<Brand>),
        (status = 400, description = "Validation error")
    ),
    tag = "brands"
)]
pub async fn update_brand(
    State(service): State<Arc<BrandService>>,
    Path(id): Path<BrandId>,
    AppJson(dto): AppJson<SaveBrandDto>,
) -> Result<Json<ApiResponse<Brand>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let brand = service.save(Some(id), dto).await?;
    Ok(Json(ApiResponse::success(
        Some(brand),
        Some("Brand updated".to_string()),
        None,
    )))
}

/// Delete a brand. Requires `?confirm=true` or the `X-Confirm-Delete` header.
#[utoipa::path(
    delete,
    path = "/api/brands/{id}",
    params(
        ("id" = i64, Path, description = "Brand ID"),
        ("confirm" = Option<bool>, Query, description = "Confirm the deletion")
    ),
    responses(
        (status = 200, description = "Brand deleted"),
        (status = 428, description = "Deletion not confirmed")
    ),
    tag = "brands"
)]
pub async fn delete_brand(
    State(service): State<Arc<BrandService>>,
    Path(id): Path<BrandId>,
    Confirmation(confirmed): Confirmation,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id, confirmed).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Brand deleted".to_string()),
        None,
    )))
}
