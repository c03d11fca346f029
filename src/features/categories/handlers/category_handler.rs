use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::core::extractor::{AppJson, Confirmation};
use crate::features::categories::dtos::{
    CategoryTreeDto, ParentOptionDto, ParentOptionsQuery, SaveCategoryDto, SlugPreviewDto,
    SlugPreviewQuery, ToggleVisibilityDto, VisibilityChangeDto,
};
use crate::features::categories::models::CategoryId;
use crate::features::categories::services::{
    CascadeOutcome, CategoryService, SaveTarget,
};
use crate::features::categories::tree::CategoryForest;
use crate::shared::types::{ApiResponse, Meta};

fn tree_response(
    service: &CategoryService,
    forest: &CategoryForest,
    message: Option<String>,
) -> Json<ApiResponse<Vec<CategoryTreeDto>>> {
    let tree = CategoryTreeDto::render(forest, &service.busy_ids());
    Json(ApiResponse::success(
        Some(tree),
        message,
        Some(Meta::total(forest.len())),
    ))
}

/// Fetch all categories and return them as an ordered tree
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Category tree", body = ApiResponse<Vec<CategoryTreeDto>>),
        (status = 401, description = "No console session"),
        (status = 502, description = "Catalog service unavailable")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<Arc<CategoryService>>,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    let forest = service.list_tree().await?;
    Ok(tree_response(&service, &forest, None))
}

/// Root categories a category can be moved under
#[utoipa::path(
    get,
    path = "/api/categories/parent-options",
    params(ParentOptionsQuery),
    responses(
        (status = 200, description = "Parent candidates", body = ApiResponse<Vec<ParentOptionDto>>)
    ),
    tag = "categories"
)]
pub async fn parent_options(
    State(service): State<Arc<CategoryService>>,
    Query(query): Query<ParentOptionsQuery>,
) -> Result<Json<ApiResponse<Vec<ParentOptionDto>>>> {
    let options: Vec<ParentOptionDto> = service
        .parent_options(query.editing)
        .await?
        .into_iter()
        .map(ParentOptionDto::from)
        .collect();
    let total = options.len();
    Ok(Json(ApiResponse::success(
        Some(options),
        None,
        Some(Meta::total(total)),
    )))
}

/// Preview the slug that would be saved for a name
#[utoipa::path(
    get,
    path = "/api/categories/slug-preview",
    params(SlugPreviewQuery),
    responses(
        (status = 200, description = "Derived slug", body = ApiResponse<SlugPreviewDto>)
    ),
    tag = "categories"
)]
pub async fn slug_preview(
    Query(query): Query<SlugPreviewQuery>,
) -> Json<ApiResponse<SlugPreviewDto>> {
    Json(ApiResponse::success(
        Some(SlugPreviewDto::for_name(&query.name)),
        None,
        None,
    ))
}

/// Create a category
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = SaveCategoryDto,
    responses(
        (status = 201, description = "Category created, tree re-fetched", body = ApiResponse<Vec<CategoryTreeDto>>),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Catalog service error")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<Arc<CategoryService>>,
    AppJson(dto): AppJson<SaveCategoryDto>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<CategoryTreeDto>>>)> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let forest = service.save(SaveTarget::Create, &dto.into()).await?;
    Ok((
        StatusCode::CREATED,
        tree_response(&service, &forest, Some("Category created".to_string())),
    ))
}

/// Edit a category's name, visibility and parent
#[utoipa::path(
    patch,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = SaveCategoryDto,
    responses(
        (status = 200, description = "Category updated, tree re-fetched", body = ApiResponse<Vec<CategoryTreeDto>>),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Catalog service error")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<CategoryId>,
    AppJson(dto): AppJson<SaveCategoryDto>,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    dto.validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let forest = service.save(SaveTarget::Edit(id), &dto.into()).await?;
    Ok(tree_response(
        &service,
        &forest,
        Some("Category updated".to_string()),
    ))
}

/// Delete a category. Requires `?confirm=true` or the `X-Confirm-Delete` header.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID"),
        ("confirm" = Option<bool>, Query, description = "Confirm the deletion")
    ),
    responses(
        (status = 200, description = "Category deleted, tree re-fetched", body = ApiResponse<Vec<CategoryTreeDto>>),
        (status = 428, description = "Deletion not confirmed"),
        (status = 502, description = "Catalog service error")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<CategoryId>,
    Confirmation(confirmed): Confirmation,
) -> Result<Json<ApiResponse<Vec<CategoryTreeDto>>>> {
    let forest = service.delete(id, confirmed).await?;
    Ok(tree_response(
        &service,
        &forest,
        Some("Category deleted".to_string()),
    ))
}

/// Show or hide a category together with its whole subtree
#[utoipa::path(
    put,
    path = "/api/categories/{id}/visibility",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = ToggleVisibilityDto,
    responses(
        (status = 200, description = "Every category in the subtree updated", body = ApiResponse<VisibilityChangeDto>),
        (status = 404, description = "Category not in the current snapshot"),
        (status = 409, description = "A change touching these categories is in flight"),
        (status = 502, description = "Stopped part-way, see the outcome", body = ApiResponse<VisibilityChangeDto>)
    ),
    tag = "categories"
)]
pub async fn set_visibility(
    State(service): State<Arc<CategoryService>>,
    Path(id): Path<CategoryId>,
    AppJson(dto): AppJson<ToggleVisibilityDto>,
) -> Result<(StatusCode, Json<ApiResponse<VisibilityChangeDto>>)> {
    let change = service.toggle_visibility(id, dto.is_active).await?;
    let body = VisibilityChangeDto::new(change, &service.busy_ids());

    let (status, message) = match &body.outcome {
        CascadeOutcome::Applied { ids } => (
            StatusCode::OK,
            format!("Visibility updated for {} categories", ids.len()),
        ),
        CascadeOutcome::PartiallyApplied {
            applied,
            failed_id,
            reason,
            ..
        } => (
            StatusCode::BAD_GATEWAY,
            format!(
                "Stopped at category {} after {} updates: {}",
                failed_id,
                applied.len(),
                reason
            ),
        ),
    };

    if status.is_success() {
        Ok((
            status,
            Json(ApiResponse::success(Some(body), Some(message), None)),
        ))
    } else {
        Ok((status, Json(ApiResponse::failure(body, message))))
    }
}
