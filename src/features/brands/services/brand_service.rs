use std::sync::Arc;

use reqwest::Method;
use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::core::remote;
use crate::features::auth::clients::AuthenticatedClient;
use crate::features::brands::dtos::SaveBrandDto;
use crate::features::brands::models::{Brand, BrandId, BrandPayload};
use crate::shared::constants::{item_path, BRANDS_PATH};
use crate::shared::slug::slugify;
use crate::shared::validation::{checked_slug, normalized_name};

/// Brand management. Saved brands are merged into the cached list by id
/// instead of re-fetching the whole list.
pub struct BrandService {
    client: Arc<AuthenticatedClient>,
    brands: RwLock<Vec<Brand>>,
}

impl BrandService {
    pub fn new(client: Arc<AuthenticatedClient>) -> Self {
        Self {
            client,
            brands: RwLock::new(Vec::new()),
        }
    }

    /// Fetch all brands, ordered by id
    pub async fn list(&self) -> Result<Vec<Brand>> {
        tracing::debug!("Fetching brand list");
        let response = self.client.send(Method::GET, BRANDS_PATH).await?;
        let mut brands: Vec<Brand> = remote::expect_json(response).await?;
        brands.sort_by_key(|b| b.id);

        *self.brands.write().await = brands.clone();
        Ok(brands)
    }

    fn payload(editing: Option<BrandId>, dto: SaveBrandDto) -> Result<BrandPayload> {
        let name = normalized_name(&dto.name, "Name")?;
        let entered = dto.slug.as_deref().map(str::trim).unwrap_or_default();
        let slug = if entered.is_empty() && editing.is_none() {
            slugify(&name)
        } else {
            entered.to_string()
        };
        let slug = checked_slug(slug, "enter a slug or a longer name")?;

        let description = dto
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(BrandPayload {
            name,
            slug,
            is_active: dto.is_active,
            description,
        })
    }

    /// Create (`editing` is `None`) or edit a brand and return the saved record
    pub async fn save(&self, editing: Option<BrandId>, dto: SaveBrandDto) -> Result<Brand> {
        let payload = Self::payload(editing, dto)?;

        let response = match editing {
            Some(id) => {
                tracing::debug!("Patching brand {}", id);
                self.client
                    .send_json(Method::PATCH, &item_path(BRANDS_PATH, id), &payload)
                    .await?
            }
            None => {
                tracing::debug!("Creating brand '{}'", payload.name);
                self.client
                    .send_json(Method::POST, BRANDS_PATH, &payload)
                    .await?
            }
        };
        let saved: Brand = remote::expect_json(response).await?;
        tracing::info!("Saved brand {} '{}'", saved.id, saved.name);

        let mut brands = self.brands.write().await;
        match brands.iter_mut().find(|b| b.id == saved.id) {
            Some(existing) => *existing = saved.clone(),
            None => brands.push(saved.clone()),
        }
        brands.sort_by_key(|b| b.id);

        Ok(saved)
    }

    /// Brands as last fetched or saved
    pub async fn cached(&self) -> Vec<Brand> {
        self.brands.read().await.clone()
    }

    pub async fn delete(&self, id: BrandId, confirmed: bool) -> Result<()> {
        if !confirmed {
            return Err(AppError::ConfirmationRequired(format!(
                "Deleting brand {} must be confirmed",
                id
            )));
        }

        tracing::debug!("Deleting brand {}", id);
        let response = self
            .client
            .send(Method::DELETE, &item_path(BRANDS_PATH, id))
            .await?;
        remote::expect_success(response).await?;
        tracing::info!("Deleted brand {}", id);

        self.brands.write().await.retain(|b| b.id != id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::RemoteApiConfig;
    use crate::features::auth::session::SessionStore;
    use crate::shared::test_helpers::{spawn_server, RequestLog};
    use axum::{
        extract::{Path, State},
        http::StatusCode,
        routing::{get, patch},
        Json, Router,
    };
    use serde_json::{json, Value};

    async fn service() -> (BrandService, RequestLog) {
        let log = RequestLog::default();
        let router = Router::new()
            .route(
                "/api/v1/brands",
                get(|| async {
                    Json(json!([
                        {"id": 7, "name": "Puma", "slug": "puma", "is_active": true},
                        {"id": 2, "name": "Nike", "slug": "nike", "is_active": true, "image_path": "/media/nike.png"}
                    ]))
                })
                .post(|State(log): State<RequestLog>, Json(body): Json<Value>| async move {
                    log.push(format!("POST {}", body));
                    let mut brand = body.clone();
                    brand["id"] = json!(9);
                    (StatusCode::CREATED, Json(brand))
                }),
            )
            .route(
                "/api/v1/brands/{id}",
                patch(
                    |State(log): State<RequestLog>, Path(id): Path<i64>, Json(body): Json<Value>| async move {
                        log.push(format!("PATCH {} {}", id, body));
                        let mut brand = body.clone();
                        brand["id"] = json!(id);
                        Json(brand)
                    },
                )
                .delete(|State(log): State<RequestLog>, Path(id): Path<i64>| async move {
                    log.push(format!("DELETE {}", id));
                    StatusCode::NO_CONTENT
                }),
            )
            .with_state(log.clone());

        let base = spawn_server(router).await;
        let client = AuthenticatedClient::new(
            RemoteApiConfig::new(base.clone(), base),
            Arc::new(SessionStore::new()),
        )
        .unwrap();
        (BrandService::new(Arc::new(client)), log)
    }

    fn dto(name: &str, slug: Option<&str>) -> SaveBrandDto {
        SaveBrandDto {
            name: name.to_string(),
            slug: slug.map(str::to_string),
            is_active: true,
            description: Some("  ".to_string()),
        }
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let (service, _) = service().await;
        let ids: Vec<_> = service.list().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 7]);
    }

    #[tokio::test]
    async fn test_create_derives_slug_and_merges() {
        let (service, log) = service().await;
        service.list().await.unwrap();

        let saved = service.save(None, dto("Ёлка Спорт", None)).await.unwrap();

        assert_eq!(saved.slug, "elka-sport");
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        let sent: Value = serde_json::from_str(entries[0].trim_start_matches("POST ")).unwrap();
        assert_eq!(
            sent,
            json!({"name": "Ёлка Спорт", "slug": "elka-sport", "is_active": true, "description": null})
        );
        let ids: Vec<_> = service.cached().await.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![2, 7, 9]);
    }

    #[tokio::test]
    async fn test_edit_keeps_entered_slug() {
        let (service, log) = service().await;
        service.list().await.unwrap();

        let saved = service
            .save(Some(7), dto("Puma Sport", Some("puma")))
            .await
            .unwrap();

        assert_eq!(saved.slug, "puma");
        assert_eq!(service.cached().await[1].name, "Puma Sport");
        assert_eq!(log.entries().len(), 1);

        let err = service.save(Some(7), dto("Puma", None)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(log.entries().len(), 1);
    }

    #[tokio::test]
    async fn test_delete_requires_confirmation() {
        let (service, log) = service().await;
        service.list().await.unwrap();

        assert!(matches!(
            service.delete(2, false).await,
            Err(AppError::ConfirmationRequired(_))
        ));
        assert!(log.entries().is_empty());

        service.delete(2, true).await.unwrap();
        assert_eq!(log.entries(), vec!["DELETE 2"]);
        assert_eq!(service.cached().await.len(), 1);
    }
}
