use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use crate::core::error::Result;
use crate::core::remote;
use crate::features::auth::clients::AuthenticatedClient;
use crate::features::categories::models::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::shared::constants::{item_path, CATEGORIES_PATH};

/// Remote store that owns canonical category state.
///
/// Only single-record mutations exist; there is no bulk update.
#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>>;

    async fn create(&self, category: &NewCategory) -> Result<Category>;

    async fn update(&self, id: CategoryId, patch: &CategoryPatch) -> Result<Category>;

    async fn delete(&self, id: CategoryId) -> Result<()>;
}

/// `CategoryStore` backed by the catalog service's `/api/v1/categories/` endpoints
pub struct HttpCategoryStore {
    client: Arc<AuthenticatedClient>,
}

impl HttpCategoryStore {
    pub fn new(client: Arc<AuthenticatedClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CategoryStore for HttpCategoryStore {
    async fn list(&self) -> Result<Vec<Category>> {
        tracing::debug!("Fetching category list");
        let response = self.client.send(Method::GET, CATEGORIES_PATH).await?;
        remote::expect_json(response).await
    }

    async fn create(&self, category: &NewCategory) -> Result<Category> {
        tracing::debug!("Creating category '{}'", category.name);
        let response = self
            .client
            .send_json(Method::POST, CATEGORIES_PATH, category)
            .await?;
        remote::expect_json(response).await
    }

    async fn update(&self, id: CategoryId, patch: &CategoryPatch) -> Result<Category> {
        tracing::debug!("Patching category {}", id);
        let response = self
            .client
            .send_json(Method::PATCH, &item_path(CATEGORIES_PATH, id), patch)
            .await?;
        remote::expect_json(response).await
    }

    async fn delete(&self, id: CategoryId) -> Result<()> {
        tracing::debug!("Deleting category {}", id);
        let response = self
            .client
            .send(Method::DELETE, &item_path(CATEGORIES_PATH, id))
            .await?;
        remote::expect_success(response).await
    }
}
