use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use crate::core::error::{AppError, Result};
use crate::features::categories::clients::CategoryStore;
use crate::features::categories::models::{Category, CategoryId, CategoryPatch, NewCategory};

pub fn category(id: CategoryId, name: &str, is_active: bool, parent_id: Option<CategoryId>) -> Category {
    Category {
        id,
        name: name.to_string(),
        slug: crate::shared::slug::slugify(name),
        is_active,
        parent_id,
    }
}

/// Serve `router` on an ephemeral loopback port and return its base URL
pub async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Shared log of requests seen by a fake service
#[derive(Debug, Clone, Default)]
pub struct RequestLog(Arc<Mutex<Vec<String>>>);

impl RequestLog {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

/// In-memory catalog that applies mutations and records every call
#[derive(Default)]
pub struct InMemoryCategoryStore {
    records: Mutex<Vec<Category>>,
    failing: Mutex<HashSet<CategoryId>>,
    fail_list: Mutex<bool>,
    calls: RequestLog,
}

impl InMemoryCategoryStore {
    pub fn with(records: Vec<Category>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            ..Default::default()
        })
    }

    /// Mutations of `id` answer HTTP 500 with a `detail`
    pub fn fail_on(&self, id: CategoryId) {
        self.failing.lock().unwrap().insert(id);
    }

    pub fn fail_listing(&self) {
        *self.fail_list.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.entries()
    }

    /// Calls other than list fetches
    pub fn mutations(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c != "GET")
            .collect()
    }

    pub fn list_count(&self) -> usize {
        self.calls().iter().filter(|c| *c == "GET").count()
    }

    pub fn record(&self, id: CategoryId) -> Option<Category> {
        self.records.lock().unwrap().iter().find(|c| c.id == id).cloned()
    }

    fn check(&self, id: CategoryId) -> Result<()> {
        if self.failing.lock().unwrap().contains(&id) {
            return Err(AppError::Remote {
                status: 500,
                message: format!("Category {} is locked", id),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn list(&self) -> Result<Vec<Category>> {
        self.calls.push("GET".to_string());
        if *self.fail_list.lock().unwrap() {
            return Err(AppError::Transport("catalog unreachable".to_string()));
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn create(&self, new: &NewCategory) -> Result<Category> {
        self.calls.push(format!("POST {}", new.slug));
        let mut records = self.records.lock().unwrap();
        let id = records.iter().map(|c| c.id).max().unwrap_or(0) + 1;
        let created = Category {
            id,
            name: new.name.clone(),
            slug: new.slug.clone(),
            is_active: new.is_active,
            parent_id: new.parent_id,
        };
        records.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: CategoryId, patch: &CategoryPatch) -> Result<Category> {
        self.calls.push(format!(
            "PATCH {} {}",
            id,
            serde_json::to_string(patch).unwrap()
        ));
        self.check(id)?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::Remote {
                status: 404,
                message: "Category not found".to_string(),
            })?;
        if let Some(name) = &patch.name {
            record.name = name.clone();
        }
        if let Some(slug) = &patch.slug {
            record.slug = slug.clone();
        }
        if let Some(is_active) = patch.is_active {
            record.is_active = is_active;
        }
        if let Some(parent_id) = patch.parent_id {
            record.parent_id = parent_id;
        }
        Ok(record.clone())
    }

    async fn delete(&self, id: CategoryId) -> Result<()> {
        self.calls.push(format!("DELETE {}", id));
        self.check(id)?;
        self.records.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }
}
