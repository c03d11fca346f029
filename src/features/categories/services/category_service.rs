use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::core::error::{AppError, Result};
use crate::features::categories::clients::CategoryStore;
use crate::features::categories::models::{Category, CategoryId, CategoryPatch, NewCategory};
use crate::features::categories::services::cascade_executor::{
    BusyIds, CascadeExecutor, CascadeOutcome,
};
use crate::features::categories::tree::{plan_cascade, CategoryForest};
use crate::shared::slug::slugify;
use crate::shared::validation::{checked_slug, normalized_name};

/// Operator-entered category fields. The slug is never entered, it is
/// derived from the name on save.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryForm {
    pub name: String,
    pub is_active: bool,
    pub parent_id: Option<CategoryId>,
}

impl Default for CategoryForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            is_active: true,
            parent_id: None,
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(c: &Category) -> Self {
        Self {
            name: c.name.clone(),
            is_active: c.is_active,
            parent_id: c.parent_id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveTarget {
    Create,
    Edit(CategoryId),
}

/// Result of a visibility toggle, with the forest to render afterwards
#[derive(Debug)]
pub struct VisibilityChange {
    pub outcome: CascadeOutcome,
    pub forest: Arc<CategoryForest>,
    pub refresh_error: Option<String>,
}

/// Coordinates category mutations and keeps the last fetched forest.
///
/// Every successful mutation is followed by a full re-fetch; responses of
/// the mutations themselves are never merged into the snapshot.
pub struct CategoryService {
    store: Arc<dyn CategoryStore>,
    executor: CascadeExecutor,
    snapshot: RwLock<Option<Arc<CategoryForest>>>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CategoryStore>) -> Self {
        let executor = CascadeExecutor::new(Arc::clone(&store), BusyIds::default());
        Self {
            store,
            executor,
            snapshot: RwLock::new(None),
        }
    }

    /// Fetch the full list and replace the snapshot
    pub async fn list_tree(&self) -> Result<Arc<CategoryForest>> {
        let categories = self.store.list().await?;
        Ok(self.replace_snapshot(categories).await)
    }

    /// Last fetched forest, fetching one if nothing was loaded yet
    pub async fn current(&self) -> Result<Arc<CategoryForest>> {
        if let Some(forest) = self.snapshot.read().await.as_ref() {
            return Ok(Arc::clone(forest));
        }
        self.list_tree().await
    }

    async fn replace_snapshot(&self, categories: Vec<Category>) -> Arc<CategoryForest> {
        let forest = Arc::new(CategoryForest::build(categories));
        *self.snapshot.write().await = Some(Arc::clone(&forest));
        forest
    }

    pub fn busy_ids(&self) -> HashSet<CategoryId> {
        self.executor.busy().snapshot()
    }

    /// Validate the form and derive the record to send
    fn prepare(target: SaveTarget, form: &CategoryForm) -> Result<NewCategory> {
        let name = normalized_name(&form.name, "Name")?;
        let slug = checked_slug(slugify(&name), "use a longer name with latin or cyrillic letters")?;

        if let (SaveTarget::Edit(id), Some(parent_id)) = (target, form.parent_id) {
            if id == parent_id {
                return Err(AppError::Validation(
                    "A category cannot be its own parent".to_string(),
                ));
            }
        }

        Ok(NewCategory {
            name,
            slug,
            is_active: form.is_active,
            parent_id: form.parent_id,
        })
    }

    /// Create or edit one category, then re-fetch
    pub async fn save(&self, target: SaveTarget, form: &CategoryForm) -> Result<Arc<CategoryForest>> {
        let record = Self::prepare(target, form)?;

        match target {
            SaveTarget::Create => {
                let created = self.store.create(&record).await?;
                tracing::info!("Created category {} '{}'", created.id, created.name);
            }
            SaveTarget::Edit(id) => {
                self.store.update(id, &CategoryPatch::from(record)).await?;
                tracing::info!("Updated category {}", id);
            }
        }

        self.list_tree().await
    }

    /// Delete one category once the operator has confirmed it
    pub async fn delete(&self, id: CategoryId, confirmed: bool) -> Result<Arc<CategoryForest>> {
        if !confirmed {
            return Err(AppError::ConfirmationRequired(format!(
                "Deleting category {} must be confirmed",
                id
            )));
        }

        self.store.delete(id).await?;
        tracing::info!("Deleted category {}", id);

        self.list_tree().await
    }

    /// Set `is_active` on a category and its whole subtree
    pub async fn toggle_visibility(
        &self,
        id: CategoryId,
        next_active: bool,
    ) -> Result<VisibilityChange> {
        let forest = self.current().await?;
        let ids = forest
            .node(id)
            .map(plan_cascade)
            .ok_or_else(|| AppError::NotFound(format!("Category {} not found", id)))?;

        let report = self.executor.apply(&ids, next_active).await?;

        let forest = match report.snapshot {
            Some(categories) => self.replace_snapshot(categories).await,
            None => forest,
        };

        Ok(VisibilityChange {
            outcome: report.outcome,
            forest,
            refresh_error: report.refresh_error,
        })
    }

    /// Candidate parents: root categories in display order, minus the one being edited
    pub async fn parent_options(&self, editing: Option<CategoryId>) -> Result<Vec<Category>> {
        let forest = self.current().await?;
        Ok(forest
            .roots()
            .filter(|node| node.category().parent_id.is_none())
            .filter(|node| Some(node.id()) != editing)
            .map(|node| node.category().clone())
            .collect())
    }
}
