use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use utoipa::ToSchema;

use crate::core::error::{AppError, Result};
use crate::features::categories::clients::CategoryStore;
use crate::features::categories::models::{Category, CategoryId, CategoryPatch};

/// Ids with a mutation in flight.
///
/// Advisory only: it guards overlapping cascades inside this console
/// process and nothing else.
#[derive(Debug, Clone, Default)]
pub struct BusyIds(Arc<Mutex<HashSet<CategoryId>>>);

impl BusyIds {
    fn lock(&self) -> MutexGuard<'_, HashSet<CategoryId>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Mark every id busy, or none of them if any is already taken
    pub fn acquire(&self, ids: &[CategoryId]) -> Result<BusyGuard> {
        let mut busy = self.lock();
        if let Some(taken) = ids.iter().find(|id| busy.contains(*id)) {
            return Err(AppError::Conflict(format!(
                "Category {} is already being updated",
                taken
            )));
        }
        busy.extend(ids.iter().copied());

        Ok(BusyGuard {
            registry: self.clone(),
            ids: ids.to_vec(),
        })
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.lock().contains(&id)
    }

    pub fn snapshot(&self) -> HashSet<CategoryId> {
        self.lock().clone()
    }
}

/// Releases its ids when dropped
#[derive(Debug)]
pub struct BusyGuard {
    registry: BusyIds,
    ids: Vec<CategoryId>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let mut busy = self.registry.lock();
        for id in &self.ids {
            busy.remove(id);
        }
    }
}

/// What happened to the planned ids
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CascadeOutcome {
    Applied {
        ids: Vec<CategoryId>,
    },
    /// Stopped at the first failure. `applied` stay changed, `skipped` were never sent.
    PartiallyApplied {
        applied: Vec<CategoryId>,
        failed_id: CategoryId,
        reason: String,
        skipped: Vec<CategoryId>,
    },
}

#[derive(Debug)]
pub struct CascadeReport {
    pub outcome: CascadeOutcome,
    /// Fresh list fetched after the cascade, `None` when that fetch failed
    pub snapshot: Option<Vec<Category>>,
    pub refresh_error: Option<String>,
}

impl CascadeReport {
    pub fn is_complete(&self) -> bool {
        matches!(self.outcome, CascadeOutcome::Applied { .. })
    }
}

/// Applies one visibility value to a list of categories
pub struct CascadeExecutor {
    store: Arc<dyn CategoryStore>,
    busy: BusyIds,
}

impl CascadeExecutor {
    pub fn new(store: Arc<dyn CategoryStore>, busy: BusyIds) -> Self {
        Self { store, busy }
    }

    pub fn busy(&self) -> &BusyIds {
        &self.busy
    }

    /// Patch `is_active` on each id in order, stopping at the first failure.
    ///
    /// Nothing already applied is rolled back. Locks are released before the
    /// single re-fetch that follows, whatever the outcome.
    pub async fn apply(&self, ids: &[CategoryId], next_active: bool) -> Result<CascadeReport> {
        let guard = self.busy.acquire(ids)?;

        tracing::debug!(
            "Cascading is_active={} to {} categories",
            next_active,
            ids.len()
        );

        let patch = CategoryPatch::visibility(next_active);
        let mut outcome = CascadeOutcome::Applied { ids: ids.to_vec() };

        for (index, &id) in ids.iter().enumerate() {
            if let Err(e) = self.store.update(id, &patch).await {
                let reason = e.user_message();
                tracing::warn!(
                    "Cascade stopped at category {} after {} updates: {}",
                    id,
                    index,
                    reason
                );
                outcome = CascadeOutcome::PartiallyApplied {
                    applied: ids[..index].to_vec(),
                    failed_id: id,
                    reason,
                    skipped: ids[index + 1..].to_vec(),
                };
                break;
            }
        }

        drop(guard);

        if matches!(outcome, CascadeOutcome::Applied { .. }) {
            tracing::info!(
                "Set is_active={} on {} categories",
                next_active,
                ids.len()
            );
        }

        let (snapshot, refresh_error) = match self.store.list().await {
            Ok(categories) => (Some(categories), None),
            Err(e) => {
                tracing::warn!("Failed to re-fetch categories after cascade: {}", e);
                (None, Some(e.user_message()))
            }
        };

        Ok(CascadeReport {
            outcome,
            snapshot,
            refresh_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{category, InMemoryCategoryStore};

    fn records() -> Vec<Category> {
        vec![
            category(1, "Root", true, None),
            category(2, "Child", true, Some(1)),
            category(3, "Grandchild", true, Some(2)),
        ]
    }

    #[tokio::test]
    async fn test_applies_every_id_in_order() {
        let store = InMemoryCategoryStore::with(records());
        let executor = CascadeExecutor::new(store.clone(), BusyIds::default());

        let report = executor.apply(&[1, 2, 3], false).await.unwrap();

        assert_eq!(report.outcome, CascadeOutcome::Applied { ids: vec![1, 2, 3] });
        assert_eq!(
            store.mutations(),
            vec![
                r#"PATCH 1 {"is_active":false}"#,
                r#"PATCH 2 {"is_active":false}"#,
                r#"PATCH 3 {"is_active":false}"#,
            ]
        );
        assert!(report.snapshot.unwrap().iter().all(|c| !c.is_active));
        assert_eq!(store.list_count(), 1);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure_and_refetches_once() {
        let store = InMemoryCategoryStore::with(records());
        store.fail_on(2);
        let busy = BusyIds::default();
        let executor = CascadeExecutor::new(store.clone(), busy.clone());

        let report = executor.apply(&[1, 2, 3], false).await.unwrap();

        assert_eq!(
            store.mutations(),
            vec![
                r#"PATCH 1 {"is_active":false}"#,
                r#"PATCH 2 {"is_active":false}"#,
            ]
        );
        assert_eq!(
            report.outcome,
            CascadeOutcome::PartiallyApplied {
                applied: vec![1],
                failed_id: 2,
                reason: "Category 2 is locked".to_string(),
                skipped: vec![3],
            }
        );
        assert_eq!(store.list_count(), 1);
        assert!(busy.snapshot().is_empty());

        let snapshot = report.snapshot.unwrap();
        assert!(!snapshot[0].is_active);
        assert!(snapshot[1].is_active);
        assert!(snapshot[2].is_active);
    }

    #[tokio::test]
    async fn test_overlapping_ids_are_rejected_before_any_call() {
        let store = InMemoryCategoryStore::with(records());
        let busy = BusyIds::default();
        let executor = CascadeExecutor::new(store.clone(), busy.clone());

        let held = busy.acquire(&[3]).unwrap();
        let err = executor.apply(&[1, 2, 3], true).await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
        assert!(store.calls().is_empty());
        assert!(!busy.contains(1));

        drop(held);
        assert!(executor.apply(&[1, 2, 3], true).await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_refetch_is_reported_separately() {
        let store = InMemoryCategoryStore::with(records());
        store.fail_listing();
        let executor = CascadeExecutor::new(store.clone(), BusyIds::default());

        let report = executor.apply(&[2], true).await.unwrap();

        assert!(report.is_complete());
        assert!(report.snapshot.is_none());
        assert!(report.refresh_error.is_some());
    }
}
