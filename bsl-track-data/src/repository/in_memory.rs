use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::models::measurement::{MeasurementDraft, MeasurementRecord};

use super::errors::RepositoryError;
use super::measurements::MeasurementRepositoryTrait;

/// In-memory repository for BSL measurements
///
/// Mirrors the SQLite repository's semantics exactly, including id
/// assignment and the server-side date/time defaults. Used by handler and
/// integration tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    inner: Arc<Mutex<Store>>,
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    rows: BTreeMap<i64, MeasurementRecord>,
}

impl InMemoryRepository {
    /// Create a new, empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MeasurementRepositoryTrait for InMemoryRepository {
    async fn list(&self) -> Result<Vec<MeasurementRecord>, RepositoryError> {
        let store = self.inner.lock()?;
        Ok(store.rows.values().cloned().collect())
    }

    async fn read(&self, id: i64) -> Result<MeasurementRecord, RepositoryError> {
        let store = self.inner.lock()?;
        store
            .rows
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    async fn create(&self, draft: MeasurementDraft) -> Result<MeasurementRecord, RepositoryError> {
        if draft.id.is_some() {
            return Err(RepositoryError::InvalidRequest(
                "id must be null for a new measurement".to_string(),
            ));
        }

        let now = Utc::now();
        let mut store = self.inner.lock()?;

        store.next_id += 1;
        let record = MeasurementRecord {
            id: store.next_id,
            value_tenths: draft.value_tenths,
            measurement_type: draft.measurement_type,
            date: draft.date.unwrap_or_else(|| now.date_naive()),
            time: draft.time.unwrap_or_else(|| now.time()),
        };

        store.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(&self, draft: MeasurementDraft) -> Result<MeasurementRecord, RepositoryError> {
        let id = draft.id.ok_or_else(|| {
            RepositoryError::InvalidRequest(
                "id must not be null for an existing measurement".to_string(),
            )
        })?;

        let now = Utc::now();
        let mut store = self.inner.lock()?;

        if !store.rows.contains_key(&id) {
            return Err(RepositoryError::NotFound(id));
        }

        let record = MeasurementRecord {
            id,
            value_tenths: draft.value_tenths,
            measurement_type: draft.measurement_type,
            date: draft.date.unwrap_or_else(|| now.date_naive()),
            time: draft.time.unwrap_or_else(|| now.time()),
        };

        store.rows.insert(id, record.clone());
        Ok(record)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut store = self.inner.lock()?;
        store.rows.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn draft(value_tenths: i64) -> MeasurementDraft {
        MeasurementDraft {
            id: None,
            value_tenths,
            measurement_type: "fasting".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 9, 3),
            time: NaiveTime::from_hms_opt(7, 30, 0),
        }
    }

    #[tokio::test]
    async fn test_ids_are_assigned_sequentially() {
        let repo = InMemoryRepository::new();

        let first = repo.create(draft(10)).await.unwrap();
        let second = repo.create(draft(20)).await.unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_clones_share_storage() {
        let repo = InMemoryRepository::new();
        let clone = repo.clone();

        repo.create(draft(10)).await.unwrap();
        assert_eq!(clone.list().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_matches_sqlite_error_semantics() {
        let repo = InMemoryRepository::new();

        let mut with_id = draft(10);
        with_id.id = Some(7);
        assert!(matches!(
            repo.create(with_id).await,
            Err(RepositoryError::InvalidRequest(_))
        ));

        assert!(matches!(
            repo.read(7).await,
            Err(RepositoryError::NotFound(7))
        ));

        let mut update = draft(10);
        update.id = Some(7);
        assert!(matches!(
            repo.update(update).await,
            Err(RepositoryError::NotFound(7))
        ));

        // Deleting a missing row is a no-op
        repo.delete(7).await.unwrap();
    }

    #[tokio::test]
    async fn test_deleted_id_is_not_reused() {
        let repo = InMemoryRepository::new();

        let first = repo.create(draft(10)).await.unwrap();
        repo.delete(first.id).await.unwrap();

        let second = repo.create(draft(20)).await.unwrap();
        assert!(second.id > first.id);
    }
}
