use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::debug;

use crate::database::DatabasePool;
use crate::models::measurement::{MeasurementDraft, MeasurementRecord};

use super::errors::RepositoryError;

/// Repository trait for BSL measurements
///
/// Exposes the five canonical single-row operations. Every write is a
/// single statement; correctness under concurrent writers is delegated to
/// the store's transaction isolation.
#[async_trait]
pub trait MeasurementRepositoryTrait: Send + Sync {
    /// Get all measurements, ordered by id
    async fn list(&self) -> Result<Vec<MeasurementRecord>, RepositoryError>;

    /// Read a single measurement by id
    async fn read(&self, id: i64) -> Result<MeasurementRecord, RepositoryError>;

    /// Create a new measurement; the draft id must be absent
    async fn create(&self, draft: MeasurementDraft) -> Result<MeasurementRecord, RepositoryError>;

    /// Fully overwrite an existing measurement; the draft id must be present
    async fn update(&self, draft: MeasurementDraft) -> Result<MeasurementRecord, RepositoryError>;

    /// Delete a measurement, or do nothing if it doesn't exist
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}

/// SQLite-backed repository for BSL measurements
#[derive(Debug, Clone)]
pub struct SqliteMeasurementRepository {
    pool: DatabasePool,
}

impl SqliteMeasurementRepository {
    /// Create a new repository over an initialized connection pool
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Map a result row to a measurement record
    fn row_to_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<MeasurementRecord> {
        let value: f64 = row.get(1)?;

        Ok(MeasurementRecord {
            id: row.get(0)?,
            value_tenths: (value * 10.0).round() as i64,
            measurement_type: row.get(2)?,
            date: row.get(3)?,
            time: row.get(4)?,
        })
    }

    /// Read a row by id on an existing connection
    fn read_record(conn: &Connection, id: i64) -> Result<MeasurementRecord, RepositoryError> {
        let record = conn.query_row(
            "SELECT id, value, measurement_type, date, time
             FROM bsl_measurements WHERE id = ?1",
            params![id],
            Self::row_to_record,
        );

        match record {
            Ok(record) => Ok(record),
            Err(rusqlite::Error::QueryReturnedNoRows) => Err(RepositoryError::NotFound(id)),
            Err(e) => Err(RepositoryError::Sqlite(e)),
        }
    }
}

#[async_trait]
impl MeasurementRepositoryTrait for SqliteMeasurementRepository {
    async fn list(&self) -> Result<Vec<MeasurementRecord>, RepositoryError> {
        debug!("Listing all BSL measurements");

        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, value, measurement_type, date, time
             FROM bsl_measurements ORDER BY id",
        )?;

        let rows = stmt.query_map([], Self::row_to_record)?;

        let mut result = Vec::new();
        for record in rows {
            result.push(record?);
        }

        Ok(result)
    }

    async fn read(&self, id: i64) -> Result<MeasurementRecord, RepositoryError> {
        debug!("Reading BSL measurement: id={}", id);

        let conn = self.pool.get()?;
        Self::read_record(&conn, id)
    }

    async fn create(&self, draft: MeasurementDraft) -> Result<MeasurementRecord, RepositoryError> {
        if draft.id.is_some() {
            return Err(RepositoryError::InvalidRequest(
                "id must be null for a new measurement".to_string(),
            ));
        }

        // Server-side defaults for omitted date and time
        let now = Utc::now();
        let date = draft.date.unwrap_or_else(|| now.date_naive());
        let time = draft.time.unwrap_or_else(|| now.time());

        debug!("Inserting BSL measurement: value_tenths={}", draft.value_tenths);

        let conn = self.pool.get()?;
        conn.execute(
            "INSERT INTO bsl_measurements (value, measurement_type, date, time)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                draft.value_tenths as f64 / 10.0,
                draft.measurement_type,
                date,
                time
            ],
        )?;

        // Return the row as persisted, defaults included
        let id = conn.last_insert_rowid();
        Self::read_record(&conn, id)
    }

    async fn update(&self, draft: MeasurementDraft) -> Result<MeasurementRecord, RepositoryError> {
        let id = draft.id.ok_or_else(|| {
            RepositoryError::InvalidRequest(
                "id must not be null for an existing measurement".to_string(),
            )
        })?;

        // Full-record overwrite: omitted date and time reset to "now",
        // exactly as they would on create
        let now = Utc::now();
        let date = draft.date.unwrap_or_else(|| now.date_naive());
        let time = draft.time.unwrap_or_else(|| now.time());

        debug!("Updating BSL measurement: id={}", id);

        let conn = self.pool.get()?;
        let affected = conn.execute(
            "UPDATE bsl_measurements
             SET value = ?1, measurement_type = ?2, date = ?3, time = ?4
             WHERE id = ?5",
            params![
                draft.value_tenths as f64 / 10.0,
                draft.measurement_type,
                date,
                time,
                id
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound(id));
        }

        Self::read_record(&conn, id)
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        debug!("Deleting BSL measurement: id={}", id);

        let conn = self.pool.get()?;
        conn.execute("DELETE FROM bsl_measurements WHERE id = ?1", params![id])?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn test_repository() -> SqliteMeasurementRepository {
        let pool = DatabasePool::open_in_memory().expect("Failed to open in-memory database");
        SqliteMeasurementRepository::new(pool)
    }

    fn draft(value_tenths: i64) -> MeasurementDraft {
        MeasurementDraft {
            id: None,
            value_tenths,
            measurement_type: "fasting".to_string(),
            date: None,
            time: None,
        }
    }

    fn dated_draft(id: Option<i64>, value_tenths: i64) -> MeasurementDraft {
        MeasurementDraft {
            id,
            value_tenths,
            measurement_type: "random".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 9, 3),
            time: NaiveTime::from_hms_opt(7, 30, 0),
        }
    }

    #[tokio::test]
    async fn test_create_then_read_round_trip() {
        let repo = test_repository();

        let created = repo.create(dated_draft(None, 55)).await.unwrap();
        assert_eq!(created.value_tenths, 55);
        assert_eq!(created.value(), 5.5);
        assert_eq!(created.measurement_type, "random");
        assert_eq!(created.date, NaiveDate::from_ymd_opt(2024, 9, 3).unwrap());
        assert_eq!(created.time, NaiveTime::from_hms_opt(7, 30, 0).unwrap());

        let read = repo.read(created.id).await.unwrap();
        assert_eq!(read, created);
    }

    #[tokio::test]
    async fn test_create_defaults_date_and_time() {
        let repo = test_repository();

        let before = Utc::now().date_naive();
        let created = repo.create(draft(71)).await.unwrap();
        let after = Utc::now().date_naive();

        // Defaults stamped at insertion time
        assert!(created.date >= before && created.date <= after);
    }

    #[tokio::test]
    async fn test_create_with_id_is_rejected() {
        let repo = test_repository();

        let result = repo.create(dated_draft(Some(1), 55)).await;
        assert!(matches!(result, Err(RepositoryError::InvalidRequest(_))));

        // No row was written
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_read_missing_id_is_not_found() {
        let repo = test_repository();

        let result = repo.read(999_999).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(999_999))));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = test_repository();

        let first = repo.create(draft(10)).await.unwrap();
        let second = repo.create(draft(20)).await.unwrap();
        let third = repo.create(draft(30)).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(
            all.iter().map(|m| m.id).collect::<Vec<_>>(),
            vec![first.id, second.id, third.id]
        );
    }

    #[tokio::test]
    async fn test_update_overwrites_every_field() {
        let repo = test_repository();

        let created = repo.create(dated_draft(None, 55)).await.unwrap();

        let mut replacement = dated_draft(Some(created.id), 62);
        replacement.measurement_type = "fasting".to_string();
        replacement.date = NaiveDate::from_ymd_opt(2024, 10, 1);
        replacement.time = NaiveTime::from_hms_opt(12, 0, 0);

        let updated = repo.update(replacement.clone()).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.value_tenths, 62);
        assert_eq!(updated.measurement_type, "fasting");
        assert_eq!(updated.date, NaiveDate::from_ymd_opt(2024, 10, 1).unwrap());
        assert_eq!(updated.time, NaiveTime::from_hms_opt(12, 0, 0).unwrap());

        // Applying the same update twice yields the same stored state
        let updated_again = repo.update(replacement).await.unwrap();
        assert_eq!(updated_again, updated);
        assert_eq!(repo.read(created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_without_id_is_rejected() {
        let repo = test_repository();
        repo.create(draft(40)).await.unwrap();

        let result = repo.update(draft(50)).await;
        assert!(matches!(result, Err(RepositoryError::InvalidRequest(_))));

        // The stored row is untouched
        let all = repo.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].value_tenths, 40);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let repo = test_repository();

        let result = repo.update(dated_draft(Some(999_999), 55)).await;
        assert!(matches!(result, Err(RepositoryError::NotFound(999_999))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = test_repository();

        let created = repo.create(draft(33)).await.unwrap();

        repo.delete(created.id).await.unwrap();
        assert!(matches!(
            repo.read(created.id).await,
            Err(RepositoryError::NotFound(_))
        ));

        // Deleting again is a no-op, not an error
        repo.delete(created.id).await.unwrap();

        // And so is deleting an id that never existed
        repo.delete(999_999).await.unwrap();
        assert!(repo.list().await.unwrap().is_empty());
    }
}
