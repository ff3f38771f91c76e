//! Repository for the `images` table.
//!
//! Stateless: every method takes the pool. Operations on a missing id
//! return [`StoreError::NotFound`], never silent success.

use sqlx::SqlitePool;

use imgproc_core::types::DbId;
use imgproc_core::ImageStatus;

use crate::error::StoreError;
use crate::models::image::{CreateImage, ImageRecord};

/// Column list for `images` queries.
const COLUMNS: &str = "\
    id, original_filename, original_path, mime_type, file_size, \
    status, action, created_at, updated_at";

/// CRUD operations for image job records.
pub struct ImageRepo;

impl ImageRepo {
    /// Insert a new record in `pending` status and return its id.
    ///
    /// The insert is a single statement: either the row is fully
    /// visible with an id, or nothing is persisted.
    pub async fn create(pool: &SqlitePool, input: &CreateImage) -> Result<DbId, StoreError> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO images \
                 (original_filename, original_path, mime_type, file_size, status, action) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING id",
        )
        .bind(&input.original_filename)
        .bind(&input.original_path)
        .bind(&input.mime_type)
        .bind(input.file_size)
        .bind(ImageStatus::Pending.as_str())
        .bind(input.action.as_str())
        .fetch_one(pool)
        .await?;

        tracing::debug!(id, action = %input.action, "image record created");
        Ok(id)
    }

    /// Fetch a record by id.
    pub async fn get(pool: &SqlitePool, id: DbId) -> Result<ImageRecord, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM images WHERE id = ?");
        sqlx::query_as::<_, ImageRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or(StoreError::NotFound { id })
    }

    /// Set the status of an existing record.
    pub async fn update_status(
        pool: &SqlitePool,
        id: DbId,
        status: ImageStatus,
    ) -> Result<(), StoreError> {
        let result = sqlx::query(
            "UPDATE images \
             SET status = ?, updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now') \
             WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(id)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        tracing::debug!(id, status = %status, "image status updated");
        Ok(())
    }

    /// Remove a record.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM images WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        tracing::debug!(id, "image record deleted");
        Ok(())
    }

    /// Total number of records.
    pub async fn count(pool: &SqlitePool) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM images")
            .fetch_one(pool)
            .await?;
        Ok(count)
    }
}
