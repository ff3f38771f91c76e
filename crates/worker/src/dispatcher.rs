//! Action dispatch and the job status lifecycle.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use sqlx::SqlitePool;

use imgproc_core::types::DbId;
use imgproc_core::{ImageStatus, JobMessage, Transform};
use imgproc_db::models::image::ImageRecord;
use imgproc_db::repositories::ImageRepo;
use imgproc_db::StoreError;

/// Errors a dispatch can surface to the partition worker.
///
/// All of these are handled failures from the pool's point of view:
/// the worker logs them and still commits, since redelivering the same
/// message could not succeed either.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("image record not found: id {id}")]
    NotFound { id: DbId },

    #[error("invalid job: {0}")]
    Validation(String),

    #[error(transparent)]
    Store(StoreError),

    #[error("removing {path:?} failed: {source}")]
    FileRemoval {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl From<StoreError> for DispatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { id } => DispatchError::NotFound { id },
            other => DispatchError::Store(other),
        }
    }
}

/// Maps a [`JobMessage`] to a transform invocation and status updates.
pub struct Dispatcher {
    pool: SqlitePool,
    transform: Arc<dyn Transform>,
}

impl Dispatcher {
    pub fn new(pool: SqlitePool, transform: Arc<dyn Transform>) -> Self {
        Self { pool, transform }
    }

    /// Handle one delivered message.
    ///
    /// The message is a reference: the record is re-fetched here and is
    /// the sole source of truth for path and current state. Flow:
    ///
    /// 1. Load the record — a missing id aborts with no side effects.
    /// 2. A record already marked `deleted` gets phase two of the
    ///    async delete (file removal, then row removal); the transform
    ///    is never invoked.
    /// 3. An unknown action leaves the record terminally `failed`.
    /// 4. Otherwise `processing` → transform → `modified`, or `failed`
    ///    when the transform errors. Transform failures are absorbed
    ///    here; they are visible through the record's status, not as a
    ///    dispatch error, and are not retried.
    ///
    /// Redelivered messages re-run the transform against the current
    /// record. That is harmless for resize and miniature; watermark
    /// stacks a second overlay (see
    /// [`ImageAction::Watermark`](imgproc_core::ImageAction::Watermark)).
    pub async fn dispatch(&self, message: &JobMessage) -> Result<(), DispatchError> {
        let record = ImageRepo::get(&self.pool, message.id).await?;
        let status = record
            .status()
            .map_err(|e| DispatchError::Validation(e.to_string()))?;

        if status == ImageStatus::Deleted {
            return self.finish_delete(message.id, &record).await;
        }

        let action = match message.parse_action() {
            Ok(action) => action,
            Err(e) => {
                ImageRepo::update_status(&self.pool, message.id, ImageStatus::Failed).await?;
                return Err(DispatchError::Validation(e.to_string()));
            }
        };

        ImageRepo::update_status(&self.pool, message.id, ImageStatus::Processing).await?;

        match self
            .transform
            .apply(Path::new(&record.original_path), action)
            .await
        {
            Ok(()) => {
                ImageRepo::update_status(&self.pool, message.id, ImageStatus::Modified).await?;
                tracing::debug!(id = message.id, action = %action, "image modified");
            }
            Err(e) => {
                tracing::warn!(
                    id = message.id,
                    action = %action,
                    error = %e,
                    "transform failed, marking record failed"
                );
                ImageRepo::update_status(&self.pool, message.id, ImageStatus::Failed).await?;
            }
        }
        Ok(())
    }

    /// Phase two of the two-phase delete: the external delete path has
    /// already marked the record `deleted`; this removes the file, then
    /// the metadata row.
    async fn finish_delete(&self, id: DbId, record: &ImageRecord) -> Result<(), DispatchError> {
        let path = PathBuf::from(&record.original_path);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|source| DispatchError::FileRemoval {
                path: path.clone(),
                source,
            })?;
        ImageRepo::delete(&self.pool, id).await?;
        tracing::info!(id, path = %path.display(), "two-phase delete completed");
        Ok(())
    }
}
