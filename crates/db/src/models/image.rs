//! Image record model and insert DTO.

use chrono::{DateTime, Utc};
use imgproc_core::{CoreError, ImageAction, ImageStatus};
use serde::Serialize;
use sqlx::FromRow;

use imgproc_core::types::DbId;

/// A row from the `images` table.
///
/// `status` and `action` are stored as TEXT; use
/// [`status()`](ImageRecord::status) / [`action()`](ImageRecord::action)
/// for the typed view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ImageRecord {
    pub id: DbId,
    pub original_filename: String,
    pub original_path: String,
    pub mime_type: String,
    pub file_size: i64,
    pub status: String,
    pub action: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ImageRecord {
    pub fn status(&self) -> Result<ImageStatus, CoreError> {
        self.status.parse()
    }

    pub fn action(&self) -> Result<ImageAction, CoreError> {
        self.action.parse()
    }
}

/// DTO for registering a new image. The inserted row always starts in
/// `pending` status with an id assigned by the store.
#[derive(Debug, Clone)]
pub struct CreateImage {
    pub original_filename: String,
    pub original_path: String,
    pub mime_type: String,
    pub file_size: i64,
    pub action: ImageAction,
}
