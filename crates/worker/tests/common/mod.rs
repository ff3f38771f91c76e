//! Shared fixtures for the worker integration tests.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use sqlx::SqlitePool;

use imgproc_core::{ImageAction, Transform, TransformError};
use imgproc_db::models::image::CreateImage;

pub async fn fresh_store() -> SqlitePool {
    let pool = imgproc_db::create_pool("sqlite::memory:")
        .await
        .expect("open in-memory store");
    imgproc_db::run_migrations(&pool).await.expect("migrations");
    pool
}

pub fn new_image(filename: &str, path: &str, action: ImageAction) -> CreateImage {
    CreateImage {
        original_filename: filename.to_string(),
        original_path: path.to_string(),
        mime_type: "image/png".into(),
        file_size: 1_200_000,
        action,
    }
}

/// Transform double that records every invocation, snapshots the
/// record's status as seen mid-transform, and can be forced to fail.
pub struct MockTransform {
    pool: SqlitePool,
    fail: AtomicBool,
    pub calls: Mutex<Vec<(PathBuf, ImageAction)>>,
    pub observed_statuses: Mutex<Vec<String>>,
}

impl MockTransform {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            fail: AtomicBool::new(false),
            calls: Mutex::new(Vec::new()),
            observed_statuses: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(pool: SqlitePool) -> Self {
        let mock = Self::new(pool);
        mock.fail.store(true, Ordering::Relaxed);
        mock
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl Transform for MockTransform {
    async fn apply(&self, path: &Path, action: ImageAction) -> Result<(), TransformError> {
        self.calls
            .lock()
            .unwrap()
            .push((path.to_path_buf(), action));

        let status: Option<String> =
            sqlx::query_scalar("SELECT status FROM images WHERE original_path = ?")
                .bind(path.to_string_lossy().into_owned())
                .fetch_optional(&self.pool)
                .await
                .expect("status probe query");
        if let Some(status) = status {
            self.observed_statuses.lock().unwrap().push(status);
        }

        if self.fail.load(Ordering::Relaxed) {
            return Err(TransformError::new("forced failure"));
        }
        Ok(())
    }
}
