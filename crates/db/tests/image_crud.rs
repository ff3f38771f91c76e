//! Integration tests for the metadata store.
//!
//! Runs against in-memory SQLite through the crate's own
//! single-connection pool, so the write-serialization discipline under
//! test is the one the worker pool actually uses.

use assert_matches::assert_matches;
use sqlx::SqlitePool;

use imgproc_core::{ImageAction, ImageStatus};
use imgproc_db::models::image::CreateImage;
use imgproc_db::repositories::ImageRepo;
use imgproc_db::StoreError;

async fn fresh_store() -> SqlitePool {
    let pool = imgproc_db::create_pool("sqlite::memory:")
        .await
        .expect("open in-memory store");
    imgproc_db::run_migrations(&pool).await.expect("migrations");
    pool
}

fn cat_png(action: ImageAction) -> CreateImage {
    CreateImage {
        original_filename: "cat.png".into(),
        original_path: "/uploads/cat.png".into(),
        mime_type: "image/png".into(),
        file_size: 1_200_000,
        action,
    }
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let pool = fresh_store().await;

    let input = cat_png(ImageAction::Resize);
    let id = ImageRepo::create(&pool, &input).await.unwrap();
    assert_eq!(id, 1);

    let record = ImageRepo::get(&pool, id).await.unwrap();
    assert_eq!(record.id, id);
    assert_eq!(record.original_filename, input.original_filename);
    assert_eq!(record.original_path, input.original_path);
    assert_eq!(record.mime_type, input.mime_type);
    assert_eq!(record.file_size, input.file_size);
    assert_eq!(record.action().unwrap(), ImageAction::Resize);
    assert_eq!(record.status().unwrap(), ImageStatus::Pending);
}

#[tokio::test]
async fn get_missing_id_is_not_found() {
    let pool = fresh_store().await;
    let err = ImageRepo::get(&pool, 99).await.unwrap_err();
    assert_matches!(err, StoreError::NotFound { id: 99 });
}

#[tokio::test]
async fn update_status_missing_id_is_not_found() {
    let pool = fresh_store().await;
    let err = ImageRepo::update_status(&pool, 7, ImageStatus::Processing)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::NotFound { id: 7 });
}

#[tokio::test]
async fn update_status_is_visible_on_next_get() {
    let pool = fresh_store().await;
    let id = ImageRepo::create(&pool, &cat_png(ImageAction::Watermark))
        .await
        .unwrap();

    ImageRepo::update_status(&pool, id, ImageStatus::Processing)
        .await
        .unwrap();
    let record = ImageRepo::get(&pool, id).await.unwrap();
    assert_eq!(record.status().unwrap(), ImageStatus::Processing);
}

#[tokio::test]
async fn delete_missing_id_leaves_store_unchanged() {
    let pool = fresh_store().await;
    let id = ImageRepo::create(&pool, &cat_png(ImageAction::Miniature))
        .await
        .unwrap();

    let err = ImageRepo::delete(&pool, id + 100).await.unwrap_err();
    assert_matches!(err, StoreError::NotFound { .. });
    assert_eq!(ImageRepo::count(&pool).await.unwrap(), 1);
}

#[tokio::test]
async fn delete_removes_the_row() {
    let pool = fresh_store().await;
    let id = ImageRepo::create(&pool, &cat_png(ImageAction::Resize))
        .await
        .unwrap();

    ImageRepo::delete(&pool, id).await.unwrap();
    assert_eq!(ImageRepo::count(&pool).await.unwrap(), 0);
    assert_matches!(
        ImageRepo::get(&pool, id).await.unwrap_err(),
        StoreError::NotFound { .. }
    );
}

/// 100 parallel creates on a fresh store must hand out exactly the ids
/// 1..=100 — no gaps, no duplicates — even though callers race.
#[tokio::test]
async fn concurrent_creates_assign_unique_dense_ids() {
    let pool = fresh_store().await;

    let mut handles = Vec::new();
    for n in 0..100 {
        let pool = pool.clone();
        handles.push(tokio::spawn(async move {
            let input = CreateImage {
                original_filename: format!("img-{n}.png"),
                original_path: format!("/uploads/img-{n}.png"),
                mime_type: "image/png".into(),
                file_size: 1024,
                action: ImageAction::Resize,
            };
            ImageRepo::create(&pool, &input).await.unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.sort_unstable();
    assert_eq!(ids, (1..=100).collect::<Vec<i64>>());
}
