//! The upload-path contract: create the metadata record, then publish
//! the job message, in that order.
//!
//! The store and the broker are not jointly atomic. When the publish
//! fails after a successful create, the fresh row is deleted again
//! (compensation) so no orphaned `pending` record survives; the publish
//! failure surfaces to the caller either way, and retrying is the
//! caller's decision.

use sqlx::SqlitePool;

use imgproc_broker::{BrokerError, Producer};
use imgproc_core::types::DbId;
use imgproc_core::JobMessage;
use imgproc_db::models::image::CreateImage;
use imgproc_db::repositories::ImageRepo;
use imgproc_db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Broker(#[from] BrokerError),
}

/// Register an image job: persist the record (status `pending`), then
/// hand it to the broker. Returns the assigned id.
pub async fn submit_job(
    pool: &SqlitePool,
    producer: &Producer,
    image: CreateImage,
) -> Result<DbId, SubmitError> {
    let id = ImageRepo::create(pool, &image).await?;

    let message = JobMessage::new(id, image.action);
    if let Err(publish_err) = producer.publish(&message).await {
        tracing::error!(id, error = %publish_err, "publish failed, compensating create");
        if let Err(cleanup_err) = ImageRepo::delete(pool, id).await {
            // The record stays orphaned in `pending`; operators can
            // find it via the status index.
            tracing::error!(id, error = %cleanup_err, "compensating delete failed");
        }
        return Err(publish_err.into());
    }

    tracing::info!(id, action = %image.action, "job submitted");
    Ok(id)
}
