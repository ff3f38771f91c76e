use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imgproc_broker::{Broker, TopicConfig};
use imgproc_core::Transform;
use imgproc_worker::{ConsumerPool, Dispatcher, PixelTransform, WorkerConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imgproc_worker=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = WorkerConfig::from_env();
    tracing::info!(
        topic = %config.topic,
        partitions = config.partitions,
        "Loaded worker configuration"
    );

    // --- Metadata store ---
    let pool = imgproc_db::create_pool(&config.database_url)
        .await
        .expect("Failed to open metadata store");
    imgproc_db::run_migrations(&pool)
        .await
        .expect("Failed to run metadata store migrations");
    imgproc_db::health_check(&pool)
        .await
        .expect("Metadata store health check failed");
    tracing::info!("Metadata store ready");

    // --- Image storage directory ---
    std::fs::create_dir_all(&config.image_dir).expect("Failed to create image directory");

    // --- Broker + topic provisioning ---
    let broker = Arc::new(Broker::new());
    broker
        .ensure_topic(&TopicConfig {
            name: config.topic.clone(),
            partitions: config.partitions,
            replication_factor: config.replication_factor,
        })
        .expect("Topic provisioning failed");

    let receivers = (0..config.partitions)
        .map(|partition| {
            broker
                .take_partition(&config.topic, partition)
                .expect("Partition claim failed")
        })
        .collect();

    // --- Consumer pool ---
    let transform: Arc<dyn Transform> = Arc::new(PixelTransform::new());
    let dispatcher = Arc::new(Dispatcher::new(pool.clone(), transform));

    let cancel = CancellationToken::new();
    let consumers = ConsumerPool::spawn(dispatcher, receivers, cancel.clone());
    tracing::info!(workers = config.partitions, "Consumer pool started");

    // --- Shutdown ---
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
    tracing::info!("Shutdown signal received");

    cancel.cancel();
    consumers.join().await;
    tracing::info!("All partition workers stopped");
}
