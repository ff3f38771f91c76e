/// Worker configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development; override
/// via the environment (a `.env` file is honored at binary start).
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Metadata store location (default: `sqlite://imgproc.db`).
    pub database_url: String,
    /// Job topic name (default: `image-upload`).
    pub topic: String,
    /// Partition count, which is also the worker count (default: `3`).
    pub partitions: u32,
    /// Declared replication factor (default: `1`).
    pub replication_factor: u32,
    /// Directory for uploaded image files (default: `./uploads`).
    pub image_dir: String,
}

impl WorkerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default               |
    /// |-----------------------|-----------------------|
    /// | `DATABASE_URL`        | `sqlite://imgproc.db` |
    /// | `JOB_TOPIC`           | `image-upload`        |
    /// | `TOPIC_PARTITIONS`    | `3`                   |
    /// | `TOPIC_REPLICATION`   | `1`                   |
    /// | `IMAGE_DIR`           | `./uploads`           |
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://imgproc.db".into());

        let topic = std::env::var("JOB_TOPIC").unwrap_or_else(|_| "image-upload".into());

        let partitions: u32 = std::env::var("TOPIC_PARTITIONS")
            .unwrap_or_else(|_| "3".into())
            .parse()
            .expect("TOPIC_PARTITIONS must be a valid u32");

        let replication_factor: u32 = std::env::var("TOPIC_REPLICATION")
            .unwrap_or_else(|_| "1".into())
            .parse()
            .expect("TOPIC_REPLICATION must be a valid u32");

        let image_dir = std::env::var("IMAGE_DIR").unwrap_or_else(|_| "./uploads".into());

        Self {
            database_url,
            topic,
            partitions,
            replication_factor,
            image_dir,
        }
    }
}
