/// Errors surfaced by the broker.
#[derive(Debug, thiserror::Error)]
pub enum BrokerError {
    #[error("invalid topic config for {topic:?}: {reason}")]
    InvalidConfig { topic: String, reason: String },

    #[error("topic {topic:?} exists with {existing} partitions, requested {requested}")]
    PartitionMismatch {
        topic: String,
        existing: u32,
        requested: u32,
    },

    #[error("unknown topic: {0:?}")]
    UnknownTopic(String),

    #[error("unknown partition {partition} for topic {topic:?}")]
    UnknownPartition { topic: String, partition: u32 },

    #[error("partition {partition} of topic {topic:?} is already claimed")]
    PartitionClaimed { topic: String, partition: u32 },

    /// The partition's consumer side is gone; the message was not
    /// accepted and the publish must be reported as failed.
    #[error("topic {0:?} is closed")]
    TopicClosed(String),

    /// The message could not be serialized; nothing was published.
    #[error("message rejected: {0}")]
    InvalidMessage(#[from] imgproc_core::CoreError),
}
