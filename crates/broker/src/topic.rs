//! Topic registry and partition provisioning.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::mpsc;

use crate::consumer::PartitionReceiver;
use crate::error::BrokerError;
use crate::producer::Producer;

/// Buffered messages per partition before publishers block.
const PARTITION_BUFFER: usize = 128;

/// Topic declaration, fixed at startup.
#[derive(Debug, Clone)]
pub struct TopicConfig {
    pub name: String,
    pub partitions: u32,
    /// Carried for parity with deployment-broker configuration; the
    /// in-process topic keeps a single copy.
    pub replication_factor: u32,
}

struct TopicState {
    partitions: u32,
    senders: Vec<mpsc::Sender<Vec<u8>>>,
    receivers: Vec<Option<mpsc::Receiver<Vec<u8>>>>,
}

/// Registry of partitioned topics.
///
/// Shared via `Arc<Broker>`; all methods take `&self`.
#[derive(Default)]
pub struct Broker {
    topics: Mutex<HashMap<String, TopicState>>,
}

impl Broker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create `config.name` if absent. Idempotent: a topic that already
    /// exists with the requested partition count is a success, not an
    /// error. A partition-count mismatch, a zero partition count, or a
    /// zero replication factor all propagate as provisioning failures.
    pub fn ensure_topic(&self, config: &TopicConfig) -> Result<(), BrokerError> {
        if config.partitions == 0 {
            return Err(BrokerError::InvalidConfig {
                topic: config.name.clone(),
                reason: "partition count must be at least 1".into(),
            });
        }
        if config.replication_factor == 0 {
            return Err(BrokerError::InvalidConfig {
                topic: config.name.clone(),
                reason: "replication factor must be at least 1".into(),
            });
        }

        let mut topics = self.topics.lock().expect("broker registry poisoned");
        if let Some(existing) = topics.get(&config.name) {
            if existing.partitions != config.partitions {
                return Err(BrokerError::PartitionMismatch {
                    topic: config.name.clone(),
                    existing: existing.partitions,
                    requested: config.partitions,
                });
            }
            tracing::debug!(topic = %config.name, "topic already exists");
            return Ok(());
        }

        let mut senders = Vec::with_capacity(config.partitions as usize);
        let mut receivers = Vec::with_capacity(config.partitions as usize);
        for _ in 0..config.partitions {
            let (tx, rx) = mpsc::channel(PARTITION_BUFFER);
            senders.push(tx);
            receivers.push(Some(rx));
        }

        topics.insert(
            config.name.clone(),
            TopicState {
                partitions: config.partitions,
                senders,
                receivers,
            },
        );
        tracing::info!(
            topic = %config.name,
            partitions = config.partitions,
            "topic created"
        );
        Ok(())
    }

    /// Build a producer for an existing topic.
    pub fn producer(&self, topic: &str) -> Result<Producer, BrokerError> {
        let topics = self.topics.lock().expect("broker registry poisoned");
        let state = topics
            .get(topic)
            .ok_or_else(|| BrokerError::UnknownTopic(topic.to_string()))?;
        Ok(Producer::new(topic.to_string(), state.senders.clone()))
    }

    /// Claim exclusive ownership of one partition's consumer side.
    ///
    /// Each partition can be taken exactly once; a second claim is an
    /// error, which is what guarantees the one-worker-per-partition
    /// model.
    pub fn take_partition(
        &self,
        topic: &str,
        partition: u32,
    ) -> Result<PartitionReceiver, BrokerError> {
        let mut topics = self.topics.lock().expect("broker registry poisoned");
        let state = topics
            .get_mut(topic)
            .ok_or_else(|| BrokerError::UnknownTopic(topic.to_string()))?;
        let slot = state.receivers.get_mut(partition as usize).ok_or_else(|| {
            BrokerError::UnknownPartition {
                topic: topic.to_string(),
                partition,
            }
        })?;
        let rx = slot.take().ok_or_else(|| BrokerError::PartitionClaimed {
            topic: topic.to_string(),
            partition,
        })?;
        Ok(PartitionReceiver::new(partition, rx))
    }
}
