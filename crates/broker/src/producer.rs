//! Acknowledged job publication.

use tokio::sync::mpsc;

use imgproc_core::JobMessage;

use crate::error::BrokerError;

/// Publishes job messages onto one topic.
///
/// Cheap to clone through [`Broker::producer`](crate::Broker::producer);
/// every producer for a topic feeds the same partitions.
#[derive(Debug)]
pub struct Producer {
    topic: String,
    senders: Vec<mpsc::Sender<Vec<u8>>>,
}

impl Producer {
    pub(crate) fn new(topic: String, senders: Vec<mpsc::Sender<Vec<u8>>>) -> Self {
        Self { topic, senders }
    }

    /// Publish one message and wait for the topic to accept it.
    ///
    /// Returns only after the message sits in the partition buffer —
    /// at-least-once: a message is never reported sent without being
    /// durably held. Failures surface to the caller; there is no
    /// internal retry (retry policy belongs to the upload path).
    ///
    /// The partition is pinned by `message.id`, so all jobs for one
    /// image land on the same partition and are strictly ordered.
    /// Offsets are assigned on the consuming side, in delivery order.
    pub async fn publish(&self, message: &JobMessage) -> Result<(), BrokerError> {
        let partition = (message.id.rem_euclid(self.senders.len() as i64)) as usize;
        let payload = message.encode()?;

        self.senders[partition]
            .send(payload)
            .await
            .map_err(|_| BrokerError::TopicClosed(self.topic.clone()))?;

        tracing::debug!(
            topic = %self.topic,
            partition,
            id = message.id,
            action = %message.action,
            "message published"
        );
        Ok(())
    }
}
