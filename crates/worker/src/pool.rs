//! Supervised consumer pool: one long-lived worker per partition.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use imgproc_broker::{Delivery, PartitionReceiver};
use imgproc_core::JobMessage;

use crate::dispatcher::Dispatcher;

/// Owns the partition worker tasks.
///
/// Each worker holds its [`PartitionReceiver`] exclusively for the
/// lifetime of the process; there is no work-stealing across
/// partitions, so maximum parallelism equals the partition count and a
/// slow transform stalls only its own partition.
pub struct ConsumerPool {
    workers: Vec<JoinHandle<()>>,
}

impl ConsumerPool {
    /// Spawn one worker per receiver. The `cancel` token is the
    /// process-wide shutdown broadcast: workers finish the message they
    /// are on, stop claiming new ones, and return.
    pub fn spawn(
        dispatcher: Arc<Dispatcher>,
        receivers: Vec<PartitionReceiver>,
        cancel: CancellationToken,
    ) -> Self {
        let workers = receivers
            .into_iter()
            .map(|rx| {
                let dispatcher = Arc::clone(&dispatcher);
                let cancel = cancel.clone();
                tokio::spawn(partition_worker(dispatcher, rx, cancel))
            })
            .collect();
        Self { workers }
    }

    /// Shutdown barrier: resolves once every partition worker has
    /// exited.
    pub async fn join(self) {
        for worker in self.workers {
            if let Err(e) = worker.await {
                tracing::error!(error = %e, "partition worker panicked");
            }
        }
    }
}

async fn partition_worker(
    dispatcher: Arc<Dispatcher>,
    mut rx: PartitionReceiver,
    cancel: CancellationToken,
) {
    let partition = rx.partition();
    tracing::info!(partition, "partition worker started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!(partition, "partition worker shutting down");
                break;
            }
            delivery = rx.recv() => {
                let Some(delivery) = delivery else {
                    // Topic closed; nothing more will arrive. Delivery
                    // errors never take the process down.
                    tracing::warn!(partition, "topic closed, partition worker exiting");
                    break;
                };
                handle_delivery(&dispatcher, &mut rx, delivery).await;
            }
        }
    }
}

/// Decode and dispatch one delivery, then advance the progress marker.
///
/// Malformed or empty payloads cannot be retried meaningfully, so they
/// are logged and committed immediately. Everything else is committed
/// after dispatch returns — success or handled failure alike — which is
/// what makes redelivery possible only for messages that were never
/// fully handled.
async fn handle_delivery(
    dispatcher: &Dispatcher,
    rx: &mut PartitionReceiver,
    delivery: Delivery,
) {
    let partition = rx.partition();

    let message = match JobMessage::decode(&delivery.payload) {
        Ok(message) => message,
        Err(e) => {
            tracing::warn!(
                partition,
                offset = delivery.offset,
                error = %e,
                "dropping undecodable message"
            );
            rx.commit(delivery.offset);
            return;
        }
    };

    if let Err(e) = dispatcher.dispatch(&message).await {
        tracing::error!(
            partition,
            offset = delivery.offset,
            id = message.id,
            error = %e,
            "job dispatch failed"
        );
    }
    rx.commit(delivery.offset);
}
