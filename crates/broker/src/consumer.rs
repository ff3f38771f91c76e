//! Per-partition consumption handles.

use tokio::sync::mpsc;

/// One message as delivered to a partition worker.
#[derive(Debug, Clone)]
pub struct Delivery {
    /// Position within the partition, starting at 0. Assigned by the
    /// receiving side in delivery order, so offsets are strictly
    /// increasing per partition no matter how publishers interleave.
    pub offset: u64,
    /// Serialized job message (JSON text).
    pub payload: Vec<u8>,
}

/// Exclusive consumer handle for one partition.
///
/// The owning worker advances its progress marker with
/// [`commit`](PartitionReceiver::commit) only after a message has been
/// fully handled; an uncommitted offset is what a redelivering broker
/// would hand out again, which is why dispatch must tolerate
/// duplicates.
#[derive(Debug)]
pub struct PartitionReceiver {
    partition: u32,
    rx: mpsc::Receiver<Vec<u8>>,
    next_offset: u64,
    committed: Option<u64>,
}

impl PartitionReceiver {
    pub(crate) fn new(partition: u32, rx: mpsc::Receiver<Vec<u8>>) -> Self {
        Self {
            partition,
            rx,
            next_offset: 0,
            committed: None,
        }
    }

    pub fn partition(&self) -> u32 {
        self.partition
    }

    /// Wait for the next message. `None` means the topic is closed and
    /// no further messages will arrive.
    pub async fn recv(&mut self) -> Option<Delivery> {
        let payload = self.rx.recv().await?;
        let offset = self.next_offset;
        self.next_offset += 1;
        Some(Delivery { offset, payload })
    }

    /// Mark `offset` as handled.
    pub fn commit(&mut self, offset: u64) {
        debug_assert!(self.committed.map_or(true, |c| offset >= c));
        self.committed = Some(offset);
    }

    /// Highest committed offset, if any message was handled yet.
    pub fn committed(&self) -> Option<u64> {
        self.committed
    }
}
