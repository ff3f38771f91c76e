//! In-process partitioned job topic.
//!
//! The protocol semantics the rest of the system depends on live here:
//! at-least-once hand-off (publish returns only after the topic has
//! durably buffered the message), per-partition total order, partition
//! pinning by image id, exclusive partition ownership, and explicit
//! offset commits.
//!
//! A deployment swapping this for an external broker keeps the same
//! surface: [`Broker::ensure_topic`] is the idempotent provisioner,
//! [`Producer::publish`] the acknowledged send, and
//! [`PartitionReceiver`] the single-owner consumption handle.

pub mod consumer;
pub mod error;
pub mod producer;
pub mod topic;

pub use consumer::{Delivery, PartitionReceiver};
pub use error::BrokerError;
pub use producer::Producer;
pub use topic::{Broker, TopicConfig};
