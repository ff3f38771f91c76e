//! Domain types for the image-processing job queue.
//!
//! This crate holds everything the other crates agree on but that does
//! no I/O of its own:
//!
//! - [`ImageAction`] — the closed set of transforms a job can request.
//! - [`ImageStatus`] — the job lifecycle state machine.
//! - [`JobMessage`] — the versioned wire payload carried by the broker.
//! - [`Transform`] — the external capability that mutates image files.
//! - [`CoreError`] / [`TransformError`] — the domain error taxonomy.

pub mod action;
pub mod error;
pub mod message;
pub mod status;
pub mod transform;
pub mod types;

pub use action::ImageAction;
pub use error::{CoreError, TransformError};
pub use message::JobMessage;
pub use status::ImageStatus;
pub use transform::Transform;
