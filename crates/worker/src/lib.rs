//! Consumer side of the image-processing job queue.
//!
//! - [`pool`] — one supervised worker per partition with broadcast
//!   cancellation and an explicit join barrier.
//! - [`dispatcher`] — maps a job message to a transform invocation and
//!   drives the record's status lifecycle, including phase two of the
//!   async delete.
//! - [`submit`] — the upload-path contract: create the record, then
//!   publish the job, with a compensating delete when publish fails.
//! - [`transform`] — the pixel-level [`Transform`](imgproc_core::Transform)
//!   implementation backed by the `image` crate.

pub mod config;
pub mod dispatcher;
pub mod pool;
pub mod submit;
pub mod transform;

pub use config::WorkerConfig;
pub use dispatcher::{DispatchError, Dispatcher};
pub use pool::ConsumerPool;
pub use submit::{submit_job, SubmitError};
pub use transform::PixelTransform;
