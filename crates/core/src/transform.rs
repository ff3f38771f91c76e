//! The external transform capability.
//!
//! Pixel-level work is not designed here: the core only needs
//! "mutate the file at `path` according to `action`, or fail". The
//! worker crate provides the real implementation; tests substitute
//! mocks.

use std::path::Path;

use async_trait::async_trait;

use crate::action::ImageAction;
use crate::error::TransformError;

/// Opaque capability that applies an action to an image file in place.
#[async_trait]
pub trait Transform: Send + Sync {
    async fn apply(&self, path: &Path, action: ImageAction) -> Result<(), TransformError>;
}
