//! The closed set of image transforms a job can request.
//!
//! The original design kept a runtime registry map of action names;
//! here the set is an exhaustive enum, so the only remaining
//! unknown-action path is parsing external input at the wire edge.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Target dimensions for the `resize` action (width, height).
pub const RESIZE_DIMENSIONS: (u32, u32) = (800, 600);

/// Target dimensions for the `miniature` action (width, height).
pub const MINIATURE_DIMENSIONS: (u32, u32) = (120, 120);

/// A transform requested for a previously registered image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageAction {
    /// Resize the image to [`RESIZE_DIMENSIONS`].
    Resize,
    /// Produce a thumbnail at [`MINIATURE_DIMENSIONS`], in place.
    Miniature,
    /// Overlay the default watermark.
    ///
    /// Not idempotent at the file level: a redelivered watermark job
    /// stacks a second overlay onto the first.
    Watermark,
}

impl ImageAction {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageAction::Resize => "resize",
            ImageAction::Miniature => "miniature",
            ImageAction::Watermark => "watermark",
        }
    }
}

impl fmt::Display for ImageAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "resize" => Ok(ImageAction::Resize),
            "miniature" => Ok(ImageAction::Miniature),
            "watermark" => Ok(ImageAction::Watermark),
            other => Err(CoreError::Validation(format!(
                "unknown action: {other:?}"
            ))),
        }
    }
}
