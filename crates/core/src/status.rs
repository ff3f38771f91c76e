//! Job lifecycle status.
//!
//! Statuses only move forward: `pending → processing → {modified,
//! failed}`. `deleted` is reachable from any non-terminal state (set by
//! the external delete path, phase one of the two-phase delete) and is
//! terminal — the dispatcher removes both the file and the row when it
//! observes it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle state of a job record, stored as TEXT in the `images`
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Pending,
    Processing,
    Modified,
    Failed,
    Deleted,
}

impl ImageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ImageStatus::Pending => "pending",
            ImageStatus::Processing => "processing",
            ImageStatus::Modified => "modified",
            ImageStatus::Failed => "failed",
            ImageStatus::Deleted => "deleted",
        }
    }

    /// Terminal states are never left once entered.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            ImageStatus::Modified | ImageStatus::Failed | ImageStatus::Deleted
        )
    }
}

impl fmt::Display for ImageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImageStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ImageStatus::Pending),
            "processing" => Ok(ImageStatus::Processing),
            "modified" => Ok(ImageStatus::Modified),
            "failed" => Ok(ImageStatus::Failed),
            "deleted" => Ok(ImageStatus::Deleted),
            other => Err(CoreError::Validation(format!(
                "unknown status: {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states() {
        assert!(!ImageStatus::Pending.is_terminal());
        assert!(!ImageStatus::Processing.is_terminal());
        assert!(ImageStatus::Modified.is_terminal());
        assert!(ImageStatus::Failed.is_terminal());
        assert!(ImageStatus::Deleted.is_terminal());
    }

    #[test]
    fn string_round_trips() {
        for status in [
            ImageStatus::Pending,
            ImageStatus::Processing,
            ImageStatus::Modified,
            ImageStatus::Failed,
            ImageStatus::Deleted,
        ] {
            assert_eq!(status.as_str().parse::<ImageStatus>().unwrap(), status);
        }
    }
}
