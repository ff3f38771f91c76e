//! The wire payload carried by the broker.
//!
//! A [`JobMessage`] is a reference, not a copy: the consumer must
//! re-fetch the metadata record before acting, since the record is the
//! sole source of truth for the file path and current state. The
//! `action` field stays a string on the wire so that a payload carrying
//! an action this build does not know still decodes; the dispatcher
//! turns it into an [`ImageAction`](crate::ImageAction) and fails the
//! record if it cannot.

use serde::{Deserialize, Serialize};

use crate::action::ImageAction;
use crate::error::CoreError;
use crate::types::DbId;

/// Current wire schema version.
pub const MESSAGE_VERSION: u32 = 1;

/// One job hand-off: "apply `action` to the image behind `id`".
///
/// Serialized as JSON text. Exactly one message is produced per record
/// creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobMessage {
    /// Schema version, for forward compatibility.
    pub version: u32,
    /// Metadata-store id of the image record.
    pub id: DbId,
    /// Requested action name, validated at dispatch time.
    pub action: String,
}

impl JobMessage {
    pub fn new(id: DbId, action: ImageAction) -> Self {
        Self {
            version: MESSAGE_VERSION,
            id,
            action: action.as_str().to_string(),
        }
    }

    /// Serialize to the JSON text form sent over the topic.
    pub fn encode(&self) -> Result<Vec<u8>, CoreError> {
        serde_json::to_vec(self)
            .map_err(|e| CoreError::Validation(format!("failed to encode job message: {e}")))
    }

    /// Decode a received payload.
    ///
    /// Empty payloads, malformed JSON, and unknown schema versions are
    /// all [`CoreError::Validation`] — never a panic.
    pub fn decode(payload: &[u8]) -> Result<Self, CoreError> {
        if payload.is_empty() {
            return Err(CoreError::Validation("empty message payload".into()));
        }
        let message: JobMessage = serde_json::from_slice(payload)
            .map_err(|e| CoreError::Validation(format!("malformed job message: {e}")))?;
        if message.version != MESSAGE_VERSION {
            return Err(CoreError::Validation(format!(
                "unsupported message version {}",
                message.version
            )));
        }
        Ok(message)
    }

    /// Parse the action string against the known action set.
    pub fn parse_action(&self) -> Result<ImageAction, CoreError> {
        self.action.parse()
    }
}
