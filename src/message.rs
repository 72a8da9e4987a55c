//! Wire protocol messages exchanged with peer devices.
//!
//! Every frame is a JSON object tagged by a `type` field. Peers that do not
//! wrap clipboard text in an envelope are still supported: payloads carrying
//! a bare `text` field and raw non-JSON payloads both degrade to a fallback
//! clipboard update.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use warp::ws::Message;

/// Origin label attached to updates produced by the local clipboard poller.
pub const LOCAL_SOURCE: &str = "desktop";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClipboardMessage {
    PairingRequest,
    PairingResponse {
        success: bool,
        message: String,
    },
    ClipboardUpdate {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        source: Option<String>,
    },
}

impl ClipboardMessage {
    /// Build a clipboard update carrying the originating device id
    /// (or [`LOCAL_SOURCE`] for the local clipboard).
    pub fn clipboard_update(text: impl Into<String>, source: impl Into<String>) -> Self {
        ClipboardMessage::ClipboardUpdate {
            text: text.into(),
            source: Some(source.into()),
        }
    }

    /// The acknowledgment sent in reply to a pairing request.
    pub fn pairing_success() -> Self {
        ClipboardMessage::PairingResponse {
            success: true,
            message: "Pairing successful".to_string(),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_ws_message(&self) -> Result<Message> {
        Ok(Message::text(self.to_json()?))
    }
}

/// Receipt acknowledgment for a clipboard update.
///
/// Deliberately type-less on the wire: `{"status":"success",...}`. It
/// acknowledges receipt, not propagation, so it is sent even when the value
/// was a duplicate and nothing was broadcast.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateAck {
    pub status: String,
    pub message: String,
}

impl UpdateAck {
    pub fn success() -> Self {
        Self {
            status: "success".to_string(),
            message: "Clipboard updated".to_string(),
        }
    }
}

/// One inbound frame after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundMessage {
    PairingRequest,
    /// A well-formed `clipboard_update` envelope; gets an [`UpdateAck`].
    ClipboardUpdate { text: String },
    /// Unwrapped clipboard text (bare `text` field or a non-JSON payload);
    /// applied without an acknowledgment.
    FallbackText { text: String },
    /// Parsed JSON carrying nothing usable; dropped without a reply.
    Ignored,
}

/// Classify a raw text frame from a peer.
///
/// The ladder: typed envelope first, then any JSON object with a string
/// `text` field, then the raw payload itself as plain clipboard text.
pub fn parse_inbound(raw: &str) -> InboundMessage {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(_) => {
            return InboundMessage::FallbackText {
                text: raw.to_string(),
            }
        }
    };

    match value.get("type").and_then(|t| t.as_str()) {
        Some("pairing_request") => return InboundMessage::PairingRequest,
        Some("clipboard_update") => {
            if let Some(text) = value.get("text").and_then(|t| t.as_str()) {
                return InboundMessage::ClipboardUpdate {
                    text: text.to_string(),
                };
            }
            // clipboard_update without text falls through to the bare-text
            // check, same as any other unusable envelope
        }
        _ => {}
    }

    match value.get("text").and_then(|t| t.as_str()) {
        Some(text) => InboundMessage::FallbackText {
            text: text.to_string(),
        },
        None => InboundMessage::Ignored,
    }
}
