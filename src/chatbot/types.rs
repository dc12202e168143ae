//! Common types shared by the chatbot backends.

use serde::{Deserialize, Serialize};

/// A model advertised by a backend's listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    /// Backend-specific identifier, e.g. "codellama:13b".
    pub name: String,
    /// Human-readable parameter count, e.g. "13B".
    pub parameter_size: String,
}

impl Model {
    /// Numeric value of `parameter_size` with the trailing `B` unit stripped.
    ///
    /// Returns `None` when the size does not end in `B` or the remainder is
    /// not a number; callers decide whether that is fatal.
    pub fn parameter_count(&self) -> Option<f64> {
        self.parameter_size.strip_suffix('B')?.parse().ok()
    }
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// The role of a message sender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// Outcome of a chat call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatReply {
    /// Milliseconds spent in the network round-trip, or `-1` when the reply
    /// body could not be unpacked into a completion.
    pub elapsed_ms: i64,
    /// The first completion choice's text, or the unpacking failure
    /// description when `elapsed_ms` is `-1`.
    pub content: String,
}
