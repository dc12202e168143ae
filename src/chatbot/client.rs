//! The uniform client contract backends implement.

use async_trait::async_trait;

use super::error::ClientError;
use super::options::GenerationOptions;
use super::types::{ChatReply, Model};

/// Uniform interface over chat backends with different API formats.
#[async_trait]
pub trait ChatbotClient: Send + Sync + std::fmt::Debug {
    /// Query the backend's model inventory.
    ///
    /// Every call hits the backend again; nothing is cached. A body that
    /// does not match the expected listing shape fails the whole call, no
    /// partial list is returned.
    async fn get_models(&self) -> Result<Vec<Model>, ClientError>;

    /// Send a single user-turn message and return the first completion
    /// choice's text plus the wall-clock latency of the network round-trip.
    ///
    /// Supplied options are validated before anything is sent; a bad value
    /// is an error with no network side effect. Transport and status
    /// failures are errors too. A success response whose choice/message
    /// shape cannot be unpacked is the one lenient case: it comes back as
    /// `ChatReply { elapsed_ms: -1, .. }` carrying the failure description.
    async fn chat(
        &self,
        message: &str,
        model: &Model,
        options: Option<&GenerationOptions>,
    ) -> Result<ChatReply, ClientError>;

    /// Store a system prompt to prepend to every later [`chat`](Self::chat)
    /// call from this instance. Empty prompts are ignored.
    fn set_system_prompt(&mut self, prompt: &str);
}
