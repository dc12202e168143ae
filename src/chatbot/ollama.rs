//! Ollama local-runner client.
//!
//! Talks to a locally reachable model server over plain HTTP with no
//! authentication.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::ChatbotClient;
use super::error::ClientError;
use super::options::GenerationOptions;
use super::types::{ChatReply, Message, Model, Role};

/// Local inference can take minutes on modest hardware, so the chat call
/// carries a per-request timeout far above the library default.
const CHAT_TIMEOUT: Duration = Duration::from_secs(300);

/// Client for an Ollama-style local runner.
#[derive(Debug)]
pub struct OllamaClient {
    client: Client,
    host: String,
    system_prompt: Option<String>,
}

impl OllamaClient {
    pub fn new(host: String) -> Self {
        Self {
            client: Client::new(),
            host,
            system_prompt: None,
        }
    }

    fn messages_for(&self, message: &str) -> Vec<Message> {
        let mut messages = Vec::new();
        if let Some(prompt) = &self.system_prompt {
            messages.push(Message {
                role: Role::System,
                content: prompt.clone(),
            });
        }
        messages.push(Message {
            role: Role::User,
            content: message.to_string(),
        });
        messages
    }
}

#[async_trait]
impl ChatbotClient for OllamaClient {
    async fn get_models(&self) -> Result<Vec<Model>, ClientError> {
        let url = format!("http://{}/api/tags", self.host);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        let body = response.text().await?;
        let listing: TagsResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Schema(e.to_string()))?;

        Ok(listing
            .models
            .into_iter()
            .map(|entry| Model {
                name: entry.name,
                parameter_size: entry.details.parameter_size,
            })
            .collect())
    }

    async fn chat(
        &self,
        message: &str,
        model: &Model,
        options: Option<&GenerationOptions>,
    ) -> Result<ChatReply, ClientError> {
        let runtime_params = match options {
            Some(options) => {
                options.validate()?;
                // An all-unset struct stays off the wire entirely.
                (!options.is_empty()).then(|| RuntimeParams::from(options))
            }
            None => None,
        };

        let body = ChatBody {
            model: model.name.clone(),
            messages: self.messages_for(message),
            stream: false,
            options: runtime_params,
        };
        let url = format!("http://{}/api/chat", self.host);
        debug!(model = %model.name, "ollama chat request");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .timeout(CHAT_TIMEOUT)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        let reply: serde_json::Value = response.json().await?;
        let elapsed_ms = start.elapsed().as_millis() as i64;

        Ok(match message_content(&reply) {
            Ok(content) => ChatReply { elapsed_ms, content },
            Err(description) => ChatReply {
                elapsed_ms: -1,
                content: description,
            },
        })
    }

    fn set_system_prompt(&mut self, prompt: &str) {
        if !prompt.is_empty() {
            self.system_prompt = Some(prompt.to_string());
        }
    }
}

/// Unpack `message.content` from a chat response.
///
/// Same lenient final step as the gateway client: a malformed reply becomes
/// a description for the caller instead of an error.
fn message_content(reply: &serde_json::Value) -> Result<String, String> {
    reply
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| format!("chat response has no message content: {reply}"))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
struct ChatBody {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<RuntimeParams>,
}

/// Numeric options nested under the body's `options` key, renamed to the
/// runner's vocabulary where it differs.
#[derive(Serialize)]
struct RuntimeParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_ctx: Option<u32>,
}

impl From<&GenerationOptions> for RuntimeParams {
    fn from(options: &GenerationOptions) -> Self {
        Self {
            num_predict: options.max_tokens,
            temperature: options.temperature,
            top_k: options.top_k,
            top_p: options.top_p,
            seed: options.seed,
            num_ctx: options.context_window_size,
        }
    }
}

#[derive(Deserialize)]
struct TagsResponse {
    models: Vec<TagEntry>,
}

#[derive(Deserialize)]
struct TagEntry {
    name: String,
    details: TagDetails,
}

#[derive(Deserialize)]
struct TagDetails {
    parameter_size: String,
}
