//! OpenWebUI gateway client.
//!
//! Talks to a hosted, OpenAI-compatible chat API over HTTPS with a bearer
//! credential on every call.

use std::time::Instant;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::client::ChatbotClient;
use super::error::ClientError;
use super::options::GenerationOptions;
use super::types::{ChatReply, Message, Model, Role};

/// Client for an OpenWebUI-style gateway.
#[derive(Debug)]
pub struct OpenWebUIClient {
    client: Client,
    host: String,
    bearer: String,
    system_prompt: Option<String>,
}

impl OpenWebUIClient {
    pub fn new(host: String, bearer: String) -> Self {
        Self {
            client: Client::new(),
            host,
            bearer,
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
impl ChatbotClient for OpenWebUIClient {
    async fn get_models(&self) -> Result<Vec<Model>, ClientError> {
        let url = format!("https://{}/api/models", self.host);

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.bearer))
            .header("Content-Type", "application/json")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ClientError::Api { status, message });
        }

        let body = response.text().await?;
        let listing: ModelsResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Schema(e.to_string()))?;

        Ok(listing
            .data
            .into_iter()
            .map(|entry| Model {
                name: entry.name,
                parameter_size: entry.ollama.details.parameter_size,
            })
            .collect())
    }

    async fn chat(
        &self,
        message: &str,
        model: &Model,
        options: Option<&GenerationOptions>,
    ) -> Result<ChatReply, ClientError> {
        let params = match options {
            Some(options) => {
                options.validate()?;
                RequestParams::from(options)
            }
            None => RequestParams::default(),
        };

        let body = ChatBody {
            model: model.name.clone(),
            messages: self.messages_for(message),
            params,
        };
        let url = format!("https://{}/api/chat/completions", self.host);
        debug!(model = %model.name, "openwebui chat request");

        let start = Instant::now();
        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.bearer))
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

        Ok(match first_choice_content(&reply) {
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

/// Unpack `choices[0].message.content` from a completion body.
///
/// Failures come back as a description rather than an error: a malformed
/// reply still reaches the caller (tagged with the -1 latency sentinel)
/// instead of aborting the call.
fn first_choice_content(reply: &serde_json::Value) -> Result<String, String> {
    let choice = reply
        .get("choices")
        .and_then(|c| c.as_array())
        .and_then(|c| c.first())
        .ok_or_else(|| "chat completion response has no choices".to_string())?;

    choice
        .get("message")
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .map(str::to_string)
        .ok_or_else(|| format!("choice has no message content: {choice}"))
}

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Serialize)]
struct ChatBody {
    model: String,
    messages: Vec<Message>,
    #[serde(flatten)]
    params: RequestParams,
}

/// Generic options renamed onto the gateway's top-level request fields.
#[derive(Serialize, Default)]
struct RequestParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
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

impl From<&GenerationOptions> for RequestParams {
    fn from(options: &GenerationOptions) -> Self {
        Self {
            max_tokens: options.max_tokens,
            temperature: options.temperature,
            top_k: options.top_k,
            top_p: options.top_p,
            seed: options.seed,
            num_ctx: options.context_window_size,
        }
    }
}

#[derive(Deserialize)]
struct ModelsResponse {
    data: Vec<ModelEntry>,
}

#[derive(Deserialize)]
struct ModelEntry {
    name: String,
    ollama: OllamaEntry,
}

#[derive(Deserialize)]
struct OllamaEntry {
    details: OllamaDetails,
}

#[derive(Deserialize)]
struct OllamaDetails {
    parameter_size: String,
}
