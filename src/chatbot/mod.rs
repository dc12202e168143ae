//! Chatbot clients for chat completions.

mod client;
mod error;
mod factory;
mod ollama;
mod openwebui;
mod options;
mod types;

pub use client::ChatbotClient;
pub use error::ClientError;
pub use factory::{ClientFactory, GATEWAY_HOST};
pub use ollama::OllamaClient;
pub use openwebui::OpenWebUIClient;
pub use options::{GenerationOptions, OptionsError};
pub use types::{ChatReply, Message, Model, Role};
