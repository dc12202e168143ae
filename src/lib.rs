//! Chatmux - a uniform chat-completion client for hosted gateways and local
//! model runners.
//!
//! One [`chatbot::ChatbotClient`] trait fronts two backends: an
//! OpenWebUI-style gateway (HTTPS, bearer auth) and an Ollama local runner
//! (plain HTTP). [`chatbot::ClientFactory`] picks the backend from an
//! explicit [`config::Config`], and [`bootstrap::bootstrap`] composes config
//! loading, construction, and default-model selection into one call.

pub mod bootstrap;
pub mod chatbot;
pub mod config;
