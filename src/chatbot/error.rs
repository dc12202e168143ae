//! Client error types.

use thiserror::Error;

use super::options::OptionsError;

/// Errors surfaced by the chatbot clients and their factory.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a status line came back.
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    #[error("api error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body did not match the expected model-listing shape.
    #[error("unexpected response shape: {0}")]
    Schema(String),

    /// A generation option failed range validation; nothing was sent.
    #[error("invalid generation options: {0}")]
    InvalidOptions(#[from] OptionsError),

    /// The gateway host was selected without a bearer credential.
    #[error("missing bearer credential for gateway host {host}")]
    MissingCredential { host: String },

    /// No client route for the configured host. Unreachable while the
    /// factory treats every non-gateway host as a local runner.
    #[error("no client route for host {host}")]
    UnknownBackend { host: String },
}
