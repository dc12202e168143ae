//! Backend selection for configured hosts.

use tracing::info;

use super::client::ChatbotClient;
use super::error::ClientError;
use super::ollama::OllamaClient;
use super::openwebui::OpenWebUIClient;
use crate::config::Config;

/// The one host served by the gateway client.
pub const GATEWAY_HOST: &str = "chat.hpc.fau.edu";

/// Which backend a host routes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Backend {
    OpenWebUI,
    Ollama,
}

/// Routing is a heuristic, not host detection: the known gateway host gets
/// the gateway client, and any other value is assumed to name a reachable
/// local runner.
fn route(host: &str) -> Backend {
    if host == GATEWAY_HOST {
        Backend::OpenWebUI
    } else {
        Backend::Ollama
    }
}

/// Builds the right client for an explicit [`Config`].
///
/// Pure construction: no reachability checks, no network traffic.
pub struct ClientFactory;

impl ClientFactory {
    pub fn create(config: &Config) -> Result<Box<dyn ChatbotClient>, ClientError> {
        let host = config.chatbot_api_host.clone();
        match route(&host) {
            Backend::OpenWebUI => {
                let bearer = config
                    .bearer
                    .clone()
                    .ok_or_else(|| ClientError::MissingCredential { host: host.clone() })?;
                info!(%host, "selected openwebui gateway client");
                Ok(Box::new(OpenWebUIClient::new(host, bearer)))
            }
            Backend::Ollama => {
                info!(%host, "selected ollama client");
                Ok(Box::new(OllamaClient::new(host)))
            }
        }
    }
}
