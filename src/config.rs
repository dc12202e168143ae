//! Configuration for the chatbot clients.

use std::io::ErrorKind;
use std::path::Path;

use tokio::fs;

use serde::Deserialize;
use thiserror::Error;

/// Connection settings handed to the client factory.
///
/// The value is always passed explicitly; nothing in the crate reads
/// ambient process state.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Host the client should talk to. Anything other than the known
    /// gateway host is treated as a local runner reachable by that name.
    #[serde(default = "default_host")]
    pub chatbot_api_host: String,
    /// Bearer credential, required when the gateway host is configured.
    #[serde(default)]
    pub bearer: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chatbot_api_host: default_host(),
            bearer: None,
        }
    }
}

impl Config {
    /// Read a YAML config file. A missing file yields the defaults.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        Ok(serde_saphyr::from_str(&contents)?)
    }
}

fn default_host() -> String {
    "localhost:11434".to_string()
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.chatbot_api_host, "localhost:11434");
        assert!(config.bearer.is_none());
    }

    #[tokio::test]
    async fn test_load_missing_file_returns_defaults() {
        let tmp_dir = TempDir::new().unwrap();
        let missing_path = tmp_dir.path().join("missing-config.yaml");
        let config = Config::load(missing_path.to_str().unwrap()).await.unwrap();
        assert_eq!(config.chatbot_api_host, "localhost:11434");
        assert!(config.bearer.is_none());
    }

    #[tokio::test]
    async fn test_load_valid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
chatbot_api_host: "chat.hpc.fau.edu"
bearer: "sk-123"
"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(config.chatbot_api_host, "chat.hpc.fau.edu");
        assert_eq!(config.bearer.as_deref(), Some("sk-123"));
    }

    #[tokio::test]
    async fn test_load_partial_yaml_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "chatbot_api_host: \"gpu-box.lan:11434\"").unwrap();

        let config = Config::load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(config.chatbot_api_host, "gpu-box.lan:11434");
        assert!(config.bearer.is_none()); // default
    }

    #[tokio::test]
    async fn test_load_invalid_yaml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid: yaml: content: [").unwrap();

        let result = Config::load(file.path().to_str().unwrap()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_config_error_display() {
        let io_error = ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "test",
        ));
        assert!(io_error.to_string().contains("failed to read config file"));
    }
}
