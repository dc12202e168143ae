//! One-call composition: config, client, model listing, model choice.

use std::path::Path;

use thiserror::Error;
use tracing::{info, warn};

use crate::chatbot::{ChatbotClient, ClientError, ClientFactory, Model};
use crate::config::{Config, ConfigError};

/// A ready-to-use client plus the model picked for it.
pub struct Bootstrapped {
    pub client: Box<dyn ChatbotClient>,
    pub model: Model,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Client(#[from] ClientError),

    /// The backend listed no models at all.
    #[error("backend listed no models")]
    NoModels,

    /// A listed model's parameter size could not be read as a number, so
    /// the smallest-model fallback has nothing to compare.
    #[error("unparsable parameter size {size:?} for model {model}")]
    InvalidParameterSize { model: String, size: String },
}

/// Load config from `path`, build a client for it, list the backend's
/// models, and settle on one.
pub async fn bootstrap(
    path: impl AsRef<Path>,
    preferred: Option<&str>,
) -> Result<Bootstrapped, BootstrapError> {
    let config = Config::load(path).await?;
    let client = ClientFactory::create(&config)?;
    let models = client.get_models().await?;
    let model = select_model(models, preferred)?;
    info!(model = %model.name, "bootstrap complete");
    Ok(Bootstrapped { client, model })
}

/// Resolve which model to use from a listing.
///
/// An exact `preferred` name match wins regardless of size. Anything else
/// falls back to the smallest model by parameter count; the first listed
/// wins ties.
pub fn select_model(
    models: Vec<Model>,
    preferred: Option<&str>,
) -> Result<Model, BootstrapError> {
    if let Some(name) = preferred {
        if let Some(model) = models.iter().find(|m| m.name == name) {
            return Ok(model.clone());
        }
        warn!(preferred = name, "preferred model not listed, falling back to smallest");
    }

    let mut smallest: Option<(f64, Model)> = None;
    for model in models {
        let count =
            model
                .parameter_count()
                .ok_or_else(|| BootstrapError::InvalidParameterSize {
                    model: model.name.clone(),
                    size: model.parameter_size.clone(),
                })?;
        smallest = match smallest {
            Some((best, kept)) if best <= count => Some((best, kept)),
            _ => Some((count, model)),
        };
    }

    smallest
        .map(|(_, model)| model)
        .ok_or(BootstrapError::NoModels)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sized(name: &str, size: &str) -> Model {
        Model {
            name: name.to_string(),
            parameter_size: size.to_string(),
        }
    }

    fn listing() -> Vec<Model> {
        vec![
            sized("llama2:7b", "7B"),
            sized("codellama:13b", "13B"),
            sized("phi3:mini", "3B"),
        ]
    }

    #[test]
    fn no_preference_selects_the_smallest() {
        let model = select_model(listing(), None).unwrap();
        assert_eq!(model.name, "phi3:mini");
    }

    #[test]
    fn exact_preferred_match_wins_regardless_of_size() {
        let model = select_model(listing(), Some("codellama:13b")).unwrap();
        assert_eq!(model.name, "codellama:13b");
    }

    #[test]
    fn unmatched_preference_falls_back_to_the_smallest() {
        let model = select_model(listing(), Some("gpt-5")).unwrap();
        assert_eq!(model.name, "phi3:mini");
    }

    #[test]
    fn preferred_match_skips_size_parsing() {
        let models = vec![sized("custom", "unknown"), sized("llama2:7b", "7B")];
        let model = select_model(models, Some("custom")).unwrap();
        assert_eq!(model.name, "custom");
    }

    #[test]
    fn fractional_sizes_compare_numerically() {
        let models = vec![sized("llama2:7b", "7B"), sized("phi3:mini", "3.8B")];
        let model = select_model(models, None).unwrap();
        assert_eq!(model.name, "phi3:mini");
    }

    #[test]
    fn ties_keep_the_first_listed() {
        let models = vec![sized("first:7b", "7B"), sized("second:7b", "7B")];
        let model = select_model(models, None).unwrap();
        assert_eq!(model.name, "first:7b");
    }

    #[test]
    fn unparsable_size_is_an_error_during_fallback() {
        let models = vec![sized("llama2:7b", "7B"), sized("mystery", "13b")];
        let err = select_model(models, None).unwrap_err();
        assert!(matches!(err, BootstrapError::InvalidParameterSize { .. }));
    }

    #[test]
    fn empty_listing_is_an_error() {
        let err = select_model(Vec::new(), None).unwrap_err();
        assert!(matches!(err, BootstrapError::NoModels));
    }
}
