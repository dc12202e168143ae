//! Backend-agnostic generation options.

use thiserror::Error;

/// Generation parameters understood by every backend.
///
/// Unset fields fall back to the backend's own defaults. Names here are
/// generic; each client maps them onto its wire format when building a
/// request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationOptions {
    pub max_tokens: Option<u32>,
    /// Sampling temperature in [0, 1].
    pub temperature: Option<f32>,
    /// Top-k sampling cutoff in [0, 100].
    pub top_k: Option<u32>,
    /// Nucleus sampling cutoff in [0, 1].
    pub top_p: Option<f32>,
    pub context_window_size: Option<u32>,
    pub seed: Option<i64>,
}

/// A generation option outside its declared range.
#[derive(Debug, Error, PartialEq)]
pub enum OptionsError {
    #[error("temperature {0} outside [0, 1]")]
    Temperature(f32),

    #[error("top_k {0} outside [0, 100]")]
    TopK(u32),

    #[error("top_p {0} outside [0, 1]")]
    TopP(f32),
}

impl GenerationOptions {
    /// Check every set field against its declared range.
    ///
    /// Clients call this before translating options into a request body, so
    /// a bad value aborts the call before anything goes on the wire. Values
    /// are never clamped.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if let Some(t) = self.temperature
            && !(0.0..=1.0).contains(&t)
        {
            return Err(OptionsError::Temperature(t));
        }
        if let Some(k) = self.top_k
            && k > 100
        {
            return Err(OptionsError::TopK(k));
        }
        if let Some(p) = self.top_p
            && !(0.0..=1.0).contains(&p)
        {
            return Err(OptionsError::TopP(p));
        }
        Ok(())
    }

    /// True when no field is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_are_valid() {
        let options = GenerationOptions::default();
        assert!(options.validate().is_ok());
        assert!(options.is_empty());
    }

    #[test]
    fn in_range_options_are_valid() {
        let options = GenerationOptions {
            max_tokens: Some(512),
            temperature: Some(0.7),
            top_k: Some(40),
            top_p: Some(0.9),
            context_window_size: Some(4096),
            seed: Some(42),
        };
        assert!(options.validate().is_ok());
        assert!(!options.is_empty());
    }

    #[test]
    fn boundary_values_are_valid() {
        let options = GenerationOptions {
            temperature: Some(0.0),
            top_k: Some(100),
            top_p: Some(1.0),
            ..Default::default()
        };
        assert!(options.validate().is_ok());
    }

    #[test]
    fn temperature_out_of_range_is_rejected() {
        let options = GenerationOptions {
            temperature: Some(1.5),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::Temperature(1.5)));

        let options = GenerationOptions {
            temperature: Some(-0.1),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::Temperature(-0.1)));
    }

    #[test]
    fn top_k_out_of_range_is_rejected() {
        let options = GenerationOptions {
            top_k: Some(101),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::TopK(101)));
    }

    #[test]
    fn top_p_out_of_range_is_rejected() {
        let options = GenerationOptions {
            top_p: Some(1.01),
            ..Default::default()
        };
        assert_eq!(options.validate(), Err(OptionsError::TopP(1.01)));
    }

    #[test]
    fn nan_temperature_is_rejected() {
        let options = GenerationOptions {
            temperature: Some(f32::NAN),
            ..Default::default()
        };
        assert!(options.validate().is_err());
    }

    #[test]
    fn error_display_names_the_field() {
        assert_eq!(
            OptionsError::Temperature(2.0).to_string(),
            "temperature 2 outside [0, 1]"
        );
        assert_eq!(OptionsError::TopK(500).to_string(), "top_k 500 outside [0, 100]");
    }
}
