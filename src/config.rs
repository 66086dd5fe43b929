//! Predictor configuration
//!
//! ```
//! use m6apred::PredictorConfig;
//!
//! let config = PredictorConfig::from_toml_str("positive_threshold = 0.6")?;
//! assert_eq!(config.positive_threshold, 0.6);
//!
//! let defaults = PredictorConfig::from_toml_str("")?;
//! assert_eq!(defaults, PredictorConfig::default());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use crate::error::{PredictError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default probability cutoff for a `Positive` call
pub const DEFAULT_POSITIVE_THRESHOLD: f64 = 0.5;

/// Settings applied to every prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PredictorConfig {
    /// Probabilities strictly above this value are called `Positive`
    pub positive_threshold: f64,
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            positive_threshold: DEFAULT_POSITIVE_THRESHOLD,
        }
    }
}

impl PredictorConfig {
    /// Configuration with a custom threshold
    pub fn with_threshold(positive_threshold: f64) -> Result<Self> {
        let config = Self { positive_threshold };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate TOML
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: PredictorConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a TOML file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check the threshold is finite and within [0, 1]
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.positive_threshold)
    }
}

/// Fail unless `threshold` is a finite value in [0, 1]
pub(crate) fn validate_threshold(threshold: f64) -> Result<()> {
    if threshold.is_finite() && (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(PredictError::InvalidThreshold(threshold))
    }
}
