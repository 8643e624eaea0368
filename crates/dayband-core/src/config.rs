//! TOML-based session configuration.
//!
//! Editor tunables: the default variance multiplier and its slider
//! range, the keyboard step, and the export file stem. Every field has
//! a serde default so a partial file (or none at all) still yields a
//! working session.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::export::EXPORT_BASENAME;

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Multiplier applied by the global cubic recompute.
    #[serde(default = "default_multiplier")]
    pub variance_multiplier: f64,
    /// Lower end of the multiplier slider.
    #[serde(default = "default_multiplier_min")]
    pub multiplier_min: f64,
    /// Upper end of the multiplier slider.
    #[serde(default = "default_multiplier_max")]
    pub multiplier_max: f64,
    /// Variance change per arrow-key press.
    #[serde(default = "default_variance_step")]
    pub variance_step: f64,
    /// Export file stem (`.csv` is appended).
    #[serde(default = "default_export_basename")]
    pub export_basename: String,
}

fn default_multiplier() -> f64 {
    1.0
}
fn default_multiplier_min() -> f64 {
    0.1
}
fn default_multiplier_max() -> f64 {
    3.0
}
fn default_variance_step() -> f64 {
    0.01
}
fn default_export_basename() -> String {
    EXPORT_BASENAME.to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            variance_multiplier: default_multiplier(),
            multiplier_min: default_multiplier_min(),
            multiplier_max: default_multiplier_max(),
            variance_step: default_variance_step(),
            export_basename: default_export_basename(),
        }
    }
}

impl SessionConfig {
    /// Parse and validate a TOML document.
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(text).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::load_from_str(&text)
    }

    /// Serialize back to TOML.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.multiplier_min <= 0.0 {
            return Err(ConfigError::InvalidValue {
                key: "multiplier_min".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.multiplier_max < self.multiplier_min {
            return Err(ConfigError::InvalidValue {
                key: "multiplier_max".to_string(),
                message: "must be >= multiplier_min".to_string(),
            });
        }
        if !(self.multiplier_min..=self.multiplier_max).contains(&self.variance_multiplier) {
            return Err(ConfigError::InvalidValue {
                key: "variance_multiplier".to_string(),
                message: format!(
                    "must be within [{}, {}]",
                    self.multiplier_min, self.multiplier_max
                ),
            });
        }
        if !(self.variance_step > 0.0 && self.variance_step <= 1.0) {
            return Err(ConfigError::InvalidValue {
                key: "variance_step".to_string(),
                message: "must be in (0, 1]".to_string(),
            });
        }
        if self.export_basename.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "export_basename".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Clamp a requested multiplier into the configured slider range.
    pub fn clamp_multiplier(&self, multiplier: f64) -> f64 {
        multiplier.clamp(self.multiplier_min, self.multiplier_max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.variance_multiplier, 1.0);
        assert_eq!(config.multiplier_min, 0.1);
        assert_eq!(config.multiplier_max, 3.0);
        assert_eq!(config.variance_step, 0.01);
        assert_eq!(config.export_basename, "schedule-analysis-result");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config = SessionConfig::load_from_str("variance_multiplier = 2.0\n").unwrap();
        assert_eq!(config.variance_multiplier, 2.0);
        assert_eq!(config.variance_step, 0.01);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = SessionConfig::load_from_str("").unwrap();
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = SessionConfig::default();
        let text = config.to_toml_string().unwrap();
        let reloaded = SessionConfig::load_from_str(&text).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(SessionConfig::load_from_str("multiplier_min = 0.0\n").is_err());
        assert!(SessionConfig::load_from_str("multiplier_max = 0.05\n").is_err());
        assert!(SessionConfig::load_from_str("variance_multiplier = 9.0\n").is_err());
        assert!(SessionConfig::load_from_str("variance_step = 0.0\n").is_err());
        assert!(SessionConfig::load_from_str("export_basename = \"\"\n").is_err());
    }

    #[test]
    fn test_clamp_multiplier() {
        let config = SessionConfig::default();
        assert_eq!(config.clamp_multiplier(0.05), 0.1);
        assert_eq!(config.clamp_multiplier(1.5), 1.5);
        assert_eq!(config.clamp_multiplier(10.0), 3.0);
    }
}
