//! Calculator configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::format::DEFAULT_DECIMAL_PLACES;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration text is not valid JSON for [`CalculatorConfig`]
    #[error("Invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A value is out of range
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create a validation error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Tunables for an [`ExpressionBuffer`](crate::core::ExpressionBuffer)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Decimal places kept when formatting non-integer results
    pub decimal_places: u32,
    /// Show the `= …` preview while typing
    pub live_preview: bool,
    /// Text shown when a commit fails
    pub error_text: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            decimal_places: DEFAULT_DECIMAL_PLACES,
            live_preview: true,
            error_text: "Error".to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Largest accepted `decimal_places`; beyond this f64 has no digits left
    pub const MAX_DECIMAL_PLACES: u32 = 15;

    /// Create the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the decimal places kept in results
    #[must_use]
    pub const fn with_decimal_places(mut self, places: u32) -> Self {
        self.decimal_places = places;
        self
    }

    /// Enable or disable the live preview
    #[must_use]
    pub const fn with_live_preview(mut self, enabled: bool) -> Self {
        self.live_preview = enabled;
        self
    }

    /// Set the error text
    #[must_use]
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = text.into();
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> ConfigResult<()> {
        if self.decimal_places > Self::MAX_DECIMAL_PLACES {
            return Err(ConfigError::invalid(format!(
                "decimal_places must be at most {}, got {}",
                Self::MAX_DECIMAL_PLACES,
                self.decimal_places
            )));
        }
        if self.error_text.is_empty() {
            return Err(ConfigError::invalid("error_text must not be empty"));
        }
        Ok(())
    }

    /// Parse and validate a JSON document; missing fields take defaults
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Serialize to pretty JSON
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
