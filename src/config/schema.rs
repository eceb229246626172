//! Configuration schema types for `huepick.toml`
//!
//! Defines the structure and validation rules for picker configuration.

use crate::parser::parse_value;
use crate::recent::DEFAULT_CAPACITY;
use serde::{Deserialize, Serialize};

/// Defaults applied when an operation's optional argument is missing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    /// Solid color used by `set_solid` without an argument
    #[serde(default = "default_color")]
    pub color: String,
    /// Gradient used by `set_gradient` without an argument
    #[serde(default = "default_gradient")]
    pub gradient: String,
    /// Angle used when switching a gradient to linear
    #[serde(default = "default_angle")]
    pub angle: u16,
    /// Position of a new stop when none is given
    #[serde(default = "default_stop_position")]
    pub stop_position: u8,
    /// Number of recent colors to remember
    #[serde(default = "default_history_size")]
    pub history_size: usize,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            gradient: default_gradient(),
            angle: default_angle(),
            stop_position: default_stop_position(),
            history_size: default_history_size(),
        }
    }
}

fn default_color() -> String {
    "rgba(175, 51, 242, 1)".to_string()
}

fn default_gradient() -> String {
    "linear-gradient(90deg, rgba(96, 93, 93, 1) 0%, rgba(255, 255, 255, 1) 100%)".to_string()
}

fn default_angle() -> u16 {
    90
}

fn default_stop_position() -> u8 {
    50
}

fn default_history_size() -> usize {
    DEFAULT_CAPACITY
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level or `tracing` filter directive (e.g. "warn", "huepick=debug")
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_level() }
    }
}

fn default_level() -> String {
    "error".to_string()
}

/// Complete huepick.toml configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PickerConfig {
    /// Default settings
    #[serde(default)]
    pub defaults: DefaultsConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "defaults.angle")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "huepick.toml: '{}' {}", self.field, self.message)
    }
}

impl PickerConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        match parse_value(&self.defaults.color) {
            Ok(value) if !value.is_gradient() => {}
            Ok(_) => errors.push(ConfigValidationError {
                field: "defaults.color".to_string(),
                message: "must be a solid color, not a gradient".to_string(),
            }),
            Err(e) => errors.push(ConfigValidationError {
                field: "defaults.color".to_string(),
                message: e.to_string(),
            }),
        }

        match parse_value(&self.defaults.gradient) {
            Ok(value) if value.is_gradient() => {}
            Ok(_) => errors.push(ConfigValidationError {
                field: "defaults.gradient".to_string(),
                message: "must be a linear or radial gradient".to_string(),
            }),
            Err(e) => errors.push(ConfigValidationError {
                field: "defaults.gradient".to_string(),
                message: e.to_string(),
            }),
        }

        if self.defaults.angle > 360 {
            errors.push(ConfigValidationError {
                field: "defaults.angle".to_string(),
                message: "must be between 0 and 360".to_string(),
            });
        }

        if self.defaults.stop_position > 100 {
            errors.push(ConfigValidationError {
                field: "defaults.stop_position".to_string(),
                message: "must be between 0 and 100".to_string(),
            });
        }

        if self.defaults.history_size == 0 {
            errors.push(ConfigValidationError {
                field: "defaults.history_size".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }
}
