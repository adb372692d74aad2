//! Configuration types for metacat.
//!
//! Values are resolved with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `metacat.toml` file
//! 3. User config `~/.config/metacat/config.toml`
//! 4. Built-in defaults (lowest priority)
//!
//! This module only defines the data and how to apply overrides to it.
//! Locating and reading files is left to the binary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Edge triage and graph analysis.
    pub lineage: LineageConfig,

    /// How results are rendered.
    pub output: OutputConfig,
}

impl Config {
    /// Parse a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let min = self.lineage.min_confidence;
        if !(0.0..=1.0).contains(&min) {
            return Err(ConfigError::Invalid(format!(
                "lineage.min_confidence must be within [0, 1], got {}",
                min
            )));
        }
        Ok(())
    }

    /// Apply `METACAT_*` overrides through `lookup`.
    ///
    /// Unparseable values are ignored and the current value kept.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_INFER_KINDS).and_then(|v| parse_bool(&v)) {
            self.lineage.infer_missing_kinds = v;
        }
        if let Some(v) = lookup(ENV_MIN_CONFIDENCE).and_then(|v| v.parse::<f64>().ok()) {
            if (0.0..=1.0).contains(&v) {
                self.lineage.min_confidence = v;
            }
        }
        if let Some(v) = lookup(ENV_FAIL_ON_CYCLES).and_then(|v| parse_bool(&v)) {
            self.lineage.fail_on_cycles = v;
        }
        if let Some(v) = lookup(ENV_FORMAT).and_then(|v| v.parse().ok()) {
            self.output.format = v;
        }
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        Config::default().to_toml_string()
    }

    pub fn to_toml_string(&self) -> String {
        toml::to_string_pretty(self).unwrap_or_default()
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Lineage triage and analysis configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineageConfig {
    /// Infer a kind for candidates that do not supply one.
    pub infer_missing_kinds: bool,

    /// Reject inferred kinds below this confidence.
    pub min_confidence: f64,

    /// Report a cycle in accepted edges as a failure.
    pub fail_on_cycles: bool,
}

impl Default for LineageConfig {
    fn default() -> Self {
        Self {
            infer_missing_kinds: DEFAULT_INFER_MISSING_KINDS,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            fail_on_cycles: DEFAULT_FAIL_ON_CYCLES,
        }
    }
}

/// Output rendering configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

/// Rendering style for command output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One pretty-printed JSON document.
    Json,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid(format!("unknown output format: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.lineage.infer_missing_kinds, DEFAULT_INFER_MISSING_KINDS);
        assert_eq!(config.lineage.min_confidence, DEFAULT_MIN_CONFIDENCE);
        assert_eq!(config.output.format.to_string(), DEFAULT_OUTPUT_FORMAT);
    }

    #[test]
    fn test_config_to_toml() {
        let toml_str = Config::default_config_string();
        assert!(toml_str.contains("[lineage]"));
        assert!(toml_str.contains("[output]"));
        assert!(toml_str.contains("format = \"text\""));
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
[lineage]
min_confidence = 0.8
fail_on_cycles = false

[output]
format = "json"
"#;
        let config = Config::from_toml_str(toml_str).unwrap();
        assert_eq!(config.lineage.min_confidence, 0.8);
        assert!(!config.lineage.fail_on_cycles);
        assert!(config.lineage.infer_missing_kinds);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let err = Config::from_toml_str("[lineage]\nmin_confidence = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_INFER_KINDS, "off"),
            (ENV_MIN_CONFIDENCE, "0.9"),
            (ENV_FORMAT, "JSON"),
            (ENV_FAIL_ON_CYCLES, "maybe"),
        ]);
        let mut config = Config::default();
        config.apply_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert!(!config.lineage.infer_missing_kinds);
        assert_eq!(config.lineage.min_confidence, 0.9);
        assert_eq!(config.output.format, OutputFormat::Json);
        // Unparseable value leaves the default in place.
        assert_eq!(config.lineage.fail_on_cycles, DEFAULT_FAIL_ON_CYCLES);
    }
}
