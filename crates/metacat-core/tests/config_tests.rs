use metacat_core::config::{
    DEFAULT_FAIL_ON_CYCLES, DEFAULT_INFER_MISSING_KINDS, DEFAULT_MIN_CONFIDENCE, ENV_MIN_CONFIDENCE,
};
use metacat_core::{Config, LineageConfig, OutputFormat};

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.lineage.infer_missing_kinds, DEFAULT_INFER_MISSING_KINDS);
    assert_eq!(config.lineage.min_confidence, DEFAULT_MIN_CONFIDENCE);
    assert_eq!(config.lineage.fail_on_cycles, DEFAULT_FAIL_ON_CYCLES);
    assert_eq!(config.output.format, OutputFormat::Text);
}

#[test]
fn test_default_string_parses_back() {
    let config = Config::from_toml_str(&Config::default_config_string()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml_str("[output]\nformat = \"json\"\n").unwrap();
    assert_eq!(config.output.format, OutputFormat::Json);
    assert_eq!(config.lineage, LineageConfig::default());
}

#[test]
fn test_empty_toml_is_default() {
    assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
}

#[test]
fn test_out_of_range_override_ignored() {
    let mut config = Config::default();
    config.apply_overrides(|key| (key == ENV_MIN_CONFIDENCE).then(|| "7".to_string()));
    assert_eq!(config.lineage.min_confidence, DEFAULT_MIN_CONFIDENCE);
}

#[test]
fn test_unknown_format_rejected() {
    assert!("yaml".parse::<OutputFormat>().is_err());
    assert!(Config::from_toml_str("[output]\nformat = \"xml\"\n").is_err());
}
