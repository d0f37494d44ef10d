//! Codec configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HuffmanError, Result};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Report a trailing partial code on decode instead of dropping it
    #[serde(default)]
    pub strict_decode: bool,

    /// Extension for encoded files when no output path is given
    #[serde(default = "default_encoded_extension")]
    pub encoded_extension: String,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            strict_decode: false,
            encoded_extension: default_encoded_extension(),
        }
    }
}

impl CodecConfig {
    pub fn validate(&self) -> Result<()> {
        if !LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(HuffmanError::config(format!(
                "log_level must be one of {LOG_LEVELS:?}, got {:?}",
                self.log_level
            )));
        }
        if self.encoded_extension.is_empty() || self.encoded_extension.contains(['/', '\\']) {
            return Err(HuffmanError::config(format!(
                "encoded_extension {:?} is not a usable file extension",
                self.encoded_extension
            )));
        }
        Ok(())
    }

    /// Defaults overridden by `HUFFMAN_*` environment variables.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(level) = std::env::var("HUFFMAN_LOG_LEVEL") {
            config.log_level = level;
        }
        if let Ok(strict) = std::env::var("HUFFMAN_STRICT_DECODE") {
            config.strict_decode = parse_bool(&strict, config.strict_decode);
        }
        if let Ok(extension) = std::env::var("HUFFMAN_ENCODED_EXTENSION") {
            config.encoded_extension = extension;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| HuffmanError::config(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let serialized = serde_json::to_string_pretty(self)
            .map_err(|e| HuffmanError::config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, serialized)?;
        Ok(())
    }
}

fn parse_bool(value: &str, fallback: bool) -> bool {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => true,
        "0" | "false" | "no" | "off" => false,
        _ => fallback,
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_encoded_extension() -> String {
    "huf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CodecConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.log_level, "info");
        assert!(!config.strict_decode);
        assert_eq!(config.encoded_extension, "huf");
    }

    #[test]
    fn rejects_unknown_log_level() {
        let config = CodecConfig { log_level: "loud".into(), ..CodecConfig::default() };
        assert_eq!(config.validate().unwrap_err().category(), "config");
    }

    #[test]
    fn rejects_path_in_extension() {
        let config = CodecConfig { encoded_extension: "a/b".into(), ..CodecConfig::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_fields_take_defaults() {
        let config: CodecConfig = serde_json::from_str(r#"{"strict_decode": true}"#).unwrap();
        assert!(config.strict_decode);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.encoded_extension, "huf");
    }

    #[test]
    fn file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("huffman.json");
        let config = CodecConfig {
            log_level: "debug".into(),
            strict_decode: true,
            encoded_extension: "bin".into(),
        };
        config.save_to_file(&path).unwrap();
        assert_eq!(CodecConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn env_overrides_defaults() {
        // only test that sets HUFFMAN_* variables
        unsafe {
            std::env::set_var("HUFFMAN_LOG_LEVEL", "debug");
            std::env::set_var("HUFFMAN_STRICT_DECODE", "true");
            std::env::set_var("HUFFMAN_ENCODED_EXTENSION", "bin");
        }
        let config = CodecConfig::from_env().unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.strict_decode);
        assert_eq!(config.encoded_extension, "bin");

        unsafe {
            std::env::set_var("HUFFMAN_LOG_LEVEL", "chatty");
        }
        let err = CodecConfig::from_env().unwrap_err();
        assert_eq!(err.category(), "config");

        unsafe {
            std::env::remove_var("HUFFMAN_LOG_LEVEL");
            std::env::remove_var("HUFFMAN_STRICT_DECODE");
            std::env::remove_var("HUFFMAN_ENCODED_EXTENSION");
        }
        assert_eq!(CodecConfig::from_env().unwrap(), CodecConfig::default());
    }

    #[test]
    fn bool_parsing() {
        assert!(parse_bool("YES", false));
        assert!(!parse_bool("off", true));
        assert!(parse_bool("maybe", true));
    }
}
