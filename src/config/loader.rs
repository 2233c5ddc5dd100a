//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::LoggingOptions;
use crate::config::validation::{join_errors, validate_options, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

/// Parse and validate options from TOML text.
pub fn parse_options(content: &str) -> Result<LoggingOptions, ConfigError> {
    let options: LoggingOptions = toml::from_str(content)?;
    validate_options(&options).map_err(ConfigError::Validation)?;
    Ok(options)
}

/// Load and validate options from a TOML file.
pub fn load_options(path: &Path) -> Result<LoggingOptions, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_options(&content)
}
