//! Error handling module for the rubt CLI.

use rubric_sym::{ConfigError, SymbolError};
use thiserror::Error;

/// Main error type for the rubt CLI application.
#[derive(Error, Debug)]
pub enum RubtError {
    /// Configuration file could not be found or parsed.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command-line input was rejected.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The registry rejected its configuration.
    #[error("Registry configuration error: {0}")]
    Registry(#[from] ConfigError),

    /// A symbol ID could not be resolved.
    #[error("Symbol error: {0}")]
    Symbol(#[from] SymbolError),

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error when a TOML configuration file is malformed.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type alias using RubtError.
pub type Result<T> = std::result::Result<T, RubtError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = RubtError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_validation_error_display() {
        let err = RubtError::Validation("jobs must be > 0".to_string());
        assert_eq!(err.to_string(), "Validation error: jobs must be > 0");
    }

    #[test]
    fn test_registry_error_conversion() {
        let err: RubtError = ConfigError::InvalidShardAmount(3).into();
        assert!(matches!(err, RubtError::Registry(_)));
        assert!(err.to_string().contains("shard amount 3"));
    }

    #[test]
    fn test_symbol_error_conversion() {
        let err: RubtError = SymbolError::NotFound { id: 0x10 }.into();
        assert_eq!(err.to_string(), "Symbol error: Symbol not found: id 0x10");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: RubtError = io_err.into();
        assert!(matches!(err, RubtError::Io(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("= nope").unwrap_err();
        let err: RubtError = toml_err.into();
        assert!(matches!(err, RubtError::Toml(_)));
    }
}
