//! Domain-specific error types for leader-power

use thiserror::Error;

/// Main error type for the leader-power library
#[derive(Error, Debug)]
pub enum PowerError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Invalid parameters: {message}")]
    InvalidParams { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for PowerError {
    fn from(err: anyhow::Error) -> Self {
        PowerError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for PowerError {
    fn from(err: std::io::Error) -> Self {
        PowerError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PowerError {
    fn from(err: serde_json::Error) -> Self {
        PowerError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PowerError {
    fn from(err: toml::de::Error) -> Self {
        PowerError::Config {
            message: format!("TOML parse error: {}", err),
        }
    }
}

/// Result type alias for leader-power operations
pub type Result<T> = std::result::Result<T, PowerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: PowerError = io.into();
        assert!(matches!(err, PowerError::Io { .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_toml_error_is_config_error() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("not = = toml");
        let err: PowerError = parsed.unwrap_err().into();
        assert!(err.to_string().starts_with("Configuration error"));
    }
}
