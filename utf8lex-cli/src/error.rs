//! Error handling module for the utf8lex CLI.
//!
//! This module provides custom error types using `thiserror` for structured
//! error handling throughout the application.

use thiserror::Error;

/// Main error type for the utf8lex CLI application.
///
/// This enum represents all possible errors that can occur
/// during the execution of utf8lex commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// Error when a required configuration is missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error when file operations fail.
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// Error when input validation fails.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Error when a command execution fails.
    #[error("Command execution failed: {0}")]
    CommandExecution(String),

    /// A rule did not match at the current position, and the input was
    /// not at EOF (`ErrorCode::NoMatch`).
    #[error("no rule matched at byte {byte}: {excerpt}")]
    NoMatch { byte: u64, excerpt: String },

    /// Error when IO operations fail.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Error when JSON serialization/deserialization fails.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error when TOML deserialization fails.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Error propagated from the lexer engine or generator.
    #[error("{0}")]
    Core(#[from] utf8lex_util::Utf8LexError),

    /// Error propagated from `utf8lex-gen`.
    #[error("{0}")]
    Gen(#[from] utf8lex_gen::GenError),

    /// Generic error for any other cases.
    ///
    /// This variant is kept for backward compatibility and future extensibility.
    /// New specific error variants should be preferred over using this.
    #[allow(dead_code)]
    #[error("{0}")]
    Other(String),
}

/// Result type alias using CliError.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = CliError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_file_operation_error_display() {
        let err = CliError::FileOperation("permission denied".to_string());
        assert_eq!(err.to_string(), "File operation failed: permission denied");
    }

    #[test]
    fn test_validation_error_display() {
        let err = CliError::Validation("invalid format".to_string());
        assert_eq!(err.to_string(), "Validation error: invalid format");
    }

    #[test]
    fn test_no_match_error_display() {
        let err = CliError::NoMatch { byte: 4, excerpt: "@@@".to_string() };
        assert!(err.to_string().contains("byte 4"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let cli_err: CliError = io_err.into();
        assert!(matches!(cli_err, CliError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let cli_err: CliError = json_err.into();
        assert!(matches!(cli_err, CliError::Json(_)));
    }
}
