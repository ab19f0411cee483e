//! Domain error types

use thiserror::Error;

/// Error when parsing a history record identifier
#[derive(Debug, Clone, Error)]
#[error("Invalid history id: \"{input}\". Expected a positive integer")]
pub struct RecordIdParseError {
    pub input: String,
}

/// Error when a stored content type tag is not recognised
#[derive(Debug, Clone, Error)]
#[error("Unsupported content type: \"{input}\". Only text/plain is stored")]
pub struct UnknownContentTypeError {
    pub input: String,
}

/// Error when a stored payload is not valid UTF-16 text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PayloadDecodeError {
    #[error("Payload has odd length {0}, expected UTF-16 code units")]
    OddLength(usize),

    #[error("Payload is not valid UTF-16")]
    InvalidUtf16,
}

/// Error when an option value (watcher, clipboard backend) is not recognised
#[derive(Debug, Clone, Error)]
#[error("Invalid {option}: \"{input}\". Valid values are: {valid}")]
pub struct InvalidOptionError {
    pub option: &'static str,
    pub input: String,
    pub valid: &'static str,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
