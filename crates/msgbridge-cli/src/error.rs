//! CLI-specific error types and exit codes.

use msgbridge_core::GenerateError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid or inconsistent configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file not found, bind failure, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// The request body given to `normalize` could not be parsed.
    #[error("Invalid request body: {0}")]
    InvalidInput(String),
}

impl CliError {
    /// Map error to an exit code following sysexits.h.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 78,       // EX_CONFIG
            Self::Io(_) => 74,           // EX_IOERR
            Self::InvalidInput(_) => 65, // EX_DATAERR
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<GenerateError> for CliError {
    fn from(err: GenerateError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::Config("x".into()).exit_code(), 78);
        assert_eq!(CliError::Io("x".into()).exit_code(), 74);
        assert_eq!(CliError::InvalidInput("x".into()).exit_code(), 65);
    }
}
