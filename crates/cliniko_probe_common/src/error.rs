// --- File: crates/cliniko_probe_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The error type shared by the prober crates.
///
/// Probe outcomes (404, 422, transport faults) are *not* errors; they are
/// recorded and reported. This type covers the things that stop a run from
/// being set up: configuration, identifier resolution, client construction and
/// local I/O.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// Error occurred during an HTTP request
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// Error occurred while parsing data
    #[error("Failed to parse data: {0}")]
    ParseError(String),

    /// Error occurred due to missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The API rejected the credential on the baseline check
    #[error("Authentication error: {0}")]
    AuthError(String),

    /// Error occurred during validation of user supplied input
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A path template needs an identifier nobody supplied
    #[error("Missing identifier '{placeholder}' for probe '{label}'")]
    MissingIdentifier { label: String, placeholder: String },

    /// A path template names a placeholder that does not exist
    #[error("Unknown placeholder '{placeholder}' in template '{template}'")]
    UnknownPlaceholder {
        template: String,
        placeholder: String,
    },

    /// Error occurred while reading or writing local files
    #[error("I/O error: {0}")]
    IoError(String),

    /// Error occurred due to an internal error
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// A trait for adding context to errors.
pub trait Context<T, E> {
    /// Adds context to an error.
    fn context<C>(self, context: C) -> Result<T, ProbeError>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Adds context to an error with a lazy context provider.
    fn with_context<C, F>(self, f: F) -> Result<T, ProbeError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E: std::error::Error + Send + Sync + 'static> Context<T, E> for Result<T, E> {
    fn context<C>(self, context: C) -> Result<T, ProbeError>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| ProbeError::InternalError(format!("{}: {}", context, error)))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, ProbeError>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| ProbeError::InternalError(format!("{}: {}", f(), error)))
    }
}

// Common error conversions
impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ProbeError {
    fn from(err: serde_json::Error) -> Self {
        ProbeError::ParseError(err.to_string())
    }
}

impl From<std::io::Error> for ProbeError {
    fn from(err: std::io::Error) -> Self {
        ProbeError::IoError(err.to_string())
    }
}

impl From<config::ConfigError> for ProbeError {
    fn from(err: config::ConfigError) -> Self {
        ProbeError::ConfigError(err.to_string())
    }
}

// Utility functions for error handling
pub fn config_error<T: fmt::Display>(message: T) -> ProbeError {
    ProbeError::ConfigError(message.to_string())
}

pub fn validation_error<T: fmt::Display>(message: T) -> ProbeError {
    ProbeError::ValidationError(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_message() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));
        let err = result.context("writing artifact").unwrap_err();
        assert_eq!(err.to_string(), "Internal error: writing artifact: denied");
    }

    #[test]
    fn test_missing_identifier_message_names_label() {
        let err = ProbeError::MissingIdentifier {
            label: "available_times".to_string(),
            placeholder: "business_id".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Missing identifier 'business_id' for probe 'available_times'"
        );
    }
}
