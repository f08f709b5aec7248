//! Error types for buildpack operations.
//!
//! This module defines [`BuildpackError`], the error type used throughout
//! the installer, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every failure is terminal: the pipeline aborts on the first error
//! - Each variant maps to a process exit code via [`BuildpackError::exit_code`]
//! - All errors should provide actionable messages for operators

use std::path::Path;
use thiserror::Error;

/// Core error type for buildpack operations.
#[derive(Debug, Error)]
pub enum BuildpackError {
    /// The platform passed more positional arguments than the compile
    /// contract defines.
    #[error("Expected 3 arguments (BUILD_DIR CACHE_DIR ENV_DIR), received {count}")]
    ArgumentProtocolViolation { count: usize },

    /// A required configuration variable is absent from the env directory.
    #[error("{name} is not set. Please add it to your application's config vars")]
    MissingConfiguration { name: String },

    /// Downloading the release archive failed.
    #[error("Failed to download {url}: {message}")]
    TransferFailure { url: String, message: String },

    /// The downloaded archive could not be extracted.
    #[error("Failed to extract release archive: {message}")]
    ArchiveFailure { message: String },

    /// A directory or file operation failed.
    #[error("{context}: {source}")]
    FilesystemFailure {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl BuildpackError {
    /// Create a filesystem error with context.
    pub fn fs(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::FilesystemFailure {
            context: context.into(),
            source,
        }
    }

    /// Create a filesystem error describing an operation on `path`.
    pub fn fs_at(action: &str, path: &Path, source: std::io::Error) -> Self {
        Self::fs(format!("Failed to {} {}", action, path.display()), source)
    }

    /// Create a missing configuration error.
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingConfiguration { name: name.into() }
    }

    /// Create a transfer error for `url`.
    pub fn transfer(url: impl Into<String>, message: impl ToString) -> Self {
        Self::TransferFailure {
            url: url.into(),
            message: message.to_string(),
        }
    }

    /// Create an archive error.
    pub fn archive(message: impl ToString) -> Self {
        Self::ArchiveFailure {
            message: message.to_string(),
        }
    }

    /// Process exit code for this error.
    ///
    /// Argument violations exit with `1 + count` so the platform can tell an
    /// incompatible invocation apart from an ordinary build failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ArgumentProtocolViolation { count } => {
                u8::try_from(count.saturating_add(1)).unwrap_or(u8::MAX)
            }
            _ => 1,
        }
    }

    /// Get an actionable hint for the error.
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingConfiguration { name } => {
                Some(format!("Run: heroku config:set {}=<value>", name))
            }
            Self::ArgumentProtocolViolation { .. } => {
                Some("The build platform's compile interface may have changed".to_string())
            }
            _ => None,
        }
    }
}

/// Result type alias for buildpack operations.
pub type Result<T> = std::result::Result<T, BuildpackError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn argument_violation_displays_count() {
        let err = BuildpackError::ArgumentProtocolViolation { count: 4 };
        assert!(err.to_string().contains("received 4"));
    }

    #[test]
    fn argument_violation_exit_code_encodes_count() {
        assert_eq!(
            BuildpackError::ArgumentProtocolViolation { count: 4 }.exit_code(),
            5
        );
        assert_eq!(
            BuildpackError::ArgumentProtocolViolation { count: 7 }.exit_code(),
            8
        );
    }

    #[test]
    fn argument_violation_exit_code_saturates() {
        let err = BuildpackError::ArgumentProtocolViolation { count: 1000 };
        assert_eq!(err.exit_code(), 255);
    }

    #[test]
    fn missing_configuration_names_variable() {
        let err = BuildpackError::missing("VAULT_VERSION");
        let msg = err.to_string();
        assert!(msg.contains("VAULT_VERSION"));
        assert!(msg.contains("add it"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_configuration_hint_mentions_config_set() {
        let err = BuildpackError::missing("VAULT_VERSION");
        let hint = err.hint().unwrap();
        assert!(hint.contains("config:set VAULT_VERSION="));
    }

    #[test]
    fn transfer_failure_displays_url_and_message() {
        let err = BuildpackError::transfer("https://example.com/a.zip", "HTTP 404 Not Found");
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/a.zip"));
        assert!(msg.contains("HTTP 404"));
        assert!(err.hint().is_none());
    }

    #[test]
    fn archive_failure_displays_message() {
        let err = BuildpackError::archive("entry 'vault' not found");
        assert!(err.to_string().contains("entry 'vault' not found"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn filesystem_failure_keeps_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = BuildpackError::fs_at("create", Path::new("/cache"), io_err);
        assert!(err.to_string().contains("Failed to create /cache"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(BuildpackError::missing("VAULT_VERSION"))
        }
        assert!(returns_error().is_err());
    }
}
