//! CLI-specific error types
//!
//! Every CLI error is fatal: `main` prints `CODE: message` and exits 1.

use std::error::Error;
use std::fmt;

use crate::manifest::{ExtractError, ExtractErrorCode};
use crate::project::ProjectError;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or flag error
    ConfigError,
    /// Client project could not be loaded or merged
    ProjectError,
    /// Manifest extraction failed
    Extract(ExtractErrorCode),
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "OPM_CLI_CONFIG_ERROR",
            Self::ProjectError => "OPM_CLI_PROJECT_ERROR",
            Self::Extract(code) => code.code(),
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    source: Option<Box<dyn Error + Send + Sync>>,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// Get the error code
    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn Error + 'static))
    }
}

impl From<ProjectError> for CliError {
    fn from(e: ProjectError) -> Self {
        Self {
            code: CliErrorCode::ProjectError,
            message: e.to_string(),
            source: Some(Box::new(e)),
        }
    }
}

impl From<ExtractError> for CliError {
    fn from(e: ExtractError) -> Self {
        // Syntax causes are already part of the message
        let message = match (e.io_kind(), e.source()) {
            (Some(_), Some(cause)) => format!("{} ({})", e.message(), cause),
            _ => e.message().to_string(),
        };
        Self {
            code: CliErrorCode::Extract(e.code()),
            message,
            source: Some(Box::new(e)),
        }
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_config_error_display() {
        let err = CliError::config_error("client name is required");
        assert_eq!(err.to_string(), "OPM_CLI_CONFIG_ERROR: client name is required");
        assert!(err.source().is_none());
    }

    #[test]
    fn test_project_error_conversion() {
        let err: CliError = ProjectError::IncludeNotFound(PathBuf::from("src")).into();
        assert_eq!(err.code(), CliErrorCode::ProjectError);
        assert_eq!(err.to_string(), "OPM_CLI_PROJECT_ERROR: Include path not found: src");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_extract_error_keeps_extract_code_and_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CliError =
            ExtractError::io_error_at_path("create", Path::new("/ro/manifest.json"), io).into();
        assert_eq!(err.code_str(), "OPM_EXTRACT_IO");
        assert_eq!(
            err.to_string(),
            "OPM_EXTRACT_IO: Failed to create /ro/manifest.json (denied)"
        );
    }
}
