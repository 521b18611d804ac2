//! Extraction error types
//!
//! Error codes:
//! - OPM_EXTRACT_INPUT: an operation document is malformed
//! - OPM_EXTRACT_IO: the manifest cannot be written
//! - OPM_EXTRACT_SERIALIZE: the manifest cannot be encoded as JSON
//!
//! All extraction errors abort the run. Nothing is written on failure.

use std::fmt;
use std::io;
use std::path::Path;

use crate::graphql::GraphqlError;

/// Extraction error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractErrorCode {
    /// Malformed operation document
    OpmExtractInput,
    /// Output could not be written
    OpmExtractIo,
    /// JSON encoding failed
    OpmExtractSerialize,
}

impl ExtractErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            ExtractErrorCode::OpmExtractInput => "OPM_EXTRACT_INPUT",
            ExtractErrorCode::OpmExtractIo => "OPM_EXTRACT_IO",
            ExtractErrorCode::OpmExtractSerialize => "OPM_EXTRACT_SERIALIZE",
        }
    }
}

impl fmt::Display for ExtractErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[derive(Debug)]
enum ExtractErrorSource {
    Io(io::Error),
    Graphql(GraphqlError),
    Json(serde_json::Error),
}

/// Extraction error with code, message and optional cause
#[derive(Debug)]
pub struct ExtractError {
    code: ExtractErrorCode,
    message: String,
    /// Operation the error applies to, if any
    operation: Option<String>,
    source: Option<ExtractErrorSource>,
}

impl ExtractError {
    /// Malformed operation document
    pub fn invalid_operation(operation: impl Into<String>, source: GraphqlError) -> Self {
        let operation = operation.into();
        Self {
            code: ExtractErrorCode::OpmExtractInput,
            message: format!("Invalid operation '{}': {}", operation, source),
            operation: Some(operation),
            source: Some(ExtractErrorSource::Graphql(source)),
        }
    }

    /// I/O failure at a path
    pub fn io_error_at_path(action: &str, path: &Path, source: io::Error) -> Self {
        Self {
            code: ExtractErrorCode::OpmExtractIo,
            message: format!("Failed to {} {}", action, path.display()),
            operation: None,
            source: Some(ExtractErrorSource::Io(source)),
        }
    }

    /// Output path that cannot name a file
    pub fn invalid_output_path(path: &Path) -> Self {
        Self {
            code: ExtractErrorCode::OpmExtractIo,
            message: format!("Output path does not name a file: {}", path.display()),
            operation: None,
            source: None,
        }
    }

    /// JSON encoding failure
    pub fn serialize_failed(source: serde_json::Error) -> Self {
        Self {
            code: ExtractErrorCode::OpmExtractSerialize,
            message: format!("Failed to serialize manifest: {}", source),
            operation: None,
            source: Some(ExtractErrorSource::Json(source)),
        }
    }

    /// Returns the error code
    pub fn code(&self) -> ExtractErrorCode {
        self.code
    }

    /// Returns the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the operation the error applies to
    pub fn operation(&self) -> Option<&str> {
        self.operation.as_deref()
    }

    /// Returns the underlying I/O error kind, if any
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match &self.source {
            Some(ExtractErrorSource::Io(e)) => Some(e.kind()),
            _ => None,
        }
    }
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[ERROR] {}: {}", self.code, self.message)?;
        if let Some(ExtractErrorSource::Io(source)) = &self.source {
            write!(f, " ({})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.source {
            Some(ExtractErrorSource::Io(e)) => Some(e),
            Some(ExtractErrorSource::Graphql(e)) => Some(e),
            Some(ExtractErrorSource::Json(e)) => Some(e),
            None => None,
        }
    }
}

/// Result type for extraction
pub type ExtractResult<T> = Result<T, ExtractError>;
