//! Client project errors

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::graphql::GraphqlError;

/// Result type for project loading and merging
pub type ProjectResult<T> = Result<T, ProjectError>;

/// Client project errors
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Include path not found: {}", .0.display())]
    IncludeNotFound(PathBuf),

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: GraphqlError,
    },

    #[error("Operation '{name}' is defined in both {} and {}", first.display(), second.display())]
    DuplicateOperation {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Fragment '{name}' is defined in both {} and {}", first.display(), second.display())]
    DuplicateFragment {
        name: String,
        first: PathBuf,
        second: PathBuf,
    },

    #[error("Operation '{operation}' references unknown fragment '{fragment}'")]
    UnknownFragment { operation: String, fragment: String },

    #[error("Operation set already contains '{0}'")]
    DuplicateOperationInSet(String),
}

impl ProjectError {
    /// Source file the error points at, if any
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            ProjectError::IncludeNotFound(path) => Some(path),
            ProjectError::Read { path, .. } | ProjectError::Parse { path, .. } => Some(path),
            ProjectError::DuplicateOperation { second, .. }
            | ProjectError::DuplicateFragment { second, .. } => Some(second),
            ProjectError::UnknownFragment { .. } | ProjectError::DuplicateOperationInSet(_) => {
                None
            }
        }
    }
}
