//! GraphQL language errors
//!
//! Syntax errors carry the 1-based line and column of the offending token.
//! Document errors describe executable documents that parse but cannot be
//! registered as a single operation.

use thiserror::Error;

use super::lexer::Position;

/// Result type for GraphQL language operations
pub type GraphqlResult<T> = Result<T, GraphqlError>;

/// GraphQL language errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphqlError {
    #[error("Syntax error at {line}:{column}: {message}")]
    Syntax {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("Unsupported definition '{keyword}' at {line}:{column}: client documents may only contain operations and fragments")]
    UnsupportedDefinition {
        line: usize,
        column: usize,
        keyword: String,
    },

    #[error("Document contains no operation definition")]
    NoOperation,

    #[error("Document contains {0} operation definitions, expected exactly one")]
    MultipleOperations(usize),

    #[error("Fragment defined more than once: {0}")]
    DuplicateFragment(String),

    #[error("Unknown fragment: {0}")]
    UnknownFragment(String),

    #[error("Empty selection set in {0}")]
    EmptySelectionSet(String),
}

impl GraphqlError {
    /// Syntax error at a source position
    pub fn syntax(position: Position, message: impl Into<String>) -> Self {
        GraphqlError::Syntax {
            line: position.line,
            column: position.column,
            message: message.into(),
        }
    }

    /// Type-system definition found in a client document
    pub fn unsupported(position: Position, keyword: impl Into<String>) -> Self {
        GraphqlError::UnsupportedDefinition {
            line: position.line,
            column: position.column,
            keyword: keyword.into(),
        }
    }

    /// Source position, for errors raised while reading source text
    pub fn position(&self) -> Option<Position> {
        match self {
            GraphqlError::Syntax { line, column, .. }
            | GraphqlError::UnsupportedDefinition { line, column, .. } => Some(Position {
                line: *line,
                column: *column,
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display_has_position() {
        let err = GraphqlError::syntax(Position { line: 3, column: 7 }, "Expected Name");
        assert_eq!(err.to_string(), "Syntax error at 3:7: Expected Name");
        assert_eq!(err.position(), Some(Position { line: 3, column: 7 }));
    }

    #[test]
    fn test_document_errors_have_no_position() {
        assert_eq!(GraphqlError::NoOperation.position(), None);
        assert!(GraphqlError::UnknownFragment("UserParts".into())
            .to_string()
            .contains("UserParts"));
    }
}
