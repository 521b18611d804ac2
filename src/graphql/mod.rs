//! GraphQL language support for client documents
//!
//! Provides:
//! - lexer/parser for executable documents (operations and fragments)
//! - an owned AST with a tree-rebuilding `Fold` traversal
//! - the reduced-whitespace printer used for canonical text
//! - fragment closure and single-operation validation

pub mod ast;
mod errors;
pub mod fold;
pub mod fragments;
pub mod lexer;
mod parser;
mod printer;
mod validate;

pub use ast::{Definition, Document, FragmentDefinition, OperationDefinition, OperationKind};
pub use errors::{GraphqlError, GraphqlResult};
pub use fold::Fold;
pub use lexer::Position;
pub use parser::parse_document;
pub use printer::print_reduced;
pub use validate::validate_operation_document;
