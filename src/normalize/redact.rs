//! Literal redaction
//!
//! Registered operations must keep the shape of what the client sends but
//! never the values typed into it: numbers become `0` and strings become
//! `""`. Lists, objects, enums, booleans, nulls and variables keep their
//! structure so the operation still validates against the schema.

use crate::graphql::ast::Value;
use crate::graphql::fold::{fold_value, Fold};
use crate::graphql::Document;

/// Replace Int, Float and String literals with fixed placeholders
pub fn hide_certain_literals(document: &Document) -> Document {
    CertainLiterals.fold_document(document)
}

struct CertainLiterals;

impl Fold for CertainLiterals {
    fn fold_value(&mut self, value: &Value) -> Value {
        match value {
            Value::Int(_) => Value::Int("0".to_string()),
            Value::Float(_) => Value::Float("0".to_string()),
            Value::String { .. } => Value::string(""),
            other => fold_value(self, other),
        }
    }
}
