//! Legacy engine signature
//!
//! The older registry identified operations by a normalized text built from
//! a single named operation: unused definitions dropped, every literal
//! hidden, aliases removed, then sorted and printed with reduced
//! whitespace. It is kept only so downstream tooling that still keys on it
//! keeps working.
//!
//! The extractor does not know operation names at the point it computes
//! this value, so it passes [`PLACEHOLDER_OPERATION_NAME`]. With that name
//! `drop_unused_definitions` usually finds nothing to select and the whole
//! document is signed. That is a known gap in name propagation, not
//! something to paper over here.

use std::collections::HashSet;

use crate::graphql::ast::{Field, Value};
use crate::graphql::fold::{fold_field, fold_value, Fold};
use crate::graphql::fragments::fragment_closure;
use crate::graphql::{print_reduced, Definition, Document};

use super::sort::sort_document;

/// Operation name passed to [`default_signature`] by the extractor
pub const PLACEHOLDER_OPERATION_NAME: &str = "TODO";

/// Compute the legacy signature text for `operation_name` in `document`
pub fn default_signature(document: &Document, operation_name: &str) -> String {
    let selected = drop_unused_definitions(document, operation_name);
    let hidden = hide_literals(&selected);
    let unaliased = remove_aliases(&hidden);
    print_reduced(&sort_document(&unaliased))
}

/// Keep only the named operation and the fragments it transitively uses.
///
/// Definitions keep their source order. If no operation has that name the
/// document is returned unchanged.
pub fn drop_unused_definitions(document: &Document, operation_name: &str) -> Document {
    let Some(operation) = document
        .operations()
        .find(|op| op.name.as_deref() == Some(operation_name))
    else {
        return document.clone();
    };

    let index = document.fragment_index();
    let used: HashSet<&str> = fragment_closure(&operation.selection_set, &index)
        .fragments
        .iter()
        .map(|fragment| fragment.name.as_str())
        .collect();

    Document::new(
        document
            .definitions
            .iter()
            .filter(|definition| match definition {
                Definition::Operation(op) => op.name.as_deref() == Some(operation_name),
                Definition::Fragment(fragment) => used.contains(fragment.name.as_str()),
            })
            .cloned()
            .collect(),
    )
}

/// Hide every literal: numbers become `0`, strings `""`, lists `[]` and
/// objects `{}`.
pub fn hide_literals(document: &Document) -> Document {
    AllLiterals.fold_document(document)
}

/// Remove field aliases
pub fn remove_aliases(document: &Document) -> Document {
    Unaliased.fold_document(document)
}

struct AllLiterals;

impl Fold for AllLiterals {
    fn fold_value(&mut self, value: &Value) -> Value {
        match value {
            Value::Int(_) => Value::Int("0".to_string()),
            Value::Float(_) => Value::Float("0".to_string()),
            Value::String { .. } => Value::string(""),
            Value::List(_) => Value::List(Vec::new()),
            Value::Object(_) => Value::Object(Vec::new()),
            other => fold_value(self, other),
        }
    }
}

struct Unaliased;

impl Fold for Unaliased {
    fn fold_field(&mut self, field: &Field) -> Field {
        Field {
            alias: None,
            ..fold_field(self, field)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::parse_document;

    #[test]
    fn test_signature_hides_literals_and_aliases() {
        let doc = parse_document(
            r#"query GetUser { me: user(id: "123", tags: ["a"], filter: {x: 1}) { id name } }"#,
        )
        .unwrap();
        assert_eq!(
            default_signature(&doc, "GetUser"),
            r#"query GetUser{user(filter:{},id:"",tags:[]){id name}}"#
        );
    }

    #[test]
    fn test_named_operation_drops_other_definitions() {
        let doc = parse_document(
            "query A { ...F } query B { b } fragment F on T { ...G } fragment G on T { g } fragment H on T { h }",
        )
        .unwrap();
        let dropped = drop_unused_definitions(&doc, "A");
        let names: Vec<_> = dropped.definitions.iter().filter_map(|d| d.name()).collect();
        assert_eq!(names, vec!["A", "F", "G"]);
    }

    #[test]
    fn test_unknown_name_keeps_whole_document() {
        let doc = parse_document("query A { a } fragment F on T { f }").unwrap();
        assert_eq!(drop_unused_definitions(&doc, PLACEHOLDER_OPERATION_NAME), doc);
    }

    #[test]
    fn test_placeholder_signature_signs_full_document() {
        let doc = parse_document("query GetUser { ...Parts } fragment Parts on User { id }").unwrap();
        assert_eq!(
            default_signature(&doc, PLACEHOLDER_OPERATION_NAME),
            "fragment Parts on User{id}query GetUser{...Parts}"
        );
    }

    #[test]
    fn test_signature_ignores_alias_and_literal_differences() {
        let a = parse_document(r#"query Q { x: f(n: 1, s: "a") }"#).unwrap();
        let b = parse_document(r#"query Q { y: f(s: "b", n: 2) }"#).unwrap();
        assert_eq!(
            default_signature(&a, PLACEHOLDER_OPERATION_NAME),
            default_signature(&b, PLACEHOLDER_OPERATION_NAME)
        );
    }
}
