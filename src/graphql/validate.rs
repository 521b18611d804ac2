//! Structural checks for a single-operation document
//!
//! A registrable document holds exactly one operation plus the fragments
//! it needs. Every spread must resolve inside the document and no
//! selection set may be empty.

use std::collections::HashSet;

use super::ast::{Document, Selection, SelectionSet};
use super::errors::{GraphqlError, GraphqlResult};
use super::fragments::fragment_closure;

/// Validate that `document` is a well-formed single-operation document
pub fn validate_operation_document(document: &Document) -> GraphqlResult<()> {
    let operations: Vec<_> = document.operations().collect();
    let operation = match operations.as_slice() {
        [] => return Err(GraphqlError::NoOperation),
        [operation] => *operation,
        many => return Err(GraphqlError::MultipleOperations(many.len())),
    };

    let mut names = HashSet::new();
    for fragment in document.fragments() {
        if !names.insert(fragment.name.as_str()) {
            return Err(GraphqlError::DuplicateFragment(fragment.name.clone()));
        }
        check_selection_set(&fragment.selection_set, &format!("fragment {}", fragment.name))?;
    }

    let label = match &operation.name {
        Some(name) => format!("{} {}", operation.kind, name),
        None => format!("anonymous {}", operation.kind),
    };
    check_selection_set(&operation.selection_set, &label)?;

    let index = document.fragment_index();
    let closure = fragment_closure(&operation.selection_set, &index);
    if let Some(missing) = closure.missing.into_iter().next() {
        return Err(GraphqlError::UnknownFragment(missing));
    }

    Ok(())
}

fn check_selection_set(selection_set: &SelectionSet, label: &str) -> GraphqlResult<()> {
    if selection_set.is_empty() {
        return Err(GraphqlError::EmptySelectionSet(label.to_string()));
    }
    for selection in &selection_set.selections {
        match selection {
            Selection::Field(field) => {
                if let Some(nested) = &field.selection_set {
                    check_selection_set(nested, &format!("{} > {}", label, field.response_key()))?;
                }
            }
            Selection::FragmentSpread(_) => {}
            Selection::InlineFragment(inline) => {
                let on = inline.type_condition.as_deref().unwrap_or("inline fragment");
                check_selection_set(&inline.selection_set, &format!("{} > ... {}", label, on))?;
            }
        }
    }
    Ok(())
}
