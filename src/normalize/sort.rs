//! Canonical ordering
//!
//! All sorts are stable, so nodes with equal keys keep source order.
//!
//! Keys:
//! - definitions: fragments before operations, then by name (anonymous last)
//! - variable definitions: by variable name
//! - selections: fields, then spreads, then inline fragments; within a kind
//!   by field name, spread name or type condition
//! - arguments, directives and input object fields: by name
//!
//! Sorting input object fields and ordering inline fragments by type
//! condition goes beyond the reference registry tooling's ordering, so
//! signatures of documents using either construct differ from it.

use crate::graphql::ast::{
    Argument, Definition, Directive, ObjectField, Selection, SelectionSet, Value,
    VariableDefinition,
};
use crate::graphql::fold::{
    fold_arguments, fold_definitions, fold_directives, fold_selection_set, fold_value,
    fold_variable_definitions, Fold,
};
use crate::graphql::Document;

/// Return a copy of `document` with every child list in canonical order
pub fn sort_document(document: &Document) -> Document {
    CanonicalOrder.fold_document(document)
}

fn definition_key(definition: &Definition) -> (u8, bool, &str) {
    let rank = match definition {
        Definition::Fragment(_) => 0,
        Definition::Operation(_) => 1,
    };
    let name = definition.name();
    (rank, name.is_none(), name.unwrap_or(""))
}

fn selection_key(selection: &Selection) -> (u8, &str) {
    match selection {
        Selection::Field(field) => (0, field.name.as_str()),
        Selection::FragmentSpread(spread) => (1, spread.name.as_str()),
        Selection::InlineFragment(inline) => (2, inline.type_condition.as_deref().unwrap_or("")),
    }
}

struct CanonicalOrder;

impl Fold for CanonicalOrder {
    fn fold_definitions(&mut self, definitions: &[Definition]) -> Vec<Definition> {
        let mut folded = fold_definitions(self, definitions);
        folded.sort_by(|a, b| definition_key(a).cmp(&definition_key(b)));
        folded
    }

    fn fold_variable_definitions(
        &mut self,
        definitions: &[VariableDefinition],
    ) -> Vec<VariableDefinition> {
        let mut folded = fold_variable_definitions(self, definitions);
        folded.sort_by(|a, b| a.variable.cmp(&b.variable));
        folded
    }

    fn fold_selection_set(&mut self, selection_set: &SelectionSet) -> SelectionSet {
        let mut folded = fold_selection_set(self, selection_set);
        folded
            .selections
            .sort_by(|a, b| selection_key(a).cmp(&selection_key(b)));
        folded
    }

    fn fold_arguments(&mut self, arguments: &[Argument]) -> Vec<Argument> {
        let mut folded = fold_arguments(self, arguments);
        folded.sort_by(|a, b| a.name.cmp(&b.name));
        folded
    }

    fn fold_directives(&mut self, directives: &[Directive]) -> Vec<Directive> {
        let mut folded = fold_directives(self, directives);
        folded.sort_by(|a, b| a.name.cmp(&b.name));
        folded
    }

    fn fold_value(&mut self, value: &Value) -> Value {
        match fold_value(self, value) {
            Value::Object(mut fields) => {
                fields.sort_by(|a: &ObjectField, b: &ObjectField| a.name.cmp(&b.name));
                Value::Object(fields)
            }
            other => other,
        }
    }
}
