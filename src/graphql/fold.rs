//! Tree-rebuilding traversal over the document AST
//!
//! Each `fold_*` method takes a node by reference and returns a new node.
//! The default implementations rebuild the node unchanged by calling the
//! free function of the same name, which in turn dispatches back into the
//! trait for every child. Implementors override only the hooks they need
//! and call the free function to keep the default recursion.
//!
//! `fold_selection` returns `Option` so a fold can drop selections.

use super::ast::{
    Argument, Definition, Directive, Document, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, ObjectField, OperationDefinition, Selection, SelectionSet, Value,
    VariableDefinition,
};

pub trait Fold {
    fn fold_document(&mut self, document: &Document) -> Document {
        fold_document(self, document)
    }

    fn fold_definitions(&mut self, definitions: &[Definition]) -> Vec<Definition> {
        fold_definitions(self, definitions)
    }

    fn fold_operation(&mut self, operation: &OperationDefinition) -> OperationDefinition {
        fold_operation(self, operation)
    }

    fn fold_fragment(&mut self, fragment: &FragmentDefinition) -> FragmentDefinition {
        fold_fragment(self, fragment)
    }

    fn fold_variable_definitions(
        &mut self,
        definitions: &[VariableDefinition],
    ) -> Vec<VariableDefinition> {
        fold_variable_definitions(self, definitions)
    }

    fn fold_selection_set(&mut self, selection_set: &SelectionSet) -> SelectionSet {
        fold_selection_set(self, selection_set)
    }

    fn fold_selection(&mut self, selection: &Selection) -> Option<Selection> {
        fold_selection(self, selection)
    }

    fn fold_field(&mut self, field: &Field) -> Field {
        fold_field(self, field)
    }

    fn fold_fragment_spread(&mut self, spread: &FragmentSpread) -> FragmentSpread {
        fold_fragment_spread(self, spread)
    }

    fn fold_inline_fragment(&mut self, inline: &InlineFragment) -> InlineFragment {
        fold_inline_fragment(self, inline)
    }

    fn fold_arguments(&mut self, arguments: &[Argument]) -> Vec<Argument> {
        fold_arguments(self, arguments)
    }

    fn fold_directives(&mut self, directives: &[Directive]) -> Vec<Directive> {
        fold_directives(self, directives)
    }

    fn fold_value(&mut self, value: &Value) -> Value {
        fold_value(self, value)
    }
}

pub fn fold_document<F: Fold + ?Sized>(f: &mut F, document: &Document) -> Document {
    Document::new(f.fold_definitions(&document.definitions))
}

pub fn fold_definitions<F: Fold + ?Sized>(f: &mut F, definitions: &[Definition]) -> Vec<Definition> {
    definitions
        .iter()
        .map(|definition| match definition {
            Definition::Operation(op) => Definition::Operation(f.fold_operation(op)),
            Definition::Fragment(fragment) => Definition::Fragment(f.fold_fragment(fragment)),
        })
        .collect()
}

pub fn fold_operation<F: Fold + ?Sized>(
    f: &mut F,
    operation: &OperationDefinition,
) -> OperationDefinition {
    OperationDefinition {
        kind: operation.kind,
        name: operation.name.clone(),
        variable_definitions: f.fold_variable_definitions(&operation.variable_definitions),
        directives: f.fold_directives(&operation.directives),
        selection_set: f.fold_selection_set(&operation.selection_set),
    }
}

pub fn fold_fragment<F: Fold + ?Sized>(
    f: &mut F,
    fragment: &FragmentDefinition,
) -> FragmentDefinition {
    FragmentDefinition {
        name: fragment.name.clone(),
        type_condition: fragment.type_condition.clone(),
        directives: f.fold_directives(&fragment.directives),
        selection_set: f.fold_selection_set(&fragment.selection_set),
    }
}

pub fn fold_variable_definitions<F: Fold + ?Sized>(
    f: &mut F,
    definitions: &[VariableDefinition],
) -> Vec<VariableDefinition> {
    definitions
        .iter()
        .map(|definition| VariableDefinition {
            variable: definition.variable.clone(),
            var_type: definition.var_type.clone(),
            default_value: definition.default_value.as_ref().map(|v| f.fold_value(v)),
            directives: f.fold_directives(&definition.directives),
        })
        .collect()
}

pub fn fold_selection_set<F: Fold + ?Sized>(f: &mut F, selection_set: &SelectionSet) -> SelectionSet {
    SelectionSet::new(
        selection_set
            .selections
            .iter()
            .filter_map(|selection| f.fold_selection(selection))
            .collect(),
    )
}

pub fn fold_selection<F: Fold + ?Sized>(f: &mut F, selection: &Selection) -> Option<Selection> {
    Some(match selection {
        Selection::Field(field) => Selection::Field(f.fold_field(field)),
        Selection::FragmentSpread(spread) => {
            Selection::FragmentSpread(f.fold_fragment_spread(spread))
        }
        Selection::InlineFragment(inline) => {
            Selection::InlineFragment(f.fold_inline_fragment(inline))
        }
    })
}

pub fn fold_field<F: Fold + ?Sized>(f: &mut F, field: &Field) -> Field {
    Field {
        alias: field.alias.clone(),
        name: field.name.clone(),
        arguments: f.fold_arguments(&field.arguments),
        directives: f.fold_directives(&field.directives),
        selection_set: field.selection_set.as_ref().map(|s| f.fold_selection_set(s)),
    }
}

pub fn fold_fragment_spread<F: Fold + ?Sized>(f: &mut F, spread: &FragmentSpread) -> FragmentSpread {
    FragmentSpread {
        name: spread.name.clone(),
        directives: f.fold_directives(&spread.directives),
    }
}

pub fn fold_inline_fragment<F: Fold + ?Sized>(f: &mut F, inline: &InlineFragment) -> InlineFragment {
    InlineFragment {
        type_condition: inline.type_condition.clone(),
        directives: f.fold_directives(&inline.directives),
        selection_set: f.fold_selection_set(&inline.selection_set),
    }
}

pub fn fold_arguments<F: Fold + ?Sized>(f: &mut F, arguments: &[Argument]) -> Vec<Argument> {
    arguments
        .iter()
        .map(|argument| Argument {
            name: argument.name.clone(),
            value: f.fold_value(&argument.value),
        })
        .collect()
}

pub fn fold_directives<F: Fold + ?Sized>(f: &mut F, directives: &[Directive]) -> Vec<Directive> {
    directives
        .iter()
        .map(|directive| Directive {
            name: directive.name.clone(),
            arguments: f.fold_arguments(&directive.arguments),
        })
        .collect()
}

pub fn fold_value<F: Fold + ?Sized>(f: &mut F, value: &Value) -> Value {
    match value {
        Value::List(values) => Value::List(values.iter().map(|v| f.fold_value(v)).collect()),
        Value::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|field| ObjectField {
                    name: field.name.clone(),
                    value: f.fold_value(&field.value),
                })
                .collect(),
        ),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::parse_document;

    struct Identity;
    impl Fold for Identity {}

    struct DropLeaves;
    impl Fold for DropLeaves {
        fn fold_selection(&mut self, selection: &Selection) -> Option<Selection> {
            match selection {
                Selection::Field(field) if field.selection_set.is_none() && field.name == "secret" => {
                    None
                }
                other => fold_selection(self, other),
            }
        }
    }

    #[test]
    fn test_identity_fold_rebuilds_equal_tree() {
        let doc = parse_document(
            "query Q($a: Int = 1) @live { f(x: [1, {y: \"z\"}]) { ...F ... on T { g } } } fragment F on T { h }",
        )
        .unwrap();
        assert_eq!(Identity.fold_document(&doc), doc);
    }

    #[test]
    fn test_fold_selection_can_drop() {
        let doc = parse_document("{ user { id secret } }").unwrap();
        let folded = DropLeaves.fold_document(&doc);
        assert_eq!(folded, parse_document("{ user { id } }").unwrap());
    }
}
