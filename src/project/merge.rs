//! Per-operation documents for registration
//!
//! Each operation is paired with the fragments it transitively spreads,
//! then the client-side transforms run in a fixed order:
//! 1. add `__typename` where the client cache would (if enabled)
//! 2. remove fields carrying a client-schema directive
//! 3. drop fragments left empty (with their spreads) and fragments no
//!    longer referenced
//! 4. strip client-only directives
//!
//! An operation whose root selection set ends up empty is purely local
//! state; it is skipped with a WARN line instead of being registered.

use std::collections::{HashMap, HashSet};

use crate::graphql::ast::{Directive, Field, FragmentDefinition, Selection, SelectionSet};
use crate::graphql::fold::{fold_field, fold_fragment, fold_selection, Fold};
use crate::graphql::fragments::fragment_closure;
use crate::graphql::{Definition, Document};
use crate::observability::{Event, Logger};

use super::errors::{ProjectError, ProjectResult};
use super::loader::ClientProject;
use super::operations::OperationSet;

const TYPENAME: &str = "__typename";

impl ClientProject {
    /// One self-contained document per named operation, in discovery order
    pub fn merged_operations_and_fragments(&self) -> ProjectResult<OperationSet> {
        let index: HashMap<&str, &FragmentDefinition> = self
            .fragments()
            .iter()
            .map(|fragment| (fragment.name(), &fragment.definition))
            .collect();
        let config = self.config();

        let mut set = OperationSet::new();
        for operation in self.operations() {
            let closure = fragment_closure(&operation.definition.selection_set, &index);
            if let Some(fragment) = closure.missing.into_iter().next() {
                return Err(ProjectError::UnknownFragment {
                    operation: operation.name.clone(),
                    fragment,
                });
            }

            let used: HashSet<&str> = closure.fragments.iter().map(|f| f.name.as_str()).collect();
            let mut definitions = vec![Definition::Operation(operation.definition.clone())];
            definitions.extend(
                self.fragments()
                    .iter()
                    .filter(|fragment| used.contains(fragment.name()))
                    .map(|fragment| Definition::Fragment(fragment.definition.clone())),
            );

            let mut document = Document::new(definitions);
            if config.add_typename {
                document = add_typename(&document);
            }
            document = remove_client_schema_fields(&document, &config.client_schema_directives);
            document = strip_directives(&document, &config.client_only_directives);

            if is_client_only(&document) {
                let path = operation.path.display().to_string();
                Logger::warn(
                    Event::ClientOnlyOperationSkipped.as_str(),
                    &[("operation", operation.name.as_str()), ("path", path.as_str())],
                );
                continue;
            }

            set.insert(operation.name.clone(), document)?;
        }

        Ok(set)
    }
}

/// Add `__typename` to every field selection set and fragment definition
/// that lacks it. Operation root selection sets are left alone.
pub fn add_typename(document: &Document) -> Document {
    TypenameAdder.fold_document(document)
}

/// Remove fields annotated with any of `directives`, along with selection
/// sets and fragments left empty or unreferenced as a result
pub fn remove_client_schema_fields(document: &Document, directives: &[String]) -> Document {
    if directives.is_empty() {
        return document.clone();
    }
    let pruned = ClientSchemaFields { directives }.fold_document(document);
    drop_orphaned_fragments(&drop_empty_fragments(pruned))
}

/// Remove every occurrence of the named directives, keeping the annotated nodes
pub fn strip_directives(document: &Document, directives: &[String]) -> Document {
    if directives.is_empty() {
        return document.clone();
    }
    DirectiveStripper { directives }.fold_document(document)
}

fn has_directive(directives: &[Directive], names: &[String]) -> bool {
    directives
        .iter()
        .any(|directive| names.iter().any(|name| *name == directive.name))
}

fn ensure_typename(selection_set: &mut SelectionSet) {
    let present = selection_set.selections.iter().any(|selection| {
        matches!(selection, Selection::Field(field) if field.name == TYPENAME && field.alias.is_none())
    });
    if !present {
        selection_set
            .selections
            .insert(0, Selection::Field(Field::leaf(TYPENAME)));
    }
}

fn is_client_only(document: &Document) -> bool {
    document
        .operations()
        .next()
        .is_some_and(|operation| operation.selection_set.is_empty())
}

/// Drop fields and inline fragments whose selection sets were emptied
fn keep_unless_emptied(selection: Selection) -> Option<Selection> {
    match selection {
        Selection::Field(field) if field.selection_set.as_ref().is_some_and(SelectionSet::is_empty) => {
            None
        }
        Selection::InlineFragment(inline) if inline.selection_set.is_empty() => None,
        other => Some(other),
    }
}

/// Remove empty fragments and every spread of them, until none are left.
/// Each round removes at least one fragment, so this terminates.
fn drop_empty_fragments(mut document: Document) -> Document {
    loop {
        let empty: HashSet<String> = document
            .fragments()
            .filter(|fragment| fragment.selection_set.is_empty())
            .map(|fragment| fragment.name.clone())
            .collect();
        if empty.is_empty() {
            return document;
        }

        let pruned = EmptyFragmentSpreads { empty: &empty }.fold_document(&document);
        document = Document::new(
            pruned
                .definitions
                .into_iter()
                .filter(|definition| {
                    !matches!(definition, Definition::Fragment(fragment) if empty.contains(&fragment.name))
                })
                .collect(),
        );
    }
}

/// Keep only fragments reachable from an operation
fn drop_orphaned_fragments(document: &Document) -> Document {
    let index = document.fragment_index();
    let mut reachable: HashSet<&str> = HashSet::new();
    for operation in document.operations() {
        for fragment in fragment_closure(&operation.selection_set, &index).fragments {
            reachable.insert(fragment.name.as_str());
        }
    }

    Document::new(
        document
            .definitions
            .iter()
            .filter(|definition| match definition {
                Definition::Operation(_) => true,
                Definition::Fragment(fragment) => reachable.contains(fragment.name.as_str()),
            })
            .cloned()
            .collect(),
    )
}

struct TypenameAdder;

impl Fold for TypenameAdder {
    fn fold_field(&mut self, field: &Field) -> Field {
        let mut field = fold_field(self, field);
        if let Some(selection_set) = field.selection_set.as_mut() {
            ensure_typename(selection_set);
        }
        field
    }

    fn fold_fragment(&mut self, fragment: &FragmentDefinition) -> FragmentDefinition {
        let mut fragment = fold_fragment(self, fragment);
        ensure_typename(&mut fragment.selection_set);
        fragment
    }
}

struct ClientSchemaFields<'a> {
    directives: &'a [String],
}

impl Fold for ClientSchemaFields<'_> {
    fn fold_selection(&mut self, selection: &Selection) -> Option<Selection> {
        if let Selection::Field(field) = selection {
            if has_directive(&field.directives, self.directives) {
                return None;
            }
        }

        keep_unless_emptied(fold_selection(self, selection)?)
    }
}

struct EmptyFragmentSpreads<'a> {
    empty: &'a HashSet<String>,
}

impl Fold for EmptyFragmentSpreads<'_> {
    fn fold_selection(&mut self, selection: &Selection) -> Option<Selection> {
        if let Selection::FragmentSpread(spread) = selection {
            if self.empty.contains(&spread.name) {
                return None;
            }
        }

        keep_unless_emptied(fold_selection(self, selection)?)
    }
}

struct DirectiveStripper<'a> {
    directives: &'a [String],
}

impl Fold for DirectiveStripper<'_> {
    fn fold_directives(&mut self, directives: &[Directive]) -> Vec<Directive> {
        let stripped = self.directives;
        directives
            .iter()
            .filter(|directive| !stripped.contains(&directive.name))
            .map(|directive| Directive {
                name: directive.name.clone(),
                arguments: self.fold_arguments(&directive.arguments),
            })
            .collect()
    }
}
