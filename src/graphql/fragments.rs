//! Fragment spread collection and transitive closure

use std::collections::{HashMap, HashSet, VecDeque};

use super::ast::{FragmentDefinition, Selection, SelectionSet};

/// Names of fragments spread directly in a selection set (recursing into
/// fields and inline fragments, not into fragment definitions), in first
/// occurrence order.
pub fn spread_names(selection_set: &SelectionSet) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    collect_spreads(selection_set, &mut names, &mut seen);
    names
}

fn collect_spreads(selection_set: &SelectionSet, names: &mut Vec<String>, seen: &mut HashSet<String>) {
    for selection in &selection_set.selections {
        match selection {
            Selection::Field(field) => {
                if let Some(nested) = &field.selection_set {
                    collect_spreads(nested, names, seen);
                }
            }
            Selection::FragmentSpread(spread) => {
                if seen.insert(spread.name.clone()) {
                    names.push(spread.name.clone());
                }
            }
            Selection::InlineFragment(inline) => {
                collect_spreads(&inline.selection_set, names, seen);
            }
        }
    }
}

/// Fragments reachable from a selection set
#[derive(Debug, Default)]
pub struct FragmentClosure<'a> {
    /// Reachable fragments in breadth-first discovery order
    pub fragments: Vec<&'a FragmentDefinition>,
    /// Spread names with no matching definition
    pub missing: Vec<String>,
}

/// Compute the fragments transitively referenced by `root`.
///
/// Cycles terminate because each fragment name is visited once.
pub fn fragment_closure<'a>(
    root: &SelectionSet,
    index: &HashMap<&str, &'a FragmentDefinition>,
) -> FragmentClosure<'a> {
    let mut closure = FragmentClosure::default();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = spread_names(root).into();

    while let Some(name) = queue.pop_front() {
        if !visited.insert(name.clone()) {
            continue;
        }
        match index.get(name.as_str()) {
            Some(&fragment) => {
                closure.fragments.push(fragment);
                queue.extend(spread_names(&fragment.selection_set));
            }
            None => closure.missing.push(name),
        }
    }

    closure
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::parse_document;

    #[test]
    fn test_spread_names_in_order_without_duplicates() {
        let doc = parse_document("{ a { ...B ...A } ... on T { ...B ...C } }").unwrap();
        let op = doc.operations().next().unwrap();
        assert_eq!(spread_names(&op.selection_set), vec!["B", "A", "C"]);
    }

    #[test]
    fn test_closure_is_transitive() {
        let doc = parse_document(
            "query Q { ...A } fragment A on T { ...B } fragment B on T { x } fragment Unused on T { y }",
        )
        .unwrap();
        let index = doc.fragment_index();
        let op = doc.operations().next().unwrap();

        let closure = fragment_closure(&op.selection_set, &index);
        let names: Vec<&str> = closure.fragments.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert!(closure.missing.is_empty());
    }

    #[test]
    fn test_closure_reports_missing_and_survives_cycles() {
        let doc = parse_document(
            "query Q { ...A } fragment A on T { ...B ...Ghost } fragment B on T { ...A }",
        )
        .unwrap();
        let index = doc.fragment_index();
        let op = doc.operations().next().unwrap();

        let closure = fragment_closure(&op.selection_set, &index);
        assert_eq!(closure.fragments.len(), 2);
        assert_eq!(closure.missing, vec!["Ghost".to_string()]);
    }
}
