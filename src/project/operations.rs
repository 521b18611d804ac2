//! Ordered operation collection handed to the extractor

use crate::graphql::Document;

use super::errors::{ProjectError, ProjectResult};

/// Operation name → merged document, in discovery order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationSet {
    entries: Vec<(String, Document)>,
}

impl OperationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an operation. Names must be unique.
    pub fn insert(&mut self, name: impl Into<String>, document: Document) -> ProjectResult<()> {
        let name = name.into();
        if self.get(&name).is_some() {
            return Err(ProjectError::DuplicateOperationInSet(name));
        }
        self.entries.push((name, document));
        Ok(())
    }

    /// Look up an operation document by name
    pub fn get(&self, name: &str) -> Option<&Document> {
        self.entries
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, document)| document)
    }

    /// Operations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Document)> {
        self.entries
            .iter()
            .map(|(name, document)| (name.as_str(), document))
    }

    /// Operation names in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
