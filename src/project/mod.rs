//! Client project loading
//!
//! A client project is the set of `.graphql`/`.gql` files under the
//! configured include paths. Loading parses every file and indexes named
//! operations and fragments; merging produces one self-contained document
//! per operation, with client-side annotations removed, ready for
//! extraction.

mod errors;
mod loader;
mod merge;
mod operations;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use errors::{ProjectError, ProjectResult};
pub use loader::{ClientProject, SourcedFragment, SourcedOperation};
pub use merge::{add_typename, remove_client_schema_fields, strip_directives};
pub use operations::OperationSet;

/// Client project configuration (the `client` section of `opmanifest.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientConfig {
    /// Client name reported in the summary (required)
    #[serde(default)]
    pub name: String,

    /// Files or directories to scan (default: `["src"]`)
    #[serde(default = "default_includes")]
    pub includes: Vec<PathBuf>,

    /// Paths to skip while scanning
    #[serde(default)]
    pub excludes: Vec<PathBuf>,

    /// Add `__typename` to nested selection sets (default: true)
    #[serde(default = "default_add_typename")]
    pub add_typename: bool,

    /// Directives removed before registration, keeping the field
    #[serde(default = "default_client_only_directives")]
    pub client_only_directives: Vec<String>,

    /// Directives marking fields resolved on the client; such fields are removed
    #[serde(default = "default_client_schema_directives")]
    pub client_schema_directives: Vec<String>,
}

fn default_includes() -> Vec<PathBuf> {
    vec![PathBuf::from("src")]
}
fn default_add_typename() -> bool {
    true
}
fn default_client_only_directives() -> Vec<String> {
    vec!["connection".to_string(), "type".to_string()]
}
fn default_client_schema_directives() -> Vec<String> {
    vec!["client".to_string(), "rest".to_string()]
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            includes: default_includes(),
            excludes: Vec::new(),
            add_typename: default_add_typename(),
            client_only_directives: default_client_only_directives(),
            client_schema_directives: default_client_schema_directives(),
        }
    }
}

impl ClientConfig {
    /// Config for `name` with default settings
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Resolve relative include and exclude paths against `base`
    pub fn resolve_paths(&mut self, base: &Path) {
        for path in self.includes.iter_mut().chain(self.excludes.iter_mut()) {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}
