//! Source discovery and parsing
//!
//! Include paths are walked depth-first with directory entries in sorted
//! order, so discovery order is stable across runs and platforms.
//! `node_modules` and `.git` directories are never entered.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::graphql::{parse_document, Definition, FragmentDefinition, OperationDefinition};
use crate::observability::{log_event_with_fields, Event, Logger};

use super::errors::{ProjectError, ProjectResult};
use super::ClientConfig;

const SOURCE_EXTENSIONS: &[&str] = &["graphql", "gql"];
const SKIPPED_DIRECTORIES: &[&str] = &["node_modules", ".git"];

/// A named operation and the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedOperation {
    pub name: String,
    pub definition: OperationDefinition,
    pub path: PathBuf,
}

/// A fragment definition and the file it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcedFragment {
    pub definition: FragmentDefinition,
    pub path: PathBuf,
}

impl SourcedFragment {
    pub fn name(&self) -> &str {
        &self.definition.name
    }
}

/// Parsed client project
#[derive(Debug, Clone)]
pub struct ClientProject {
    config: ClientConfig,
    files: Vec<PathBuf>,
    operations: Vec<SourcedOperation>,
    fragments: Vec<SourcedFragment>,
}

impl ClientProject {
    /// Discover and parse every source file under the configured includes
    pub fn load(config: &ClientConfig) -> ProjectResult<Self> {
        log_event_with_fields(Event::ProjectLoadBegin, &[("client", config.name.as_str())]);

        let files = discover_files(config)?;
        let mut sources = Vec::with_capacity(files.len());
        for path in files {
            let contents = fs::read_to_string(&path).map_err(|source| ProjectError::Read {
                path: path.clone(),
                source,
            })?;
            sources.push((path, contents));
        }

        let project = Self::from_sources(config, sources)?;

        let files = project.files.len().to_string();
        let operations = project.operations.len().to_string();
        let fragments = project.fragments.len().to_string();
        log_event_with_fields(
            Event::ProjectLoadComplete,
            &[
                ("client", config.name.as_str()),
                ("files", files.as_str()),
                ("operations", operations.as_str()),
                ("fragments", fragments.as_str()),
            ],
        );

        Ok(project)
    }

    /// Build a project from in-memory sources, in the given order
    pub fn from_sources<I, P, S>(config: &ClientConfig, sources: I) -> ProjectResult<Self>
    where
        I: IntoIterator<Item = (P, S)>,
        P: Into<PathBuf>,
        S: AsRef<str>,
    {
        let mut project = Self {
            config: config.clone(),
            files: Vec::new(),
            operations: Vec::new(),
            fragments: Vec::new(),
        };
        let mut operation_paths: HashMap<String, PathBuf> = HashMap::new();
        let mut fragment_paths: HashMap<String, PathBuf> = HashMap::new();

        for (path, contents) in sources {
            let path = path.into();
            let document =
                parse_document(contents.as_ref()).map_err(|source| ProjectError::Parse {
                    path: path.clone(),
                    source,
                })?;

            let path_str = path.display().to_string();
            let definitions = document.definitions.len().to_string();
            log_event_with_fields(
                Event::SourceParsed,
                &[("path", path_str.as_str()), ("definitions", definitions.as_str())],
            );

            for definition in document.definitions {
                match definition {
                    Definition::Operation(operation) => {
                        let Some(name) = operation.name.clone() else {
                            Logger::warn(
                                Event::AnonymousOperationSkipped.as_str(),
                                &[("path", path_str.as_str()), ("kind", operation.kind.as_str())],
                            );
                            continue;
                        };
                        if let Some(first) = operation_paths.get(&name) {
                            return Err(ProjectError::DuplicateOperation {
                                name,
                                first: first.clone(),
                                second: path,
                            });
                        }
                        operation_paths.insert(name.clone(), path.clone());
                        project.operations.push(SourcedOperation {
                            name,
                            definition: operation,
                            path: path.clone(),
                        });
                    }
                    Definition::Fragment(fragment) => {
                        if let Some(first) = fragment_paths.get(&fragment.name) {
                            return Err(ProjectError::DuplicateFragment {
                                name: fragment.name,
                                first: first.clone(),
                                second: path,
                            });
                        }
                        fragment_paths.insert(fragment.name.clone(), path.clone());
                        project.fragments.push(SourcedFragment {
                            definition: fragment,
                            path: path.clone(),
                        });
                    }
                }
            }

            project.files.push(path);
        }

        Ok(project)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Source files in discovery order
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Named operations in discovery order
    pub fn operations(&self) -> &[SourcedOperation] {
        &self.operations
    }

    /// Fragments in discovery order
    pub fn fragments(&self) -> &[SourcedFragment] {
        &self.fragments
    }
}

/// Source files under the configured includes, deduplicated, in walk order
fn discover_files(config: &ClientConfig) -> ProjectResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut seen = HashSet::new();

    for include in &config.includes {
        if is_excluded(include, &config.excludes) {
            continue;
        }
        if include.is_dir() {
            walk_dir(include, &config.excludes, &mut files, &mut seen)?;
        } else if include.is_file() {
            // An explicitly named file is read whatever its extension
            if seen.insert(without_cur_dir(include)) {
                files.push(include.clone());
            }
        } else {
            return Err(ProjectError::IncludeNotFound(include.clone()));
        }
    }

    Ok(files)
}

fn walk_dir(
    dir: &Path,
    excludes: &[PathBuf],
    files: &mut Vec<PathBuf>,
    seen: &mut HashSet<PathBuf>,
) -> ProjectResult<()> {
    let read_error = |source| ProjectError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut entries = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_error)? {
        let entry = entry.map_err(read_error)?;
        let file_type = entry.file_type().map_err(read_error)?;
        entries.push((entry.path(), file_type));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, file_type) in entries {
        if is_excluded(&path, excludes) {
            continue;
        }
        if file_type.is_dir() {
            if !is_skipped_directory(&path) {
                walk_dir(&path, excludes, files, seen)?;
            }
        } else if is_source_file(&path) && seen.insert(without_cur_dir(&path)) {
            files.push(path);
        }
    }

    Ok(())
}

fn is_excluded(path: &Path, excludes: &[PathBuf]) -> bool {
    let path = without_cur_dir(path);
    excludes
        .iter()
        .any(|exclude| path.starts_with(without_cur_dir(exclude)))
}

/// `./src/a.graphql` and `src/a.graphql` compare equal
fn without_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|component| !matches!(component, Component::CurDir))
        .collect()
}

fn is_skipped_directory(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| SKIPPED_DIRECTORIES.contains(&name))
}

fn is_source_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, contents).unwrap();
        path
    }

    fn config_for(root: &Path) -> ClientConfig {
        let mut config = ClientConfig::named("web");
        config.includes = vec![root.to_path_buf()];
        config
    }

    #[test]
    fn test_walk_is_sorted_and_filtered() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "b.graphql", "query B { b }");
        write(dir.path(), "a/z.gql", "query Z { z }");
        write(dir.path(), "a/readme.md", "not graphql");
        write(dir.path(), "node_modules/pkg/x.graphql", "query X { x }");
        write(dir.path(), ".git/y.graphql", "query Y { y }");

        let files = discover_files(&config_for(dir.path())).unwrap();

        assert_eq!(
            files,
            vec![dir.path().join("a/z.gql"), dir.path().join("b.graphql")]
        );
    }

    #[test]
    fn test_excludes_skip_subtrees() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "keep/a.graphql", "query A { a }");
        write(dir.path(), "generated/b.graphql", "query B { b }");
        let mut config = config_for(dir.path());
        config.excludes = vec![dir.path().join("generated")];

        let files = discover_files(&config).unwrap();

        assert_eq!(files, vec![dir.path().join("keep/a.graphql")]);
    }

    #[test]
    fn test_exclude_matches_across_leading_cur_dir() {
        let generated = [PathBuf::from("src/__generated__")];
        assert!(is_excluded(Path::new("./src/__generated__/a.graphql"), &generated));
        assert!(is_excluded(
            Path::new("src/__generated__/a.graphql"),
            &[PathBuf::from("./src/__generated__")]
        ));
        assert!(!is_excluded(Path::new("./src/feed.graphql"), &generated));
        assert!(!is_excluded(Path::new("./src/__generated__x/a.graphql"), &generated));
    }

    #[test]
    fn test_overlapping_includes_read_once() {
        let dir = TempDir::new().unwrap();
        let file = write(dir.path(), "q.graphql", "query Q { q }");
        let mut config = config_for(dir.path());
        config.includes.push(file);

        let project = ClientProject::load(&config).unwrap();

        assert_eq!(project.files().len(), 1);
        assert_eq!(project.operations().len(), 1);
    }

    #[test]
    fn test_missing_include_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut config = ClientConfig::named("web");
        config.includes = vec![dir.path().join("nope")];

        assert!(matches!(
            ClientProject::load(&config),
            Err(ProjectError::IncludeNotFound(_))
        ));
    }

    #[test]
    fn test_operations_and_fragments_in_discovery_order() {
        let project = ClientProject::from_sources(
            &ClientConfig::named("web"),
            vec![
                ("one.graphql", "query Second { a } fragment F on T { f }"),
                ("two.graphql", "mutation First { b }"),
            ],
        )
        .unwrap();

        let names: Vec<_> = project.operations().iter().map(|op| op.name.as_str()).collect();
        assert_eq!(names, vec!["Second", "First"]);
        assert_eq!(project.fragments()[0].name(), "F");
        assert_eq!(project.operations()[1].path, PathBuf::from("two.graphql"));
    }

    #[test]
    fn test_anonymous_operations_are_skipped() {
        let project = ClientProject::from_sources(
            &ClientConfig::named("web"),
            vec![("a.graphql", "{ viewer { id } } query Named { a }")],
        )
        .unwrap();

        assert_eq!(project.operations().len(), 1);
        assert_eq!(project.operations()[0].name, "Named");
    }

    #[test]
    fn test_duplicate_operation_across_files() {
        let err = ClientProject::from_sources(
            &ClientConfig::named("web"),
            vec![("a.graphql", "query Q { a }"), ("b.graphql", "query Q { b }")],
        )
        .unwrap_err();

        assert!(matches!(
            err,
            ProjectError::DuplicateOperation { ref name, ref first, ref second }
                if name == "Q" && first == Path::new("a.graphql") && second == Path::new("b.graphql")
        ));
    }

    #[test]
    fn test_duplicate_fragment() {
        let err = ClientProject::from_sources(
            &ClientConfig::named("web"),
            vec![("a.graphql", "fragment F on T { a } fragment F on T { b }")],
        )
        .unwrap_err();

        assert!(matches!(err, ProjectError::DuplicateFragment { ref name, .. } if name == "F"));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = ClientProject::from_sources(
            &ClientConfig::named("web"),
            vec![("bad.graphql", "query {")],
        )
        .unwrap_err();

        assert!(matches!(err, ProjectError::Parse { ref path, .. } if path == Path::new("bad.graphql")));
    }
}
