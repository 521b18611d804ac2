//! Configuration file and flag overrides
//!
//! ```json
//! {
//!   "client": {
//!     "name": "web",
//!     "includes": ["src"],
//!     "excludes": ["src/__generated__"],
//!     "addTypename": true,
//!     "clientOnlyDirectives": ["connection", "type"],
//!     "clientSchemaDirectives": ["client", "rest"]
//!   }
//! }
//! ```
//!
//! Paths in the file are relative to the file's directory. Paths given on
//! the command line are relative to the working directory.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};
use crate::project::ClientConfig;

use super::args::ExtractArgs;
use super::errors::{CliError, CliResult};

/// Configuration file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "opmanifest.json";

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let mut config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        if let Some(base) = path.parent() {
            config.client.resolve_paths(base);
        }

        let path_str = path.display().to_string();
        log_event_with_fields(Event::ConfigLoaded, &[("path", path_str.as_str())]);

        Ok(config)
    }

    /// Config for an extract run: file (explicit or default), then flags, then validation
    pub fn for_extract(args: &ExtractArgs) -> CliResult<Self> {
        let mut config = match &args.config {
            Some(path) => Self::load(path)?,
            None => {
                let default = Path::new(DEFAULT_CONFIG_FILE);
                if default.is_file() {
                    Self::load(default)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(args);
        config.validate()?;
        Ok(config)
    }

    /// Apply command-line flags over file values
    pub fn apply_overrides(&mut self, args: &ExtractArgs) {
        if let Some(name) = &args.client_name {
            self.client.name = name.clone();
        }
        if !args.includes.is_empty() {
            self.client.includes = args.includes.clone();
        }
        if !args.excludes.is_empty() {
            self.client.excludes = args.excludes.clone();
        }
        if args.no_add_typename {
            self.client.add_typename = false;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.client.name.trim().is_empty() {
            return Err(CliError::config_error(
                "Client name is required: set client.name in the config or pass --client-name",
            ));
        }

        if self.client.includes.is_empty() {
            return Err(CliError::config_error("client.includes must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(output: &str) -> ExtractArgs {
        ExtractArgs {
            output: PathBuf::from(output),
            config: None,
            client_name: None,
            includes: Vec::new(),
            excludes: Vec::new(),
            no_add_typename: false,
            timings: false,
        }
    }

    #[test]
    fn test_load_resolves_paths_against_config_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("opmanifest.json");
        fs::write(
            &path,
            r#"{"client": {"name": "web", "includes": ["queries"], "excludes": ["queries/gen"]}}"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.client.name, "web");
        assert_eq!(config.client.includes, vec![dir.path().join("queries")]);
        assert_eq!(config.client.excludes, vec![dir.path().join("queries/gen")]);
        assert!(config.client.add_typename);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("opmanifest.json");
        fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();

        assert_eq!(err.code_str(), "OPM_CLI_CONFIG_ERROR");
        assert!(err.message().starts_with("Invalid config JSON"));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.code_str(), "OPM_CLI_CONFIG_ERROR");
    }

    #[test]
    fn test_flags_override_file_values() {
        let mut config = Config {
            client: ClientConfig::named("file-name"),
        };
        let mut flags = args("manifest.json");
        flags.client_name = Some("flag-name".to_string());
        flags.includes = vec![PathBuf::from("lib")];
        flags.no_add_typename = true;

        config.apply_overrides(&flags);

        assert_eq!(config.client.name, "flag-name");
        assert_eq!(config.client.includes, vec![PathBuf::from("lib")]);
        assert!(!config.client.add_typename);
    }

    #[test]
    fn test_name_is_required() {
        let err = Config::default().validate().unwrap_err();
        assert!(err.message().contains("--client-name"));
    }

    #[test]
    fn test_explicit_config_flag_is_used() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.json");
        fs::write(&path, r#"{"client": {"name": "mobile"}}"#).unwrap();
        let mut flags = args("manifest.json");
        flags.config = Some(path);

        let config = Config::for_extract(&flags).unwrap();

        assert_eq!(config.client.name, "mobile");
        assert_eq!(config.client.includes, vec![dir.path().join("src")]);
    }
}
