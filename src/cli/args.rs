//! CLI argument definitions using clap
//!
//! Commands:
//! - opmanifest client extract [OUTPUT] [--config <path>] [--client-name <name>] ...

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::manifest::DEFAULT_OUTPUT_PATH;

/// opmanifest - GraphQL client operation manifests for registration
#[derive(Parser, Debug)]
#[command(name = "opmanifest")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Client project commands
    Client {
        #[command(subcommand)]
        command: ClientCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClientCommand {
    /// Extract operations from a client project into a manifest
    Extract(ExtractArgs),
}

#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct ExtractArgs {
    /// Path to write the manifest to
    #[arg(default_value = DEFAULT_OUTPUT_PATH)]
    pub output: PathBuf,

    /// Path to configuration file (default: ./opmanifest.json if present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Client name
    #[arg(long)]
    pub client_name: Option<String>,

    /// File or directory to scan for operations (repeatable)
    #[arg(long)]
    pub includes: Vec<PathBuf>,

    /// Path to skip while scanning (repeatable)
    #[arg(long)]
    pub excludes: Vec<PathBuf>,

    /// Do not add __typename to selection sets
    #[arg(long)]
    pub no_add_typename: bool,

    /// Log per-stage timings and per-operation signatures
    #[arg(long)]
    pub timings: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn extract_args(argv: &[&str]) -> ExtractArgs {
        let mut full = vec!["opmanifest", "client", "extract"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Client {
                command: ClientCommand::Extract(args),
            } => args,
        }
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let args = extract_args(&[]);
        assert_eq!(args.output, PathBuf::from("manifest.json"));
        assert_eq!(args.config, None);
        assert!(args.includes.is_empty());
        assert!(!args.no_add_typename);
        assert!(!args.timings);
    }

    #[test]
    fn test_all_flags() {
        let args = extract_args(&[
            "out/ops.json",
            "--config",
            "conf.json",
            "--client-name",
            "web",
            "--includes",
            "src",
            "--includes",
            "lib",
            "--excludes",
            "src/gen",
            "--no-add-typename",
            "--timings",
        ]);
        assert_eq!(args.output, PathBuf::from("out/ops.json"));
        assert_eq!(args.config, Some(PathBuf::from("conf.json")));
        assert_eq!(args.client_name.as_deref(), Some("web"));
        assert_eq!(args.includes, vec![PathBuf::from("src"), PathBuf::from("lib")]);
        assert_eq!(args.excludes, vec![PathBuf::from("src/gen")]);
        assert!(args.no_add_typename);
        assert!(args.timings);
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["opmanifest", "client", "push"]).is_err());
    }
}
