//! CLI command implementations
//!
//! `client extract`:
//! 1. Configuration (file, then flags)
//! 2. Project load (discover and parse sources)
//! 3. Merge (one document per operation)
//! 4. Extract and write the manifest
//!
//! Any failure aborts the command before the manifest is written.

use std::path::Path;

use crate::manifest::{Extraction, ManifestExtractor, TimingHooks};
use crate::observability::{Logger, ObservationScope, Severity};
use crate::project::{ClientConfig, ClientProject};

use super::args::{ClientCommand, Command, ExtractArgs};
use super::config::Config;
use super::errors::CliResult;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Client {
            command: ClientCommand::Extract(args),
        } => {
            let summary = extract(&args)?;
            println!("{}", summary);
            Ok(())
        }
    }
}

/// Extract the client's operations into a manifest at `args.output`
///
/// Returns the one-line summary printed on success.
pub fn extract(args: &ExtractArgs) -> CliResult<String> {
    if args.timings {
        Logger::set_min_severity(Severity::Trace);
    }

    let config = Config::for_extract(args)?;
    let client = &config.client;
    let output = args.output.display().to_string();

    let scope = ObservationScope::with_fields(
        "CLIENT_EXTRACT",
        &[("client", client.name.as_str()), ("output", output.as_str())],
    );

    match extract_client(client, &args.output, args.timings) {
        Ok(extraction) => {
            let count = extraction.record_count.to_string();
            scope.complete_with_fields(&[("operations", count.as_str())]);
            Ok(format!(
                "Successfully wrote {} operations from the {} client to {}",
                extraction.record_count, client.name, output
            ))
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e)
        }
    }
}

fn extract_client(client: &ClientConfig, output: &Path, timings: bool) -> CliResult<Extraction> {
    let project = ClientProject::load(client)?;
    let operations = project.merged_operations_and_fragments()?;

    let extraction = if timings {
        ManifestExtractor::new()
            .with_hooks(TimingHooks)
            .extract(&operations, output)?
    } else {
        ManifestExtractor::new().extract(&operations, output)?
    };

    Ok(extraction)
}
