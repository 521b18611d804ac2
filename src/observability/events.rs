//! Observable lifecycle events
//!
//! Events are explicit and typed; each maps to a fixed upper-case name.

use std::fmt;

/// Observable events during a command run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration file loaded
    ConfigLoaded,

    // Project loading
    /// Source file discovery begins
    ProjectLoadBegin,
    /// A source document was parsed
    SourceParsed,
    /// An anonymous operation was skipped
    AnonymousOperationSkipped,
    /// An operation made only of client-side fields was skipped
    ClientOnlyOperationSkipped,
    /// All sources parsed and merged
    ProjectLoadComplete,

    // Extraction
    /// Per-operation transforms begin
    ExtractStageBegin,
    /// One operation record was built
    OperationProcessed,
    /// Per-operation transforms complete
    ExtractStageComplete,

    // Output
    /// Manifest write begins
    WriteStageBegin,
    /// Manifest file committed
    WriteStageComplete,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",

            Event::ProjectLoadBegin => "PROJECT_LOAD_BEGIN",
            Event::SourceParsed => "SOURCE_PARSED",
            Event::AnonymousOperationSkipped => "ANONYMOUS_OPERATION_SKIPPED",
            Event::ClientOnlyOperationSkipped => "CLIENT_ONLY_OPERATION_SKIPPED",
            Event::ProjectLoadComplete => "PROJECT_LOAD_COMPLETE",

            Event::ExtractStageBegin => "EXTRACT_OPERATIONS_BEGIN",
            Event::OperationProcessed => "OPERATION_PROCESSED",
            Event::ExtractStageComplete => "EXTRACT_OPERATIONS_COMPLETE",

            Event::WriteStageBegin => "WRITE_MANIFEST_BEGIN",
            Event::WriteStageComplete => "WRITE_MANIFEST_COMPLETE",
        }
    }

    /// Per-item events are only useful when tracing
    pub fn is_detail(&self) -> bool {
        matches!(self, Event::SourceParsed | Event::OperationProcessed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
