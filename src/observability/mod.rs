//! Observability for opmanifest
//!
//! Provides:
//! - Structured logging (JSON lines on stderr)
//! - Typed lifecycle events
//! - Scope-based BEGIN/COMPLETE/FAILED logging with elapsed time
//!
//! Observability is read-only: nothing here can fail a command.
//!
//! ```ignore
//! use opmanifest::observability::{log_event_with_fields, Event, Logger, ObservationScope};
//!
//! Logger::info("CONFIG_LOADED", &[("path", "opmanifest.json")]);
//! log_event_with_fields(Event::ProjectLoadComplete, &[("operations", "12")]);
//!
//! let scope = ObservationScope::new("CLIENT_EXTRACT");
//! // ... do work ...
//! scope.complete();
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::{ObservationScope, Timer};

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
///
/// Per-item events log at TRACE, everything else at INFO.
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_detail() {
        Severity::Trace
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
