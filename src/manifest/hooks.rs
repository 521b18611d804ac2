//! Extraction hooks
//!
//! The extractor reports stage boundaries and per-operation progress
//! through `ExtractHooks`. The default does nothing; `TimingHooks` writes
//! structured log lines with elapsed times.

use std::time::Duration;

use crate::observability::{log_event_with_fields, Event};

/// Extraction stages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Redact, canonicalize, hash and sign every operation
    Extract,
    /// Serialize and write the manifest
    Write,
}

impl Stage {
    fn begin_event(&self) -> Event {
        match self {
            Stage::Extract => Event::ExtractStageBegin,
            Stage::Write => Event::WriteStageBegin,
        }
    }

    fn complete_event(&self) -> Event {
        match self {
            Stage::Extract => Event::ExtractStageComplete,
            Stage::Write => Event::WriteStageComplete,
        }
    }
}

/// Observer for extraction progress. All methods default to no-ops.
pub trait ExtractHooks {
    fn stage_started(&self, _stage: Stage) {}

    fn stage_finished(&self, _stage: Stage, _elapsed: Duration) {}

    fn operation_processed(&self, _operation: &str, _signature: &str) {}
}

/// Hooks that observe nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl ExtractHooks for NoopHooks {}

/// Hooks that log stage timings and per-operation signatures
#[derive(Debug, Clone, Copy, Default)]
pub struct TimingHooks;

impl ExtractHooks for TimingHooks {
    fn stage_started(&self, stage: Stage) {
        log_event_with_fields(stage.begin_event(), &[]);
    }

    fn stage_finished(&self, stage: Stage, elapsed: Duration) {
        let elapsed_ms = elapsed.as_millis().to_string();
        log_event_with_fields(stage.complete_event(), &[("elapsed_ms", elapsed_ms.as_str())]);
    }

    fn operation_processed(&self, operation: &str, signature: &str) {
        log_event_with_fields(
            Event::OperationProcessed,
            &[("operation", operation), ("signature", signature)],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_events_pair_up() {
        assert_eq!(Stage::Extract.begin_event(), Event::ExtractStageBegin);
        assert_eq!(Stage::Extract.complete_event(), Event::ExtractStageComplete);
        assert_eq!(Stage::Write.begin_event(), Event::WriteStageBegin);
        assert_eq!(Stage::Write.complete_event(), Event::WriteStageComplete);
    }

    #[test]
    fn test_timing_hooks_do_not_panic() {
        let hooks = TimingHooks;
        hooks.stage_started(Stage::Extract);
        hooks.operation_processed("GetUser", "abc");
        hooks.stage_finished(Stage::Extract, Duration::from_millis(5));
    }
}
