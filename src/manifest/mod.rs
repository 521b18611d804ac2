//! Operation manifest extraction
//!
//! Turns a set of client operations into a versioned JSON manifest:
//! each record carries the SHA-256 signature of the redacted canonical
//! document, the canonical text itself, and the legacy engine signature.
//!
//! The manifest is assembled fully in memory and written once through a
//! temp-file rename, so the output path either holds the previous content
//! or the complete new manifest.

mod errors;
mod extractor;
mod hooks;
mod types;
mod writer;

pub use errors::{ExtractError, ExtractErrorCode, ExtractResult};
pub use extractor::{extract, Extraction, ManifestExtractor, OperationTransform, StandardTransform};
pub use hooks::{ExtractHooks, NoopHooks, Stage, TimingHooks};
pub use types::{OperationManifest, OperationMetadata, OperationRecord, MANIFEST_VERSION};
pub use writer::write_atomic;

/// Output path used when none is given
pub const DEFAULT_OUTPUT_PATH: &str = "manifest.json";
