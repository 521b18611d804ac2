//! Manifest extraction
//!
//! For each operation, in collection order:
//! 1. validate the document
//! 2. redact literals
//! 3. canonicalize (sort, then print with reduced whitespace)
//! 4. hash the canonical text
//! 5. compute the legacy engine signature from the original document
//!
//! All records are built in memory before the single atomic write, so a
//! failure on any operation leaves the output path untouched.

use std::path::{Path, PathBuf};

use crate::graphql::{validate_operation_document, Document, GraphqlResult};
use crate::normalize::{
    canonicalize, default_signature, hide_certain_literals, operation_hash,
    PLACEHOLDER_OPERATION_NAME,
};
use crate::observability::Timer;
use crate::project::OperationSet;

use super::errors::{ExtractError, ExtractResult};
use super::hooks::{ExtractHooks, NoopHooks, Stage};
use super::types::{OperationManifest, OperationMetadata, OperationRecord};
use super::writer::write_atomic;

/// The per-operation transforms the extractor composes
pub trait OperationTransform {
    /// Reject malformed documents before any transform runs
    fn validate(&self, document: &Document) -> GraphqlResult<()> {
        validate_operation_document(document)
    }

    /// Replace literals that may carry personal data
    fn redact(&self, document: &Document) -> Document;

    /// Deterministic canonical text
    fn canonicalize(&self, document: &Document) -> String;

    /// Content hash of canonical text
    fn hash(&self, canonical: &str) -> String;

    /// Legacy identifier, computed from the original document
    fn legacy_signature(&self, document: &Document) -> String;
}

/// Redaction, canonical sort/print, SHA-256 and the legacy engine signature
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTransform;

impl OperationTransform for StandardTransform {
    fn redact(&self, document: &Document) -> Document {
        hide_certain_literals(document)
    }

    fn canonicalize(&self, document: &Document) -> String {
        canonicalize(document)
    }

    fn hash(&self, canonical: &str) -> String {
        operation_hash(canonical)
    }

    fn legacy_signature(&self, document: &Document) -> String {
        // Operation names are not propagated this far; see normalize::engine
        default_signature(document, PLACEHOLDER_OPERATION_NAME)
    }
}

/// Result of a completed extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub manifest: OperationManifest,
    pub record_count: usize,
    pub output: PathBuf,
}

/// Builds and writes operation manifests
#[derive(Debug, Clone, Default)]
pub struct ManifestExtractor<T = StandardTransform, H = NoopHooks> {
    transform: T,
    hooks: H,
}

impl ManifestExtractor {
    /// Extractor with the standard transforms and no hooks
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T, H> ManifestExtractor<T, H> {
    /// Replace the transforms
    pub fn with_transform<U: OperationTransform>(self, transform: U) -> ManifestExtractor<U, H> {
        ManifestExtractor {
            transform,
            hooks: self.hooks,
        }
    }

    /// Replace the hooks
    pub fn with_hooks<G: ExtractHooks>(self, hooks: G) -> ManifestExtractor<T, G> {
        ManifestExtractor {
            transform: self.transform,
            hooks,
        }
    }
}

impl<T: OperationTransform, H: ExtractHooks> ManifestExtractor<T, H> {
    /// Build the record for one operation
    pub fn record(&self, name: &str, document: &Document) -> ExtractResult<OperationRecord> {
        self.transform
            .validate(document)
            .map_err(|e| ExtractError::invalid_operation(name, e))?;

        let redacted = self.transform.redact(document);
        let canonical = self.transform.canonicalize(&redacted);
        let signature = self.transform.hash(&canonical);
        let engine_signature = self.transform.legacy_signature(document);

        Ok(OperationRecord {
            signature,
            document: canonical,
            metadata: OperationMetadata { engine_signature },
        })
    }

    /// Build the manifest in memory without writing it
    pub fn build(&self, operations: &OperationSet) -> ExtractResult<OperationManifest> {
        self.hooks.stage_started(Stage::Extract);
        let timer = Timer::new();

        let mut records = Vec::with_capacity(operations.len());
        for (name, document) in operations.iter() {
            let record = self.record(name, document)?;
            self.hooks.operation_processed(name, &record.signature);
            records.push(record);
        }

        self.hooks.stage_finished(Stage::Extract, timer.elapsed());
        Ok(OperationManifest::new(records))
    }

    /// Build the manifest and write it to `output`, replacing any existing file
    pub fn extract(&self, operations: &OperationSet, output: &Path) -> ExtractResult<Extraction> {
        let manifest = self.build(operations)?;

        self.hooks.stage_started(Stage::Write);
        let timer = Timer::new();
        let json = manifest.to_json()?;
        write_atomic(output, &json)?;
        self.hooks.stage_finished(Stage::Write, timer.elapsed());

        Ok(Extraction {
            record_count: manifest.len(),
            manifest,
            output: output.to_path_buf(),
        })
    }
}

/// Extract with the standard transforms and no hooks
pub fn extract(operations: &OperationSet, output: &Path) -> ExtractResult<Extraction> {
    ManifestExtractor::new().extract(operations, output)
}
