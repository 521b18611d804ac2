//! Operation manifest structure and serialization
//!
//! Format:
//! ```json
//! {
//!   "version": 1,
//!   "operations": [
//!     {
//!       "signature": "<64 hex chars>",
//!       "document": "query GetUser{user(id:\"\"){id}}",
//!       "metadata": { "engineSignature": "query GetUser{user(id:\"\"){id}}" }
//!     }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{ExtractError, ExtractResult};

/// Manifest format version written by this crate
pub const MANIFEST_VERSION: u32 = 1;

/// The versioned list of extracted operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationManifest {
    /// Always [`MANIFEST_VERSION`]
    pub version: u32,
    /// Records in input order
    pub operations: Vec<OperationRecord>,
}

/// One extracted operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationRecord {
    /// SHA-256 of `document`, lowercase hex
    pub signature: String,
    /// Canonical text
    pub document: String,
    pub metadata: OperationMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationMetadata {
    /// Legacy identifier; not guaranteed unique
    pub engine_signature: String,
}

impl OperationManifest {
    /// Creates a manifest at the current format version
    pub fn new(operations: Vec<OperationRecord>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            operations,
        }
    }

    /// Number of operation records
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Serializes to pretty-printed JSON (2-space indent, no trailing newline)
    pub fn to_json(&self) -> ExtractResult<String> {
        serde_json::to_string_pretty(self).map_err(ExtractError::serialize_failed)
    }

    /// Parses a manifest from JSON
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Reads a manifest file
    pub fn read_from_file(path: &Path) -> ExtractResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ExtractError::io_error_at_path("read", path, e))?;
        Self::from_json(&content).map_err(ExtractError::serialize_failed)
    }
}
