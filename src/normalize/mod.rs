//! Operation normalization
//!
//! - `redact`: hide literals that may carry personal data
//! - `sort`: canonical child ordering
//! - `engine`: legacy engine signature
//! - `hash`: content hash of canonical text

pub mod engine;
pub mod hash;
pub mod redact;
pub mod sort;

pub use engine::{default_signature, PLACEHOLDER_OPERATION_NAME};
pub use hash::{is_operation_hash, operation_hash, OPERATION_HASH_LEN};
pub use redact::hide_certain_literals;
pub use sort::sort_document;

use crate::graphql::{print_reduced, Document};

/// Sort then print with reduced whitespace
pub fn canonicalize(document: &Document) -> String {
    print_reduced(&sort_document(document))
}
