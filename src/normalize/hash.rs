//! Operation content hash
//!
//! SHA-256 over the UTF-8 bytes of the canonical text, lowercase hex.

use sha2::{Digest, Sha256};

/// Length of a hex-encoded operation hash
pub const OPERATION_HASH_LEN: usize = 64;

/// Hash canonical operation text
pub fn operation_hash(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Whether `value` looks like an operation hash
pub fn is_operation_hash(value: &str) -> bool {
    value.len() == OPERATION_HASH_LEN
        && value
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vector() {
        assert_eq!(
            operation_hash(""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
        assert_eq!(
            operation_hash("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_shape_and_determinism() {
        let text = "query GetUser{user(id:\"\"){id}}";
        let first = operation_hash(text);
        assert_eq!(first, operation_hash(text));
        assert!(is_operation_hash(&first));
        assert_ne!(first, operation_hash("query GetUser{user(id:\"\"){name}}"));
    }

    #[test]
    fn test_is_operation_hash_rejects_bad_input() {
        assert!(!is_operation_hash("abc"));
        assert!(!is_operation_hash(&"A".repeat(64)));
        assert!(!is_operation_hash(&"g".repeat(64)));
    }
}
