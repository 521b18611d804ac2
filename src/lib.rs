//! opmanifest - GraphQL client operation manifests
//!
//! Collects the operations of a client project, redacts literal values,
//! canonicalizes and hashes each one, and writes a versioned JSON manifest
//! for registration with an operation registry.

pub mod cli;
pub mod graphql;
pub mod manifest;
pub mod normalize;
pub mod observability;
pub mod project;
