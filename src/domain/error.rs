//! Domain error types for DevisDiff.
//!
//! These errors represent domain-level failures that can occur during
//! registry operations. Infrastructure failures (HTTP, filesystem) have
//! their own error types in the infra layer.

use thiserror::Error;

/// Domain errors related to the version registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Version already registered: {0}")]
    DuplicateVersion(String),

    #[error("Unknown version: {0}")]
    UnknownVersion(String),
}
