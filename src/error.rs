//! Error types for rule registration and configuration

use crate::form::FieldIdentity;

/// Rule registration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegistryError {
    #[error("reaction for `{identity}` writes back into its own trigger field")]
    SelfWrite { identity: FieldIdentity },
}

/// Engine configuration errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("debounce window must be greater than zero")]
    InvalidWindow,

    #[error("keyword list `{list}` is empty")]
    EmptyKeywords { list: &'static str },

    #[error("cascade depth must be at least 1")]
    InvalidCascadeDepth,
}
