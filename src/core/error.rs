//! Error types for lane and registry operations.

use thiserror::Error;

/// Errors produced by lanes, the registry, and the submission API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LaneError {
    /// A lane was requested with an empty name.
    #[error("lane name cannot be empty")]
    EmptyName,
    /// A lane with the same name is already registered.
    #[error("lane already exists: {0}")]
    AlreadyExists(String),
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    /// The unit was dropped before it could be presented.
    #[error("unit abandoned before presentation")]
    Abandoned,
    /// No async runtime was available to drive lanes.
    #[error("runtime error: {0}")]
    Runtime(String),
}

impl LaneError {
    /// Whether this error stems from caller-supplied names or configuration.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::EmptyName | Self::AlreadyExists(_) | Self::InvalidConfig(_)
        )
    }
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
