use thiserror::Error;

/// Failures that stop an invocation outright.
///
/// Per-function problems during a fleet run are reported through
/// [`crate::contract::DeployOutcome`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AutodeployError {
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("invalid event payload: {0}")]
    InvalidEvent(String),

    #[error("failed to discover functions: {0}")]
    Discovery(String),
}
