use crate::state::RunKind;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(String),

    #[error("Invalid view: {0}")]
    InvalidView(String),

    #[error("{0} is already running")]
    ConcurrentRunRejected(RunKind),

    #[error("Run cancelled before completion")]
    RunCancelled,

    // Reserved for a real mail provider integration.
    #[allow(dead_code)]
    #[error("Connection failed: {0}")]
    Connection(String),

    #[allow(dead_code)]
    #[error("Rate limited: {0}")]
    RateLimited(String),
}
