//! Error taxonomy for the submission pipeline.
//!
//! Only [`RelayError::AlreadySubmitted`] is ever returned synchronously from
//! [`Report::submit`](crate::report::Report::submit); everything else surfaces
//! through the self-check or is logged from the background task.

use std::path::PathBuf;

/// Errors produced by the submission pipeline.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// A required setting (env var / config key) is absent or blank.
    #[error("required setting [{0}] is not set")]
    ConfigMissing(&'static str),

    /// A configured path does not exist on disk.
    #[error("configured path [{0}] does not exist")]
    ResourceNotFound(PathBuf),

    /// No candidate interpreter answered a version probe with exit status 0.
    #[error("no usable interpreter found among the candidates")]
    InterpreterNotFound,

    /// The notifier script was invoked in self-check mode and exited non-zero.
    #[error("notifier script failed its self-check (exit status {0:?})")]
    ScriptSelfCheckFailed(Option<i32>),

    /// Opening the store or writing a report row failed.
    #[error("store operation failed: {0}")]
    Store(#[from] rusqlite::Error),

    /// The notifier process could not be started.
    #[error("failed to start notifier process: {0}")]
    ProcessSpawn(#[from] std::io::Error),

    /// The report instance has already been submitted; no side effects occurred.
    #[error("report was already submitted")]
    AlreadySubmitted,
}

/// Result alias used by the public issuerelay API.
pub type Result<T> = std::result::Result<T, RelayError>;
