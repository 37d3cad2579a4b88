//! Error type shared by the jobs client and the job store.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, JobsError>;

/// The operation a [`JobsError`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Fetch,
    NotFound,
    Create,
    Update,
    Delete,
    Config,
}

/// Failure of a jobs API call, or of building the client.
///
/// The operation variants display as their bare message so the text stored in
/// the store's `error` field is exactly what the caller was handed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobsError {
    /// Listing jobs failed (non-2xx status or transport failure).
    #[error("{0}")]
    Fetch(String),
    /// Loading a single job failed. Any non-2xx status is reported this way.
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Create(String),
    /// Carries the server's response text when there was one.
    #[error("{0}")]
    Update(String),
    #[error("{0}")]
    Delete(String),
    /// The client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl JobsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobsError::Fetch(_) => ErrorKind::Fetch,
            JobsError::NotFound(_) => ErrorKind::NotFound,
            JobsError::Create(_) => ErrorKind::Create,
            JobsError::Update(_) => ErrorKind::Update,
            JobsError::Delete(_) => ErrorKind::Delete,
            JobsError::Config(_) => ErrorKind::Config,
        }
    }

    /// The human-readable message, without any kind prefix.
    pub fn message(&self) -> &str {
        match self {
            JobsError::Fetch(msg)
            | JobsError::NotFound(msg)
            | JobsError::Create(msg)
            | JobsError::Update(msg)
            | JobsError::Delete(msg)
            | JobsError::Config(msg) => msg,
        }
    }

    /// Build an error of the given kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::Fetch => JobsError::Fetch(message),
            ErrorKind::NotFound => JobsError::NotFound(message),
            ErrorKind::Create => JobsError::Create(message),
            ErrorKind::Update => JobsError::Update(message),
            ErrorKind::Delete => JobsError::Delete(message),
            ErrorKind::Config => JobsError::Config(message),
        }
    }
}
