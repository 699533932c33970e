use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No session-scoped storage in this execution context (e.g. server side)
    #[error("Session storage is unavailable")]
    Unavailable,

    #[error("Storage error: {0}")]
    Storage(String),
}
