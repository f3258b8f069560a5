//! Failure types of the code allocator and the link store.

use thiserror::Error;

/// Errors returned by a [`crate::domain::repositories::LinkRepository`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The short code is already taken. Raised by the store itself at write time.
    #[error("short code '{0}' already exists")]
    DuplicateCode(String),

    #[error("short code '{0}' not found")]
    NotFound(String),

    /// Connectivity, timeout or any other fault of the underlying storage.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

/// Errors returned while deciding the short code of a new link.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    #[error("short code '{0}' must be 1-20 alphanumeric characters")]
    InvalidFormat(String),

    #[error("short code '{0}' already exists")]
    AlreadyExists(String),

    #[error("no free short code found after {attempts} attempts")]
    Exhausted { attempts: usize },

    /// The existence check itself failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
