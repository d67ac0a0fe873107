use std::error::Error;
use thiserror::Error;

/// Result alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Backend-agnostic failure raised by room storage implementations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backend cannot currently serve reads or writes.
    #[error("storage unavailable: {message}")]
    Unavailable {
        /// Human-readable failure summary.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// A persisted room document does not map back to a valid room value.
    #[error("stored room document is corrupted: {message}")]
    Corrupted {
        /// What made the document unreadable.
        message: String,
        /// Backend-specific cause.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Wrap any backend failure as an unavailability error.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }

    /// Construct a corrupted-document error from a decode failure.
    pub fn corrupted(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Corrupted {
            message,
            source: Box::new(source),
        }
    }
}
