//! Error types for itinerary persistence.

use thiserror::Error;

/// Errors that can occur while persisting trips.
///
/// Reads never produce these: a value that cannot be read back cleanly
/// is reported as absent instead. Only writes fail loudly, because a
/// write that did not land means the on-disk state no longer matches
/// memory.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file could not be written.
    #[error("failed to write store file: {0}")]
    Io(#[from] std::io::Error),

    /// A trip could not be serialized for storage.
    #[error("failed to serialize trip data: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backing store rejected the operation.
    #[error("store backend error: {message}")]
    Backend { message: String },
}

impl StoreError {
    pub(crate) fn backend(message: impl Into<String>) -> Self {
        Self::Backend {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = StoreError::backend("lock poisoned");
        assert_eq!(err.to_string(), "store backend error: lock poisoned");

        let err = StoreError::Io(std::io::Error::other("disk full"));
        assert!(err.to_string().contains("failed to write store file"));
    }
}
