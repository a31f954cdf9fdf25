use tafweed_core::{LifecycleError, RecordError, ValidationError};
use tafweed_storage::StorageError;

/// Errors returned by repository operations.
///
/// A failed operation never leaves a partial change behind: the in-memory
/// collection is only replaced after the store accepted the new snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("delegation '{id}' not found")]
    NotFound { id: String },

    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("update would leave an invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("stored value under '{key}' is not valid: {message}")]
    Corrupt { key: String, message: String },

    #[error("failed to encode value for '{key}': {message}")]
    Encode { key: String, message: String },

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl RepositoryError {
    /// Short machine-readable kind, used for JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            RepositoryError::NotFound { .. } => "not_found",
            RepositoryError::Validation(_) => "invalid_input",
            RepositoryError::Lifecycle(_) => "illegal_transition",
            RepositoryError::InvalidRecord(_) => "invalid_record",
            RepositoryError::Corrupt { .. } => "corrupt",
            RepositoryError::Encode { .. } => "encode",
            RepositoryError::Storage(_) => "storage",
        }
    }
}
