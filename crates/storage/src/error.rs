/// All errors that can be returned by a KeyValueStore implementation.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The key cannot be mapped onto the backend (empty, path separators, etc.).
    #[error("invalid storage key '{key}': {reason}")]
    InvalidKey { key: String, reason: String },

    /// Reading or writing the value for `key` failed at the OS level.
    #[error("i/o error on key '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A backend-specific failure that has no better classification.
    #[error("storage backend error: {0}")]
    Backend(String),
}
