use crate::error::StorageError;

/// The storage trait for Tafweed persistence backends.
///
/// A `KeyValueStore` holds opaque string blobs under fixed keys. Callers
/// serialize whole documents (the delegation collection, user preferences)
/// and rewrite them wholesale on every mutation, so a backend only needs
/// two operations.
///
/// ## Write semantics
///
/// `set` must either store the complete value or fail. A reader must never
/// observe a half-written blob after `set` returns an error.
///
/// ## Threading
///
/// The system is single-user and synchronous; implementations are not
/// required to be `Sync`.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored for `key` yet.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}
