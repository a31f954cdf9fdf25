//! tafweed-repository: the owned delegation collection and its persistence.
//!
//! [`DelegationRepository`] loads the collection from a
//! [`KeyValueStore`](tafweed_storage::KeyValueStore), applies creations and
//! lifecycle changes through the rules in `tafweed-core`, and writes the whole
//! collection back after every mutation. [`PreferencesStore`] does the same
//! for user settings.

mod error;
mod identity;
mod preferences;
mod repository;
pub mod seed;

pub use error::RepositoryError;
pub use identity::{Identity, DEFAULT_DELEGATE_ID, DEFAULT_GRANTOR_ID, DEFAULT_GRANTOR_NAME};
pub use preferences::PreferencesStore;
pub use repository::DelegationRepository;

/// Storage key holding the delegation collection as a JSON array.
pub const DELEGATIONS_KEY: &str = "absher-delegations";
/// Storage key holding the user's preferences as a JSON object.
pub const SETTINGS_KEY: &str = "absher-settings";
