//! tafweed-core: delegation domain model.
//!
//! Everything here is pure and storage-agnostic: the delegation record and
//! its invariants, the service catalog, authorization window resolution, the
//! lifecycle state machine with per-party visibility, the chat intent
//! detector, analytics, and user preferences. Persistence lives in
//! `tafweed-repository`.
//!
//! # Public API
//!
//! - [`Delegation`], [`DelegationPatch`] -- the record and partial updates
//! - [`ServiceCatalog`] -- static list of delegable services
//! - [`resolve_end()`] -- compute the end of the authorization window
//! - [`lifecycle`] -- transition table, decisions, visibility, listing views
//! - [`IntentDetector`] -- keyword intent detection for the assistant
//! - [`ChatSession`] -- assistant transcript and draft
//! - [`DelegationStats`], [`StatusSummary`] -- dashboard figures
//! - [`Preferences`] -- language and accessibility settings

pub mod analytics;
pub mod catalog;
pub mod chat;
pub mod clock;
pub mod delegation;
pub mod duration;
pub mod error;
pub mod input;
pub mod intent;
pub mod lifecycle;
pub mod preferences;

#[cfg(test)]
mod fixtures;

// ── Convenience re-exports: key types ────────────────────────────────

pub use analytics::{latest, DelegationStats, StatusSummary};
pub use catalog::{ServiceCatalog, ServiceOption};
pub use chat::{ChatDraft, ChatMessage, ChatRole, ChatSession};
pub use clock::{Clock, FixedClock, SystemClock};
pub use delegation::{
    DelegateStatus, Delegation, DelegationPatch, DelegationStatus, DurationType, Party,
    PartyVisibility, Platform,
};
pub use error::{LifecycleError, RecordError, ValidationError};
pub use input::{CreateDelegationInput, DEFAULT_CHAT_PHONE};
pub use intent::{IntentDetector, IntentDraft};
pub use lifecycle::{Decision, ListFilter, ListView, VisibilityAction};
pub use preferences::{Language, Preferences, Toggle};

// ── Convenience re-exports: operations ───────────────────────────────

pub use duration::resolve_end;
