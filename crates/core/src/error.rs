//! Error types for record invariants, creation input, and lifecycle rules.

use time::OffsetDateTime;

use crate::delegation::{DelegateStatus, DelegationStatus};

/// A stored record breaks one of its structural invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("delegation id must not be empty")]
    EmptyId,

    #[error("delegation {id}: end {end_at} is not after start {start_at}")]
    WindowNotOrdered {
        id: String,
        start_at: OffsetDateTime,
        end_at: OffsetDateTime,
    },

    #[error("delegation {id}: accepted without terms acknowledgment and timestamp")]
    AcceptedWithoutTerms { id: String },
}

/// A creation request was rejected before any record was built.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown service '{service_id}'")]
    UnknownService { service_id: String },

    #[error("field '{field}' must not be empty")]
    MissingField { field: &'static str },

    #[error("delegate id must be exactly 10 characters, got {length}")]
    InvalidDelegateId { length: usize },

    #[error("phone number '{phone}' must have the form 05xxxxxxxx")]
    InvalidPhone { phone: String },

    #[error("custom duration requires an explicit end date")]
    CustomWithoutEnd,

    #[error("end {end_at} must be after start {start_at}")]
    EndNotAfterStart {
        start_at: OffsetDateTime,
        end_at: OffsetDateTime,
    },

    #[error("timestamp overflow computing the end of the authorization window")]
    WindowOverflow,
}

/// A lifecycle rule refused a status change.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LifecycleError {
    #[error("delegation {id}: illegal transition {from_status}/{from_delegate} -> {to_status}/{to_delegate}")]
    IllegalTransition {
        id: String,
        from_status: DelegationStatus,
        from_delegate: DelegateStatus,
        to_status: DelegationStatus,
        to_delegate: DelegateStatus,
    },

    #[error("delegation {id}: the delegate already decided ({delegate_status})")]
    AlreadyDecided {
        id: String,
        delegate_status: DelegateStatus,
    },

    #[error("delegation {id}: status {status} no longer accepts decisions")]
    Closed { id: String, status: DelegationStatus },

    #[error("delegation {id}: terms must be acknowledged before accepting")]
    TermsNotAccepted { id: String },

    #[error("delegation {id}: the window ended at {end_at}; no decision can be recorded")]
    WindowEnded { id: String, end_at: OffsetDateTime },

    #[error("delegation {id}: cannot move to {to_status} before the window ends at {end_at}")]
    WindowOpen {
        id: String,
        to_status: DelegationStatus,
        end_at: OffsetDateTime,
    },
}
