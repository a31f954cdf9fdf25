//! Lifecycle engine: which status changes are permitted, what a delegate
//! decision does to a record, when a window closes, and what each party
//! gets to see.
//!
//! Every function here is pure. Results are expressed as [`DelegationPatch`]
//! values that the repository merges and persists.
//!
//! State machine over `(status, delegateStatus)`:
//!
//! ```text
//! pending/pending --accept--> active/accepted --window closes--> completed/accepted
//!        |                           \
//!        |                            `--------(explicit)-----> expired/accepted
//!        |--reject--> rejected/rejected
//!        `--window closes--> expired/pending
//! ```

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::delegation::{
    DelegateStatus, Delegation, DelegationPatch, DelegationStatus, Party, PartyVisibility,
};
use crate::error::LifecycleError;

// ──────────────────────────────────────────────
// Transitions
// ──────────────────────────────────────────────

/// The delegate's answer to a pending delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// `terms_acknowledged` mirrors the consent checkbox; accepting without it
    /// is refused.
    Accept { terms_acknowledged: bool },
    Reject,
}

fn is_permitted(
    from: (DelegationStatus, DelegateStatus),
    to: (DelegationStatus, DelegateStatus),
) -> bool {
    use DelegateStatus as D;
    use DelegationStatus as S;

    if from == to {
        return true;
    }
    matches!(
        (from, to),
        ((S::Pending, D::Pending), (S::Active, D::Accepted))
            | ((S::Pending, D::Pending), (S::Rejected, D::Rejected))
            | ((S::Pending, D::Pending), (S::Expired, D::Pending))
            | ((S::Active, D::Accepted), (S::Completed, D::Accepted))
            | ((S::Active, D::Accepted), (S::Expired, D::Accepted))
    )
}

/// Validate moving `record` to the given status pair.
pub fn check_transition(
    record: &Delegation,
    to_status: DelegationStatus,
    to_delegate: DelegateStatus,
) -> Result<(), LifecycleError> {
    let from = (record.status, record.delegate_status);
    if is_permitted(from, (to_status, to_delegate)) {
        Ok(())
    } else {
        Err(LifecycleError::IllegalTransition {
            id: record.id.clone(),
            from_status: from.0,
            from_delegate: from.1,
            to_status,
            to_delegate,
        })
    }
}

/// Validate the status part of an arbitrary patch against `record` at `now`.
///
/// Fields the patch leaves unset keep their current value. Moving to
/// `completed` or `expired` is only possible once the (patched) window has
/// ended.
pub fn check_patch(
    record: &Delegation,
    patch: &DelegationPatch,
    now: OffsetDateTime,
) -> Result<(), LifecycleError> {
    if !patch.changes_status() {
        return Ok(());
    }
    let to_status = patch.status.unwrap_or(record.status);
    check_transition(
        record,
        to_status,
        patch.delegate_status.unwrap_or(record.delegate_status),
    )?;

    let closes = matches!(to_status, DelegationStatus::Completed | DelegationStatus::Expired);
    let end_at = patch.end_at.unwrap_or(record.end_at);
    if closes && to_status != record.status && now < end_at {
        return Err(LifecycleError::WindowOpen {
            id: record.id.clone(),
            to_status,
            end_at,
        });
    }
    Ok(())
}

/// Compute the update produced by a delegate decision.
pub fn decide(
    record: &Delegation,
    decision: Decision,
    now: OffsetDateTime,
) -> Result<DelegationPatch, LifecycleError> {
    if record.delegate_status != DelegateStatus::Pending {
        return Err(LifecycleError::AlreadyDecided {
            id: record.id.clone(),
            delegate_status: record.delegate_status,
        });
    }
    if record.status.is_terminal() {
        return Err(LifecycleError::Closed {
            id: record.id.clone(),
            status: record.status,
        });
    }
    if now >= record.end_at {
        return Err(LifecycleError::WindowEnded {
            id: record.id.clone(),
            end_at: record.end_at,
        });
    }

    match decision {
        Decision::Accept { terms_acknowledged } => {
            if !terms_acknowledged {
                return Err(LifecycleError::TermsNotAccepted {
                    id: record.id.clone(),
                });
            }
            check_transition(record, DelegationStatus::Active, DelegateStatus::Accepted)?;
            Ok(DelegationPatch {
                status: Some(DelegationStatus::Active),
                delegate_status: Some(DelegateStatus::Accepted),
                delegate_accepted_terms: Some(true),
                delegate_accepted_at: Some(Some(now)),
                ..Default::default()
            })
        }
        Decision::Reject => {
            check_transition(record, DelegationStatus::Rejected, DelegateStatus::Rejected)?;
            Ok(DelegationPatch {
                status: Some(DelegationStatus::Rejected),
                delegate_status: Some(DelegateStatus::Rejected),
                ..Default::default()
            })
        }
    }
}

/// Status a record should move to because its window closed, if any.
///
/// An undecided delegation expires; an accepted one is completed.
pub fn window_closed_target(record: &Delegation, now: OffsetDateTime) -> Option<DelegationStatus> {
    if now < record.end_at {
        return None;
    }
    match record.status {
        DelegationStatus::Pending => Some(DelegationStatus::Expired),
        DelegationStatus::Active => Some(DelegationStatus::Completed),
        _ => None,
    }
}

/// Patch closing the window on `record`, or `None` if it is still open or
/// already terminal.
pub fn close_window(record: &Delegation, now: OffsetDateTime) -> Option<DelegationPatch> {
    window_closed_target(record, now).map(|status| DelegationPatch {
        status: Some(status),
        ..Default::default()
    })
}

// ──────────────────────────────────────────────
// Per-party visibility
// ──────────────────────────────────────────────

/// Flag-only actions a party can take on its own view of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisibilityAction {
    Archive,
    Unarchive,
    /// Soft delete. The other party keeps seeing the record.
    Delete,
}

/// Patch applying `action` to `party`'s view. Permitted at any status.
pub fn visibility_patch(record: &Delegation, party: Party, action: VisibilityAction) -> DelegationPatch {
    let mut view = record.visibility(party);
    match action {
        VisibilityAction::Archive => view.archived = true,
        VisibilityAction::Unarchive => view.archived = false,
        VisibilityAction::Delete => view.deleted = true,
    }
    let mut patch = DelegationPatch::default();
    match party {
        Party::Grantor => patch.grantor_visibility = Some(view),
        Party::Delegate => patch.delegate_visibility = Some(view),
    }
    patch
}

/// Which slice of a party's records a listing shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListView {
    /// Everything not deleted, archived or not.
    #[default]
    All,
    /// Not archived and not deleted.
    Inbox,
    /// Archived but not deleted.
    Archived,
}

impl ListView {
    pub fn admits(self, view: PartyVisibility) -> bool {
        if view.deleted {
            return false;
        }
        match self {
            ListView::All => true,
            ListView::Inbox => !view.archived,
            ListView::Archived => view.archived,
        }
    }
}

impl std::str::FromStr for ListView {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ListView::All),
            "inbox" => Ok(ListView::Inbox),
            "archived" => Ok(ListView::Archived),
            _ => Err(format!("unknown view '{}' (expected all, inbox or archived)", s)),
        }
    }
}

/// Listing filter for one party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListFilter {
    pub view: ListView,
    pub status: Option<DelegationStatus>,
}

impl ListFilter {
    pub fn matches(&self, record: &Delegation, party: Party) -> bool {
        self.view.admits(record.visibility(party))
            && self.status.map_or(true, |s| record.status == s)
    }
}

/// True unless `party` has deleted the record from its view.
pub fn is_visible_to(record: &Delegation, party: Party) -> bool {
    !record.visibility(party).deleted
}

/// Controls a caller may enable for `party` on `record`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailableActions {
    pub accept: bool,
    pub reject: bool,
    pub archive: bool,
    pub unarchive: bool,
    pub delete: bool,
}

pub fn available_actions(record: &Delegation, party: Party, now: OffsetDateTime) -> AvailableActions {
    let view = record.visibility(party);
    let decide = party == Party::Delegate && record.awaiting_decision() && now < record.end_at;
    AvailableActions {
        accept: decide,
        reject: decide,
        archive: !view.deleted && !view.archived,
        unarchive: !view.deleted && view.archived,
        delete: !view.deleted,
    }
}
