//! The delegation record and its enumerations.
//!
//! A [`Delegation`] is the single persisted entity. It is serialized with
//! camelCase field names and RFC 3339 timestamps; the persisted collection is
//! a JSON array of these objects, most recent first.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::error::RecordError;
use crate::preferences::Language;

// ──────────────────────────────────────────────
// Enumerations
// ──────────────────────────────────────────────

/// Issuing government system a service belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Platform {
    Absher,
    AbsherBusiness,
    Najiz,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Absher, Platform::AbsherBusiness, Platform::Najiz];

    /// Wire name, as stored in the persisted blob.
    pub fn as_str(self) -> &'static str {
        match self {
            Platform::Absher => "absher",
            Platform::AbsherBusiness => "absherBusiness",
            Platform::Najiz => "najiz",
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Platform::Absher, Language::Ar) => "أبشر",
            (Platform::Absher, Language::En) => "Absher",
            (Platform::AbsherBusiness, Language::Ar) => "أبشر أعمال",
            (Platform::AbsherBusiness, Language::En) => "Absher Business",
            (Platform::Najiz, Language::Ar) => "ناجز",
            (Platform::Najiz, Language::En) => "Najiz",
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Platform::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown platform '{}'", s))
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Shape of the authorization window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DurationType {
    /// Fixed 24 hours from start.
    #[serde(rename = "24h")]
    Hours24,
    /// Fixed 7 days from start.
    #[serde(rename = "7d")]
    Days7,
    /// Caller-chosen end date.
    #[serde(rename = "custom")]
    Custom,
}

impl DurationType {
    pub const ALL: [DurationType; 3] = [DurationType::Hours24, DurationType::Days7, DurationType::Custom];

    pub fn as_str(self) -> &'static str {
        match self {
            DurationType::Hours24 => "24h",
            DurationType::Days7 => "7d",
            DurationType::Custom => "custom",
        }
    }

    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (DurationType::Hours24, Language::Ar) => "24 ساعة",
            (DurationType::Hours24, Language::En) => "24 hours",
            (DurationType::Days7, Language::Ar) => "7 أيام",
            (DurationType::Days7, Language::En) => "7 days",
            (DurationType::Custom, Language::Ar) => "تاريخ مخصص",
            (DurationType::Custom, Language::En) => "Custom",
        }
    }
}

impl std::str::FromStr for DurationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DurationType::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown duration type '{}' (expected 24h, 7d or custom)", s))
    }
}

impl std::fmt::Display for DurationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grantor-facing lifecycle state. This is the authoritative status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelegationStatus {
    Pending,
    Active,
    Completed,
    Rejected,
    Expired,
}

impl DelegationStatus {
    pub const ALL: [DelegationStatus; 5] = [
        DelegationStatus::Pending,
        DelegationStatus::Active,
        DelegationStatus::Completed,
        DelegationStatus::Rejected,
        DelegationStatus::Expired,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DelegationStatus::Pending => "pending",
            DelegationStatus::Active => "active",
            DelegationStatus::Completed => "completed",
            DelegationStatus::Rejected => "rejected",
            DelegationStatus::Expired => "expired",
        }
    }

    /// No party decision may move a record out of a terminal status.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            DelegationStatus::Completed | DelegationStatus::Rejected | DelegationStatus::Expired
        )
    }

    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (DelegationStatus::Pending, Language::Ar) => "قيد الانتظار",
            (DelegationStatus::Pending, Language::En) => "Pending",
            (DelegationStatus::Active, Language::Ar) => "نشط",
            (DelegationStatus::Active, Language::En) => "Active",
            (DelegationStatus::Completed, Language::Ar) => "مكتمل",
            (DelegationStatus::Completed, Language::En) => "Completed",
            (DelegationStatus::Rejected, Language::Ar) => "مرفوض",
            (DelegationStatus::Rejected, Language::En) => "Rejected",
            (DelegationStatus::Expired, Language::Ar) => "منتهي",
            (DelegationStatus::Expired, Language::En) => "Expired",
        }
    }
}

impl std::str::FromStr for DelegationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DelegationStatus::ALL
            .into_iter()
            .find(|st| st.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown status '{}'", s))
    }
}

impl std::fmt::Display for DelegationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The delegate's own decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DelegateStatus {
    Pending,
    Accepted,
    Rejected,
}

impl DelegateStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DelegateStatus::Pending => "pending",
            DelegateStatus::Accepted => "accepted",
            DelegateStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for DelegateStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a delegation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Party {
    Grantor,
    Delegate,
}

impl Party {
    pub fn as_str(self) -> &'static str {
        match self {
            Party::Grantor => "grantor",
            Party::Delegate => "delegate",
        }
    }
}

impl std::str::FromStr for Party {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grantor" => Ok(Party::Grantor),
            "delegate" => Ok(Party::Delegate),
            _ => Err(format!("unknown party '{}' (expected grantor or delegate)", s)),
        }
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How one party sees a record. Each party owns its own copy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyVisibility {
    pub archived: bool,
    pub deleted: bool,
}

// ──────────────────────────────────────────────
// The record
// ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delegation {
    pub id: String,

    pub service_id: String,
    pub service_name_ar: String,
    pub service_name_en: String,
    pub platform: Platform,
    pub is_digital_service: bool,

    pub grantor_id: String,
    pub grantor_name: String,
    pub delegate_id: String,
    pub delegate_name: String,
    pub delegate_phone: String,

    pub duration_type: DurationType,
    #[serde(with = "time::serde::rfc3339")]
    pub start_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_at: OffsetDateTime,

    pub status: DelegationStatus,
    pub delegate_status: DelegateStatus,
    pub delegate_accepted_terms: bool,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub delegate_accepted_at: Option<OffsetDateTime>,

    pub grantor_visibility: PartyVisibility,
    pub delegate_visibility: PartyVisibility,

    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Delegation {
    pub fn visibility(&self, party: Party) -> PartyVisibility {
        match party {
            Party::Grantor => self.grantor_visibility,
            Party::Delegate => self.delegate_visibility,
        }
    }

    pub fn visibility_mut(&mut self, party: Party) -> &mut PartyVisibility {
        match party {
            Party::Grantor => &mut self.grantor_visibility,
            Party::Delegate => &mut self.delegate_visibility,
        }
    }

    /// Identifier of the given party on this record.
    pub fn party_id(&self, party: Party) -> &str {
        match party {
            Party::Grantor => &self.grantor_id,
            Party::Delegate => &self.delegate_id,
        }
    }

    /// Display name of the service in the requested language.
    pub fn service_name(&self, language: Language) -> &str {
        match language {
            Language::Ar => &self.service_name_ar,
            Language::En => &self.service_name_en,
        }
    }

    /// True while the delegate can still accept or reject.
    pub fn awaiting_decision(&self) -> bool {
        self.delegate_status == DelegateStatus::Pending && !self.status.is_terminal()
    }

    /// Check the structural invariants every stored record must satisfy.
    pub fn check_invariants(&self) -> Result<(), RecordError> {
        if self.id.trim().is_empty() {
            return Err(RecordError::EmptyId);
        }
        if self.end_at <= self.start_at {
            return Err(RecordError::WindowNotOrdered {
                id: self.id.clone(),
                start_at: self.start_at,
                end_at: self.end_at,
            });
        }
        if self.delegate_status == DelegateStatus::Accepted
            && (!self.delegate_accepted_terms || self.delegate_accepted_at.is_none())
        {
            return Err(RecordError::AcceptedWithoutTerms {
                id: self.id.clone(),
            });
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Partial updates
// ──────────────────────────────────────────────

/// A partial field set merged into an existing record.
///
/// Identity and audit fields (`id`, `createdAt`, `updatedAt`) are not
/// patchable; `updatedAt` is refreshed by whoever applies the patch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DelegationPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_type: Option<DurationType>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
    pub start_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
    pub end_at: Option<OffsetDateTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DelegationStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_status: Option<DelegateStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_accepted_terms: Option<bool>,
    /// `Some(None)` clears the timestamp; `None` leaves it untouched.
    #[serde(skip)]
    pub delegate_accepted_at: Option<Option<OffsetDateTime>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grantor_visibility: Option<PartyVisibility>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delegate_visibility: Option<PartyVisibility>,
}

impl DelegationPatch {
    pub fn is_empty(&self) -> bool {
        *self == DelegationPatch::default()
    }

    /// True when the patch touches either status field.
    pub fn changes_status(&self) -> bool {
        self.status.is_some() || self.delegate_status.is_some()
    }

    /// Merge the present fields into `record`. Does not validate.
    pub fn apply_to(&self, record: &mut Delegation) {
        if let Some(ref v) = self.delegate_name {
            record.delegate_name = v.clone();
        }
        if let Some(ref v) = self.delegate_phone {
            record.delegate_phone = v.clone();
        }
        if let Some(v) = self.duration_type {
            record.duration_type = v;
        }
        if let Some(v) = self.start_at {
            record.start_at = v;
        }
        if let Some(v) = self.end_at {
            record.end_at = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.delegate_status {
            record.delegate_status = v;
        }
        if let Some(v) = self.delegate_accepted_terms {
            record.delegate_accepted_terms = v;
        }
        if let Some(v) = self.delegate_accepted_at {
            record.delegate_accepted_at = v;
        }
        if let Some(v) = self.grantor_visibility {
            record.grantor_visibility = v;
        }
        if let Some(v) = self.delegate_visibility {
            record.delegate_visibility = v;
        }
    }
}
