//! Shared builders for unit tests.

use time::macros::datetime;

use crate::delegation::{
    DelegateStatus, Delegation, DelegationStatus, DurationType, PartyVisibility, Platform,
};

/// A pending 24h driving-license delegation starting 2024-06-15 09:00 UTC.
pub(crate) fn sample() -> Delegation {
    Delegation {
        id: "del-1".to_string(),
        service_id: "drv-license".to_string(),
        service_name_ar: "استلام رخصة القيادة".to_string(),
        service_name_en: "Driving license pickup".to_string(),
        platform: Platform::Absher,
        is_digital_service: true,
        grantor_id: "user-grantor-1".to_string(),
        grantor_name: "سعود العتيبي".to_string(),
        delegate_id: "1234567890".to_string(),
        delegate_name: "محمد القحطاني".to_string(),
        delegate_phone: "0551234567".to_string(),
        duration_type: DurationType::Hours24,
        start_at: datetime!(2024-06-15 09:00 UTC),
        end_at: datetime!(2024-06-16 09:00 UTC),
        status: DelegationStatus::Pending,
        delegate_status: DelegateStatus::Pending,
        delegate_accepted_terms: false,
        delegate_accepted_at: None,
        grantor_visibility: PartyVisibility::default(),
        delegate_visibility: PartyVisibility::default(),
        created_at: datetime!(2024-06-15 08:55 UTC),
        updated_at: datetime!(2024-06-15 08:55 UTC),
    }
}

/// `sample()` with a different id and status pair.
pub(crate) fn with_status(
    id: &str,
    status: DelegationStatus,
    delegate_status: DelegateStatus,
) -> Delegation {
    let mut d = sample();
    d.id = id.to_string();
    d.status = status;
    d.delegate_status = delegate_status;
    if delegate_status == DelegateStatus::Accepted {
        d.delegate_accepted_terms = true;
        d.delegate_accepted_at = Some(datetime!(2024-06-15 09:05 UTC));
    }
    d
}
