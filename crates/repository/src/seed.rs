//! Demonstration records installed when storage holds no collection yet.
//!
//! One record per status, all granted by the default grantor to the default
//! delegate. `del-1004` starts out archived in the delegate's view.

use tafweed_core::{
    DelegateStatus, Delegation, DelegationStatus, DurationType, PartyVisibility, Platform,
};
use time::macros::datetime;
use time::OffsetDateTime;

use crate::identity::{DEFAULT_DELEGATE_ID, DEFAULT_GRANTOR_ID, DEFAULT_GRANTOR_NAME};

struct Seed {
    id: &'static str,
    platform: Platform,
    service_id: &'static str,
    name_ar: &'static str,
    name_en: &'static str,
    digital: bool,
    delegate_name: &'static str,
    delegate_phone: &'static str,
    duration: DurationType,
    window: (OffsetDateTime, OffsetDateTime),
    status: DelegationStatus,
    delegate_status: DelegateStatus,
    accepted_at: Option<OffsetDateTime>,
    archived_for_delegate: bool,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl Seed {
    fn build(self) -> Delegation {
        Delegation {
            id: self.id.to_string(),
            service_id: self.service_id.to_string(),
            service_name_ar: self.name_ar.to_string(),
            service_name_en: self.name_en.to_string(),
            platform: self.platform,
            is_digital_service: self.digital,
            grantor_id: DEFAULT_GRANTOR_ID.to_string(),
            grantor_name: DEFAULT_GRANTOR_NAME.to_string(),
            delegate_id: DEFAULT_DELEGATE_ID.to_string(),
            delegate_name: self.delegate_name.to_string(),
            delegate_phone: self.delegate_phone.to_string(),
            duration_type: self.duration,
            start_at: self.window.0,
            end_at: self.window.1,
            status: self.status,
            delegate_status: self.delegate_status,
            delegate_accepted_terms: self.accepted_at.is_some(),
            delegate_accepted_at: self.accepted_at,
            grantor_visibility: PartyVisibility::default(),
            delegate_visibility: PartyVisibility {
                archived: self.archived_for_delegate,
                deleted: false,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// The seed collection, in stored order.
pub fn seed_delegations() -> Vec<Delegation> {
    vec![
        Seed {
            id: "del-1001",
            platform: Platform::Absher,
            service_id: "drv-license",
            name_ar: "استلام رخصة القيادة",
            name_en: "Driving license pickup",
            digital: true,
            delegate_name: "محمد القحطاني",
            delegate_phone: "0551234567",
            duration: DurationType::Hours24,
            window: (datetime!(2024-06-15 09:00 UTC), datetime!(2024-06-16 09:00 UTC)),
            status: DelegationStatus::Active,
            delegate_status: DelegateStatus::Accepted,
            accepted_at: Some(datetime!(2024-06-15 09:05 UTC)),
            archived_for_delegate: false,
            created_at: datetime!(2024-06-15 08:55 UTC),
            updated_at: datetime!(2024-06-15 09:05 UTC),
        },
        Seed {
            id: "del-1002",
            platform: Platform::Najiz,
            service_id: "court-rep",
            name_ar: "تمثيل في قضية",
            name_en: "Case representation",
            digital: false,
            delegate_name: "ريم التركي",
            delegate_phone: "0559876543",
            duration: DurationType::Days7,
            window: (datetime!(2024-07-01 10:00 UTC), datetime!(2024-07-08 10:00 UTC)),
            status: DelegationStatus::Pending,
            delegate_status: DelegateStatus::Pending,
            accepted_at: None,
            archived_for_delegate: false,
            created_at: datetime!(2024-07-01 09:45 UTC),
            updated_at: datetime!(2024-07-01 09:45 UTC),
        },
        Seed {
            id: "del-1003",
            platform: Platform::Absher,
            service_id: "vehicle-auth",
            name_ar: "تفويض مركبة لمدة 7 أيام",
            name_en: "Vehicle delegation (7 days)",
            digital: true,
            delegate_name: "محمد القحطاني",
            delegate_phone: "0557654321",
            duration: DurationType::Days7,
            window: (datetime!(2024-05-20 12:00 UTC), datetime!(2024-05-27 12:00 UTC)),
            status: DelegationStatus::Completed,
            delegate_status: DelegateStatus::Accepted,
            accepted_at: Some(datetime!(2024-05-20 12:10 UTC)),
            archived_for_delegate: false,
            created_at: datetime!(2024-05-20 11:50 UTC),
            updated_at: datetime!(2024-05-27 12:10 UTC),
        },
        Seed {
            id: "del-1004",
            platform: Platform::Najiz,
            service_id: "notary",
            name_ar: "تفويض توثيق",
            name_en: "Notary delegation",
            digital: false,
            delegate_name: "سارة المطيري",
            delegate_phone: "0552223334",
            duration: DurationType::Custom,
            window: (datetime!(2024-07-10 07:00 UTC), datetime!(2024-07-20 07:00 UTC)),
            status: DelegationStatus::Rejected,
            delegate_status: DelegateStatus::Rejected,
            accepted_at: None,
            archived_for_delegate: true,
            created_at: datetime!(2024-07-10 06:45 UTC),
            updated_at: datetime!(2024-07-12 08:00 UTC),
        },
        Seed {
            id: "del-1005",
            platform: Platform::Absher,
            service_id: "id-renew",
            name_ar: "تفويض تجديد هوية",
            name_en: "ID renewal delegation",
            digital: true,
            delegate_name: "أحمد العسيري",
            delegate_phone: "0553334445",
            duration: DurationType::Hours24,
            window: (datetime!(2024-07-15 08:00 UTC), datetime!(2024-07-16 08:00 UTC)),
            status: DelegationStatus::Expired,
            delegate_status: DelegateStatus::Pending,
            accepted_at: None,
            archived_for_delegate: false,
            created_at: datetime!(2024-07-15 07:45 UTC),
            updated_at: datetime!(2024-07-16 08:05 UTC),
        },
    ]
    .into_iter()
    .map(Seed::build)
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_record_per_status_and_all_valid() {
        let seeds = seed_delegations();
        for status in DelegationStatus::ALL {
            assert_eq!(seeds.iter().filter(|d| d.status == status).count(), 1, "{}", status);
        }
        for d in &seeds {
            d.check_invariants().unwrap();
        }
    }
}
