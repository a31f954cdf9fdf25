//! Creation request descriptor and its validation.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::catalog::ServiceOption;
use crate::delegation::{DurationType, Platform};
use crate::error::ValidationError;

/// Phone used by the chat assistant when the user never typed one.
pub const DEFAULT_CHAT_PHONE: &str = "0550000000";

/// Everything the grantor supplies when creating a delegation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDelegationInput {
    pub service_id: String,
    pub service_name_ar: String,
    pub service_name_en: String,
    pub platform: Platform,
    pub is_digital_service: bool,
    pub delegate_id: String,
    pub delegate_name: String,
    pub delegate_phone: String,
    pub duration_type: DurationType,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
    pub start_at: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "time::serde::rfc3339::option")]
    pub end_at: Option<OffsetDateTime>,
}

impl CreateDelegationInput {
    /// Build an input that copies service reference data from the catalog.
    pub fn for_service(
        service: &ServiceOption,
        delegate_id: impl Into<String>,
        delegate_name: impl Into<String>,
        delegate_phone: impl Into<String>,
        duration_type: DurationType,
    ) -> Self {
        Self {
            service_id: service.id.clone(),
            service_name_ar: service.name_ar.clone(),
            service_name_en: service.name_en.clone(),
            platform: service.platform,
            is_digital_service: service.is_digital,
            delegate_id: delegate_id.into(),
            delegate_name: delegate_name.into(),
            delegate_phone: delegate_phone.into(),
            duration_type,
            start_at: None,
            end_at: None,
        }
    }

    pub fn with_window(mut self, start_at: Option<OffsetDateTime>, end_at: Option<OffsetDateTime>) -> Self {
        self.start_at = start_at;
        self.end_at = end_at;
        self
    }

    /// Check the delegate identity and service reference.
    ///
    /// The authorization window is checked separately by
    /// [`resolve_end`](crate::duration::resolve_end) once "now" is known.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("serviceId", &self.service_id)?;
        require("serviceNameAr", &self.service_name_ar)?;
        require("serviceNameEn", &self.service_name_en)?;
        require("delegateName", &self.delegate_name)?;
        require("delegateId", &self.delegate_id)?;
        require("delegatePhone", &self.delegate_phone)?;

        let id_len = self.delegate_id.trim().chars().count();
        if id_len != 10 {
            return Err(ValidationError::InvalidDelegateId { length: id_len });
        }
        if !is_valid_phone(self.delegate_phone.trim()) {
            return Err(ValidationError::InvalidPhone {
                phone: self.delegate_phone.clone(),
            });
        }
        Ok(())
    }
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::MissingField { field })
    } else {
        Ok(())
    }
}

/// Saudi mobile format: `05` followed by eight digits.
pub fn is_valid_phone(phone: &str) -> bool {
    phone.len() == 10 && phone.starts_with("05") && phone.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ServiceCatalog;

    fn valid() -> CreateDelegationInput {
        let catalog = ServiceCatalog::builtin();
        CreateDelegationInput::for_service(
            catalog.find("drv-license").unwrap(),
            "1098765432",
            "محمد القحطاني",
            "0551234567",
            DurationType::Hours24,
        )
    }

    #[test]
    fn valid_input_passes() {
        assert_eq!(valid().validate(), Ok(()));
    }

    #[test]
    fn for_service_copies_reference_data() {
        let input = valid();
        assert_eq!(input.platform, Platform::Absher);
        assert_eq!(input.service_name_en, "Driving license pickup");
        assert!(input.is_digital_service);
    }

    #[test]
    fn phone_format() {
        assert!(is_valid_phone("0551234567"));
        assert!(is_valid_phone(DEFAULT_CHAT_PHONE));
        assert!(!is_valid_phone("0651234567"));
        assert!(!is_valid_phone("055123456"));
        assert!(!is_valid_phone("05512345678"));
        assert!(!is_valid_phone("05512345a7"));
        assert!(!is_valid_phone("٠٥٥١٢٣٤٥٦٧"));
    }

    #[test]
    fn malformed_phone_rejected() {
        let mut input = valid();
        input.delegate_phone = "123".to_string();
        assert!(matches!(input.validate(), Err(ValidationError::InvalidPhone { .. })));
    }

    #[test]
    fn short_delegate_id_rejected() {
        let mut input = valid();
        input.delegate_id = "12345".to_string();
        assert_eq!(
            input.validate(),
            Err(ValidationError::InvalidDelegateId { length: 5 })
        );
    }

    #[test]
    fn blank_name_rejected() {
        let mut input = valid();
        input.delegate_name = "   ".to_string();
        assert_eq!(
            input.validate(),
            Err(ValidationError::MissingField {
                field: "delegateName"
            })
        );
    }
}
