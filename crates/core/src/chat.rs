//! Chat-assisted delegation drafting.
//!
//! A [`ChatDraft`] is the in-progress form behind the assistant. Each user
//! message is run through the [`IntentDetector`]; only the fields it detected
//! are written into the draft, and a short bilingual acknowledgement is
//! produced for the transcript.

use serde::Serialize;

use crate::catalog::ServiceCatalog;
use crate::delegation::{DurationType, Platform};
use crate::error::ValidationError;
use crate::input::{CreateDelegationInput, DEFAULT_CHAT_PHONE};
use crate::intent::{IntentDetector, IntentDraft};
use crate::preferences::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

/// Starter prompts offered before the user types anything.
pub const SUGGESTIONS: [&str; 3] = [
    "تفويض استلام رخصة القيادة",
    "تفويض خدمة في ناجز",
    "تفويض لمدة 24 ساعة",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatDraft {
    pub service_id: String,
    pub platform: Platform,
    pub duration_type: DurationType,
    pub delegate_name: String,
    pub delegate_id: String,
    pub delegate_phone: String,
}

impl Default for ChatDraft {
    fn default() -> Self {
        Self {
            service_id: "drv-license".to_string(),
            platform: Platform::Absher,
            duration_type: DurationType::Hours24,
            delegate_name: String::new(),
            delegate_id: String::new(),
            delegate_phone: DEFAULT_CHAT_PHONE.to_string(),
        }
    }
}

impl ChatDraft {
    /// Merge detected hints. Undetected fields keep their current value.
    ///
    /// A detected service also pulls in its platform and default duration;
    /// explicitly detected platform and duration are applied afterwards and
    /// win over those.
    pub fn apply(&mut self, hints: &IntentDraft, catalog: &ServiceCatalog) {
        if let Some(ref service_id) = hints.service_id {
            self.service_id = service_id.clone();
            if let Some(service) = catalog.find(service_id) {
                self.platform = service.platform;
                if let Some(d) = service.default_duration {
                    self.duration_type = d;
                }
            }
        }
        if let Some(p) = hints.platform {
            self.platform = p;
        }
        if let Some(d) = hints.duration_type {
            self.duration_type = d;
        }
    }

    pub fn set_delegate(&mut self, name: impl Into<String>, id: impl Into<String>) {
        self.delegate_name = name.into();
        self.delegate_id = id.into();
    }

    pub fn needs_delegate(&self) -> bool {
        self.delegate_name.trim().is_empty() || self.delegate_id.trim().is_empty()
    }

    /// Turn the draft into a creation request.
    ///
    /// The platform stored on the delegation always comes from the catalog
    /// entry, even if the conversation mentioned another platform.
    pub fn to_input(&self, catalog: &ServiceCatalog) -> Result<CreateDelegationInput, ValidationError> {
        let service = catalog
            .find(&self.service_id)
            .ok_or_else(|| ValidationError::UnknownService {
                service_id: self.service_id.clone(),
            })?;
        if self.delegate_name.trim().is_empty() {
            return Err(ValidationError::MissingField {
                field: "delegateName",
            });
        }
        if self.delegate_id.trim().is_empty() {
            return Err(ValidationError::MissingField { field: "delegateId" });
        }
        let phone = if self.delegate_phone.trim().is_empty() {
            DEFAULT_CHAT_PHONE
        } else {
            self.delegate_phone.trim()
        };
        Ok(CreateDelegationInput::for_service(
            service,
            self.delegate_id.trim(),
            self.delegate_name.trim(),
            phone,
            self.duration_type,
        ))
    }
}

/// One assistant session: transcript plus draft.
#[derive(Debug, Clone)]
pub struct ChatSession<'a> {
    catalog: &'a ServiceCatalog,
    language: Language,
    draft: ChatDraft,
    messages: Vec<ChatMessage>,
}

impl<'a> ChatSession<'a> {
    pub fn new(catalog: &'a ServiceCatalog, language: Language) -> Self {
        Self {
            catalog,
            language,
            draft: ChatDraft::default(),
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                text: intro(language).to_string(),
            }],
        }
    }

    pub fn draft(&self) -> &ChatDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut ChatDraft {
        &mut self.draft
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Handle one user message. Blank input is ignored and returns `None`;
    /// otherwise the assistant reply is returned and appended.
    pub fn send(&mut self, text: &str) -> Option<&ChatMessage> {
        let value = text.trim();
        if value.is_empty() {
            return None;
        }
        self.messages.push(ChatMessage {
            role: ChatRole::User,
            text: value.to_string(),
        });

        let hints = IntentDetector::new(self.catalog).detect(value);
        self.draft.apply(&hints, self.catalog);
        let reply = self.reply_for(&hints);
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text: reply,
        });
        self.messages.last()
    }

    /// Record that the delegation was created from this draft.
    pub fn confirm_created(&mut self) {
        let text = match self.language {
            Language::Ar => "تم إنشاء التفويض وإرساله للمفوَّض.",
            Language::En => "Delegation created and sent to the delegate.",
        };
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            text: text.to_string(),
        });
    }

    /// Start over with an empty draft and only the greeting.
    pub fn reset(&mut self) {
        *self = ChatSession::new(self.catalog, self.language);
    }

    fn reply_for(&self, hints: &IntentDraft) -> String {
        let lang = self.language;
        let mut parts = vec![match lang {
            Language::Ar => "فهمت الطلب.".to_string(),
            Language::En => "Noted your request.".to_string(),
        }];

        if let Some(service) = hints.service_id.as_deref().and_then(|id| self.catalog.find(id)) {
            let platform = service.platform.label(lang);
            parts.push(match lang {
                Language::Ar => format!("خدمة {} في {}.", service.name_ar, platform),
                Language::En => format!("{} on {}.", service.name_en, platform),
            });
        }
        if let Some(d) = hints.duration_type {
            parts.push(match lang {
                Language::Ar => format!("المدة: {}.", d.label(lang)),
                Language::En => format!("Duration set to {}.", d.label(lang)),
            });
        }
        parts.push(
            match (lang, self.draft.needs_delegate()) {
                (Language::Ar, true) => "زوّدني باسم وهوية المفوَّض",
                (Language::En, true) => "Share delegate name and ID/phone",
                (Language::Ar, false) => "جاهز لإنشاء التفويض.",
                (Language::En, false) => "Ready to create the delegation.",
            }
            .to_string(),
        );
        parts.join(" ")
    }
}

fn intro(language: Language) -> &'static str {
    match language {
        Language::Ar => "أهلاً! أخبرني عن خدمة التفويض المطلوبة وسأجهّزها لك.",
        Language::En => "Hi! Tell me which delegation you need and I will draft it for you.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_only_overwrites_detected_fields() {
        let catalog = ServiceCatalog::builtin();
        let mut draft = ChatDraft {
            duration_type: DurationType::Custom,
            ..Default::default()
        };
        draft.apply(
            &IntentDraft {
                platform: Some(Platform::Najiz),
                ..Default::default()
            },
            &catalog,
        );
        assert_eq!(draft.service_id, "drv-license");
        assert_eq!(draft.platform, Platform::Najiz);
        assert_eq!(draft.duration_type, DurationType::Custom);
    }

    #[test]
    fn detected_service_syncs_platform_and_default_duration() {
        let catalog = ServiceCatalog::builtin();
        let mut draft = ChatDraft::default();
        draft.apply(
            &IntentDraft {
                service_id: Some("absherbiz-auth".to_string()),
                ..Default::default()
            },
            &catalog,
        );
        assert_eq!(draft.platform, Platform::AbsherBusiness);
        assert_eq!(draft.duration_type, DurationType::Days7);
    }

    #[test]
    fn session_asks_for_delegate_until_known() {
        let catalog = ServiceCatalog::builtin();
        let mut session = ChatSession::new(&catalog, Language::En);
        let reply = session.send("24 hour driving license pickup").unwrap().text.clone();
        assert!(reply.starts_with("Noted your request."));
        assert!(reply.contains("Driving license pickup on Absher."));
        assert!(reply.contains("Duration set to 24 hours."));
        assert!(reply.ends_with("Share delegate name and ID/phone"));

        session.draft_mut().set_delegate("Reem", "1098765432");
        let reply = session.send("for a week").unwrap().text.clone();
        assert!(reply.ends_with("Ready to create the delegation."));
        assert_eq!(session.draft().duration_type, DurationType::Days7);
        assert_eq!(session.messages().len(), 5);
    }

    #[test]
    fn blank_message_ignored() {
        let catalog = ServiceCatalog::builtin();
        let mut session = ChatSession::new(&catalog, Language::Ar);
        assert!(session.send("   ").is_none());
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn arabic_reply_mentions_platform() {
        let catalog = ServiceCatalog::builtin();
        let mut session = ChatSession::new(&catalog, Language::Ar);
        let reply = session.send("تفويض خدمة في ناجز").unwrap();
        assert!(reply.text.contains("تسليم مستندات"));
        assert!(reply.text.contains("ناجز"));
    }

    #[test]
    fn to_input_requires_delegate_identity() {
        let catalog = ServiceCatalog::builtin();
        let mut draft = ChatDraft::default();
        assert_eq!(
            draft.to_input(&catalog),
            Err(ValidationError::MissingField {
                field: "delegateName"
            })
        );
        draft.set_delegate("Reem", "1098765432");
        let input = draft.to_input(&catalog).unwrap();
        assert_eq!(input.service_id, "drv-license");
        assert_eq!(input.delegate_phone, DEFAULT_CHAT_PHONE);
        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn reset_restores_greeting() {
        let catalog = ServiceCatalog::builtin();
        let mut session = ChatSession::new(&catalog, Language::En);
        session.send("passport");
        session.confirm_created();
        session.reset();
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.draft(), &ChatDraft::default());
    }
}
