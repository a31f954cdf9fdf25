//! Keyword intent detection for the chat assistant.
//!
//! The detector runs a fixed list of independent rules over the normalized
//! utterance. Each rule reports what it found without looking at the other
//! rules; [`resolve`] then picks each field from the first rule, in that
//! field's precedence list, that produced a value:
//!
//! | field          | precedence (highest first)                         |
//! |----------------|----------------------------------------------------|
//! | `serviceId`    | catalog name, service keyword                      |
//! | `platform`     | platform keyword, catalog name, service keyword    |
//! | `durationType` | duration keyword, catalog default                  |
//!
//! Service keywords therefore only supply a service when no catalog name
//! matched, and explicit platform or duration words always override what
//! the catalog implies.

use serde::Serialize;

use crate::catalog::ServiceCatalog;
use crate::delegation::{DurationType, Platform};

/// Partial delegation draft extracted from one utterance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_type: Option<DurationType>,
}

impl IntentDraft {
    pub fn is_empty(&self) -> bool {
        self.service_id.is_none() && self.platform.is_none() && self.duration_type.is_none()
    }
}

/// Utterance prepared for matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText {
    folded: String,
    has_arabic: bool,
}

impl NormalizedText {
    pub fn new(text: &str) -> Self {
        Self {
            folded: text.trim().to_lowercase(),
            has_arabic: text.chars().any(is_arabic),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.folded
    }

    /// Arabic input is matched against Arabic service names, everything
    /// else against English ones.
    pub fn has_arabic(&self) -> bool {
        self.has_arabic
    }

    fn contains_any(&self, needles: &[&str]) -> bool {
        needles.iter().any(|n| self.folded.contains(n))
    }
}

fn is_arabic(c: char) -> bool {
    ('\u{0600}'..='\u{06FF}').contains(&c)
}

// ──────────────────────────────────────────────
// Rules
// ──────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum IntentRule {
    /// A catalog service name occurs in the text.
    CatalogName,
    /// A platform is named outright.
    PlatformKeyword,
    /// A word that implies a default service, e.g. "license" or "passport".
    ServiceKeyword,
    /// A window length is mentioned: 24/hour, 7/week, or custom.
    DurationKeyword,
}

impl IntentRule {
    pub const ALL: [IntentRule; 4] = [
        IntentRule::CatalogName,
        IntentRule::PlatformKeyword,
        IntentRule::ServiceKeyword,
        IntentRule::DurationKeyword,
    ];

    /// Evaluate this rule in isolation.
    pub fn evaluate(self, text: &NormalizedText, catalog: &ServiceCatalog) -> IntentDraft {
        match self {
            IntentRule::CatalogName => catalog_name(text, catalog),
            IntentRule::PlatformKeyword => IntentDraft {
                platform: PLATFORM_KEYWORDS
                    .iter()
                    .find(|(_, words)| text.contains_any(words))
                    .map(|(platform, _)| *platform),
                ..Default::default()
            },
            IntentRule::ServiceKeyword => SERVICE_KEYWORDS
                .iter()
                .find(|(_, _, words)| text.contains_any(words))
                .map(|(service_id, platform, _)| IntentDraft {
                    service_id: Some(service_id.to_string()),
                    platform: Some(*platform),
                    duration_type: None,
                })
                .unwrap_or_default(),
            IntentRule::DurationKeyword => IntentDraft {
                // Later entries win, so "24 ... 7" reads as a week.
                duration_type: DURATION_KEYWORDS
                    .iter()
                    .filter(|(_, words)| text.contains_any(words))
                    .map(|(duration, _)| *duration)
                    .last(),
                ..Default::default()
            },
        }
    }
}

/// Checked most specific first: "absher business" must not read as "absher".
const PLATFORM_KEYWORDS: &[(Platform, &[&str])] = &[
    (
        Platform::AbsherBusiness,
        &["أبشر أعمال", "ابشر اعمال", "ابشر أعمال", "absher business", "absherbusiness"],
    ),
    (Platform::Najiz, &["ناجز", "najiz"]),
    (Platform::Absher, &["أبشر", "ابشر", "absher"]),
];

const SERVICE_KEYWORDS: &[(&str, Platform, &[&str])] = &[
    ("drv-license", Platform::Absher, &["رخصة", "license", "licence"]),
    ("passport-delivery", Platform::Absher, &["جواز", "passport"]),
    ("document-drop", Platform::Najiz, &["ناجز", "najiz"]),
];

const DURATION_KEYWORDS: &[(DurationType, &[&str])] = &[
    (DurationType::Hours24, &["24", "٢٤", "ساعة", "hour"]),
    (DurationType::Days7, &["7", "٧", "أسبوع", "اسبوع", "week"]),
    (DurationType::Custom, &["مخصص", "custom"]),
];

fn catalog_name(text: &NormalizedText, catalog: &ServiceCatalog) -> IntentDraft {
    let hit = catalog.services().iter().find(|s| {
        if text.has_arabic() {
            text.as_str().contains(s.name_ar.as_str())
        } else {
            text.as_str().contains(&s.name_en.to_lowercase())
        }
    });
    match hit {
        Some(s) => IntentDraft {
            service_id: Some(s.id.clone()),
            platform: Some(s.platform),
            duration_type: s.default_duration,
        },
        None => IntentDraft::default(),
    }
}

// ──────────────────────────────────────────────
// Resolution
// ──────────────────────────────────────────────

pub const SERVICE_PRECEDENCE: [IntentRule; 2] = [IntentRule::CatalogName, IntentRule::ServiceKeyword];
pub const PLATFORM_PRECEDENCE: [IntentRule; 3] = [
    IntentRule::PlatformKeyword,
    IntentRule::CatalogName,
    IntentRule::ServiceKeyword,
];
pub const DURATION_PRECEDENCE: [IntentRule; 2] = [IntentRule::DurationKeyword, IntentRule::CatalogName];

/// What a single rule produced for an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleMatch {
    pub rule: IntentRule,
    pub hint: IntentDraft,
}

/// Combine rule outputs field by field using the precedence lists.
pub fn resolve(matches: &[RuleMatch]) -> IntentDraft {
    fn pick<T: Clone>(
        matches: &[RuleMatch],
        order: &[IntentRule],
        field: impl Fn(&IntentDraft) -> Option<T>,
    ) -> Option<T> {
        order.iter().find_map(|rule| {
            matches
                .iter()
                .filter(|m| m.rule == *rule)
                .find_map(|m| field(&m.hint))
        })
    }

    IntentDraft {
        service_id: pick(matches, &SERVICE_PRECEDENCE, |h| h.service_id.clone()),
        platform: pick(matches, &PLATFORM_PRECEDENCE, |h| h.platform),
        duration_type: pick(matches, &DURATION_PRECEDENCE, |h| h.duration_type),
    }
}

/// Maps free text to a partial delegation draft. Pure and deterministic.
#[derive(Debug, Clone, Copy)]
pub struct IntentDetector<'a> {
    catalog: &'a ServiceCatalog,
}

impl<'a> IntentDetector<'a> {
    pub fn new(catalog: &'a ServiceCatalog) -> Self {
        Self { catalog }
    }

    /// Run every rule and report the non-empty results in rule order.
    pub fn explain(&self, text: &str) -> Vec<RuleMatch> {
        let normalized = NormalizedText::new(text);
        IntentRule::ALL
            .into_iter()
            .map(|rule| RuleMatch {
                rule,
                hint: rule.evaluate(&normalized, self.catalog),
            })
            .filter(|m| !m.hint.is_empty())
            .collect()
    }

    pub fn detect(&self, text: &str) -> IntentDraft {
        resolve(&self.explain(text))
    }
}
