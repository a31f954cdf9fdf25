//! Display language and accessibility preferences.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ar,
    En,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Ar => "ar",
            Language::En => "en",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Language::Ar
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::Ar => Language::En,
            Language::En => Language::Ar,
        }
    }
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ar" => Ok(Language::Ar),
            "en" => Ok(Language::En),
            _ => Err(format!("unknown language '{}' (expected ar or en)", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persisted user settings. Missing fields in a stored blob fall back to
/// the defaults, so older or partial snapshots still load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preferences {
    pub language: Language,
    pub large_text: bool,
    pub high_contrast: bool,
    pub big_buttons: bool,
}

/// One of the boolean accessibility switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    LargeText,
    HighContrast,
    BigButtons,
}

impl std::str::FromStr for Toggle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "large-text" | "largeText" => Ok(Toggle::LargeText),
            "high-contrast" | "highContrast" => Ok(Toggle::HighContrast),
            "big-buttons" | "bigButtons" => Ok(Toggle::BigButtons),
            _ => Err(format!(
                "unknown setting '{}' (expected large-text, high-contrast or big-buttons)",
                s
            )),
        }
    }
}

impl Preferences {
    pub fn flag(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::LargeText => self.large_text,
            Toggle::HighContrast => self.high_contrast,
            Toggle::BigButtons => self.big_buttons,
        }
    }

    pub fn set_flag(&mut self, toggle: Toggle, on: bool) {
        match toggle {
            Toggle::LargeText => self.large_text = on,
            Toggle::HighContrast => self.high_contrast = on,
            Toggle::BigButtons => self.big_buttons = on,
        }
    }

    /// Flip a switch and return its new value.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let next = !self.flag(toggle);
        self.set_flag(toggle, next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.language, Language::Ar);
        assert!(!prefs.large_text && !prefs.high_contrast && !prefs.big_buttons);
    }

    #[test]
    fn partial_blob_fills_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"language":"en","bigButtons":true}"#).unwrap();
        assert_eq!(
            prefs,
            Preferences {
                language: Language::En,
                big_buttons: true,
                ..Default::default()
            }
        );
    }

    #[test]
    fn serializes_camel_case() {
        let json = serde_json::to_value(Preferences::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "language": "ar",
                "largeText": false,
                "highContrast": false,
                "bigButtons": false
            })
        );
    }

    #[test]
    fn toggle_flips() {
        let mut prefs = Preferences::default();
        assert!(prefs.toggle(Toggle::HighContrast));
        assert!(prefs.high_contrast);
        assert!(!prefs.toggle(Toggle::HighContrast));
        assert_eq!(Language::Ar.toggled(), Language::En);
        assert_eq!("largeText".parse::<Toggle>(), Ok(Toggle::LargeText));
    }
}
