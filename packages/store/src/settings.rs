//! # Per-user preferences at `users/{username}/settings`
//!
//! Stored as JSON next to the user's profile:
//!
//! ```json
//! {
//!   "theme": "system",
//!   "language": "english",
//!   "fontSize": "medium",
//!   "lineNumbers": true,
//!   "autoSave": true,
//!   "notifications": true,
//!   "emailNotifications": true,
//!   "privacy": { "shareData": false, "publicProfile": true }
//! }
//! ```
//!
//! Every field carries a serde default so a missing or partial node reads back as
//! [`UserSettings::default`].

use serde::{Deserialize, Serialize};

/// Colour scheme of the app.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "light" => Theme::Light,
            "dark" => Theme::Dark,
            _ => Theme::System,
        }
    }
}

/// Editor font size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    Small,
    #[default]
    Medium,
    Large,
}

impl FontSize {
    pub fn as_str(self) -> &'static str {
        match self {
            FontSize::Small => "small",
            FontSize::Medium => "medium",
            FontSize::Large => "large",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "small" => FontSize::Small,
            "large" => FontSize::Large,
            _ => FontSize::Medium,
        }
    }

    /// CSS pixel size used by the editor.
    pub fn px(self) -> u32 {
        match self {
            FontSize::Small => 12,
            FontSize::Medium => 14,
            FontSize::Large => 16,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrivacySettings {
    #[serde(default)]
    pub share_data: bool,
    #[serde(default = "default_true")]
    pub public_profile: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            share_data: false,
            public_profile: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub font_size: FontSize,
    #[serde(default = "default_true")]
    pub line_numbers: bool,
    #[serde(default = "default_true")]
    pub auto_save: bool,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub email_notifications: bool,
    #[serde(default)]
    pub privacy: PrivacySettings,
}

fn default_true() -> bool {
    true
}

fn default_language() -> String {
    "english".to_string()
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            language: default_language(),
            font_size: FontSize::default(),
            line_numbers: true,
            auto_save: true,
            notifications: true,
            email_notifications: true,
            privacy: PrivacySettings::default(),
        }
    }
}

impl UserSettings {
    /// Languages offered on the settings page.
    pub const LANGUAGES: [(&'static str, &'static str); 3] = [
        ("english", "English"),
        ("spanish", "Spanish"),
        ("french", "French"),
    ];

    /// Seconds of inactivity before the editor auto-saves; `None` when disabled.
    pub fn auto_save_delay_secs(&self) -> Option<u32> {
        self.auto_save.then_some(5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_node_reads_as_defaults() {
        let settings: UserSettings = serde_json::from_value(json!({})).unwrap();
        assert_eq!(settings, UserSettings::default());
        assert_eq!(settings.theme, Theme::System);
        assert!(settings.privacy.public_profile);
        assert!(!settings.privacy.share_data);
    }

    #[test]
    fn test_partial_node() {
        let settings: UserSettings = serde_json::from_value(json!({
            "theme": "dark",
            "fontSize": "large",
            "privacy": { "shareData": true }
        }))
        .unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.font_size.px(), 16);
        assert!(settings.privacy.share_data);
        assert!(settings.privacy.public_profile);
        assert!(settings.line_numbers);
    }

    #[test]
    fn test_camel_case_keys() {
        let value = serde_json::to_value(UserSettings::default()).unwrap();
        assert_eq!(value["emailNotifications"], true);
        assert_eq!(value["fontSize"], "medium");
        assert_eq!(value["privacy"]["publicProfile"], true);
    }

    #[test]
    fn test_auto_save_delay() {
        let mut settings = UserSettings::default();
        assert_eq!(settings.auto_save_delay_secs(), Some(5));
        settings.auto_save = false;
        assert_eq!(settings.auto_save_delay_secs(), None);
    }

    #[test]
    fn test_parse_helpers() {
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("bogus"), Theme::System);
        assert_eq!(FontSize::parse("small").as_str(), "small");
    }
}
