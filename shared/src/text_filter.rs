use serde::{Deserialize, Serialize};

/// Translation key the claims mod uses for its "entered claim" title.
pub const ENTERED_CLAIM_KEY: &str = "gui.xaero_pac_title_entered_claim";

/// Lowercase substrings that mark a claim announcement.
pub const CLAIM_PATTERNS: [&str; 6] = [
    "'s claim",
    " claim",
    "claimed territory",
    "claim border",
    "server claim",
    "expired claim",
];

/// Where a UI message is about to be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiChannel {
    Title,
    Subtitle,
    ActionBar,
}

/// A UI message: optional translation key plus its rendered text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiText {
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default)]
    pub literal: String,
}

impl UiText {
    pub fn literal(text: impl Into<String>) -> Self {
        Self {
            key: None,
            literal: text.into(),
        }
    }

    pub fn translatable(key: impl Into<String>, rendered: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            literal: rendered.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.literal.is_empty()
    }
}

/// Suppresses claim announcements before they reach titles, subtitles, or the
/// action bar.
#[derive(Debug, Clone)]
pub struct TextFilter {
    sentinel_keys: Vec<String>,
    patterns: Vec<String>,
}

impl Default for TextFilter {
    fn default() -> Self {
        Self::new([ENTERED_CLAIM_KEY], CLAIM_PATTERNS)
    }
}

impl TextFilter {
    /// Patterns are matched case-insensitively.
    pub fn new<K, P>(
        sentinel_keys: impl IntoIterator<Item = K>,
        patterns: impl IntoIterator<Item = P>,
    ) -> Self
    where
        K: Into<String>,
        P: AsRef<str>,
    {
        Self {
            sentinel_keys: sentinel_keys.into_iter().map(Into::into).collect(),
            patterns: patterns
                .into_iter()
                .map(|p| p.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Empty text is never suppressed. Otherwise a sentinel key or any pattern
    /// in the lowercased text suppresses it.
    pub fn is_suppressed(&self, text: &UiText) -> bool {
        if text.literal.is_empty() {
            return false;
        }
        if let Some(key) = text.key.as_deref()
            && self.sentinel_keys.iter().any(|sentinel| sentinel == key)
        {
            return true;
        }
        let plain = text.literal.to_lowercase();
        self.patterns.iter().any(|pattern| plain.contains(pattern.as_str()))
    }

    /// What the host should display on `channel`: empty text for suppressed
    /// messages, the original otherwise. All channels share one rule set.
    pub fn filter(&self, _channel: UiChannel, text: UiText) -> UiText {
        if self.is_suppressed(&text) {
            UiText::default()
        } else {
            text
        }
    }
}
