//! Core types: language, dialogue stage, session record, reply, and lead.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supported reply languages, in recognition priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fa,
    Ar,
    Ru,
}

impl Language {
    pub const ALL: [Language; 4] = [Language::En, Language::Fa, Language::Ar, Language::Ru];

    /// Two-letter code stored in the database and sent to the notify gateway.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fa => "fa",
            Language::Ar => "ar",
            Language::Ru => "ru",
        }
    }

    /// Native-script label shown as the quick-reply option for this language.
    pub fn label(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Fa => "فارسی",
            Language::Ar => "العربية",
            Language::Ru => "Русский",
        }
    }

    pub fn from_code(code: &str) -> Option<Language> {
        Language::ALL.into_iter().find(|l| l.code() == code)
    }
}

/// Position of a session within the fixed dialogue sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[default]
    AwaitingLanguage,
    AwaitingName,
    AwaitingPhone,
    MainMenu,
}

impl Stage {
    /// Code stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::AwaitingLanguage => "awaiting_language",
            Stage::AwaitingName => "awaiting_name",
            Stage::AwaitingPhone => "awaiting_phone",
            Stage::MainMenu => "main_menu",
        }
    }

    pub fn parse(code: &str) -> Option<Stage> {
        [
            Stage::AwaitingLanguage,
            Stage::AwaitingName,
            Stage::AwaitingPhone,
            Stage::MainMenu,
        ]
        .into_iter()
        .find(|s| s.as_str() == code)
    }
}

/// Per-session dialogue state, keyed by an opaque session key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_key: String,
    pub stage: Stage,
    pub language: Option<Language>,
    pub display_name: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Fresh default record for a key that was never seen before.
    pub fn new(session_key: impl Into<String>) -> Self {
        Self {
            session_key: session_key.into(),
            stage: Stage::AwaitingLanguage,
            language: None,
            display_name: None,
            contact_phone: None,
            created_at: Utc::now(),
        }
    }

    /// Re-enters language selection and clears every captured field.
    /// `created_at` is kept; the record tracks the first contact, not the last reset.
    pub fn reset(&mut self) {
        self.stage = Stage::AwaitingLanguage;
        self.language = None;
        self.display_name = None;
        self.contact_phone = None;
    }
}

/// One outgoing message: localized text plus quick-reply option labels.
/// Text may embed simple HTML markup (`<b>`, `<a href>`); the transport
/// adapter decides how to render both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub text: String,
    pub options: Vec<String>,
}

impl Reply {
    /// Plain reply with no quick-reply options.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    /// Reply carrying quick-reply option labels.
    pub fn with_options(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }
}

/// Captured contact tuple forwarded to the notify side-channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    pub name: String,
    pub phone: String,
    pub language: Language,
}
