//! Session row model for persistence.
//!
//! Maps to the `sessions` table; stage and language are stored as TEXT codes.
//! Kept separate from the core [`SessionRecord`] so the core types stay free
//! of sqlx derives.

use chrono::{DateTime, Utc};
use gbot_core::{Language, SessionRecord, Stage};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct SessionRow {
    pub session_key: String,
    pub stage: String,
    pub language: Option<String>,
    pub display_name: Option<String>,
    pub contact_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SessionRow {
    /// Converts a core record into its row form.
    pub fn from_record(record: &SessionRecord) -> Self {
        Self {
            session_key: record.session_key.clone(),
            stage: record.stage.as_str().to_string(),
            language: record.language.map(|l| l.code().to_string()),
            display_name: record.display_name.clone(),
            contact_phone: record.contact_phone.clone(),
            created_at: record.created_at,
        }
    }

    /// Converts the row back into a core record. An unknown stage or language
    /// code means the row was written by something else entirely; that is a
    /// storage fault, not a dialogue state.
    pub fn into_record(self) -> Result<SessionRecord, StorageError> {
        let stage = Stage::parse(&self.stage)
            .ok_or_else(|| StorageError::Invalid(format!("unknown stage code: {}", self.stage)))?;

        let language = match self.language.as_deref() {
            Some(code) => Some(Language::from_code(code).ok_or_else(|| {
                StorageError::Invalid(format!("unknown language code: {code}"))
            })?),
            None => None,
        };

        Ok(SessionRecord {
            session_key: self.session_key,
            stage,
            language,
            display_name: self.display_name,
            contact_phone: self.contact_phone,
            created_at: self.created_at,
        })
    }
}
