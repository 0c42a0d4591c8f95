//! Session store abstraction consumed by the dialogue engine.

use crate::error::Result;
use crate::types::SessionRecord;
use async_trait::async_trait;

/// Keyed store of dialogue state. Implementations map to a persistence
/// backend (SQLite in production, a plain map in tests).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the persisted record for the key, or a freshly-initialized
    /// default record when none exists. Never fails due to absence.
    async fn load(&self, session_key: &str) -> Result<SessionRecord>;

    /// Upserts the full record. An already-captured field must never be
    /// erased by an unrelated update.
    async fn save(&self, record: &SessionRecord) -> Result<()>;
}
