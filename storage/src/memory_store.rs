//! In-memory session store: a process-local map, for tests and ephemeral runs.

use std::collections::HashMap;

use async_trait::async_trait;
use gbot_core::{Result, SessionRecord, SessionStore};
use tokio::sync::RwLock;

/// [`SessionStore`] backed by a process-local map. State is lost on restart.
#[derive(Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, SessionRecord>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sessions currently held.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self, session_key: &str) -> Result<SessionRecord> {
        Ok(self
            .sessions
            .read()
            .await
            .get(session_key)
            .cloned()
            .unwrap_or_else(|| SessionRecord::new(session_key)))
    }

    async fn save(&self, record: &SessionRecord) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(record.session_key.clone(), record.clone());
        Ok(())
    }
}
