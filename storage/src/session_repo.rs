//! Session repository: load/save of dialogue state keyed by session key.
//!
//! Uses SqlitePoolManager and SessionRow. Save is a full-record upsert: the
//! engine always writes a complete record under its per-key lock, and the
//! reset transition must be able to clear captured fields, so no column-level
//! COALESCE is applied. `created_at` keeps the value from the first insert.

use crate::error::StorageError;
use crate::models::SessionRow;
use crate::sqlite_pool::SqlitePoolManager;
use async_trait::async_trait;
use gbot_core::{BotError, SessionRecord, SessionStore};
use tracing::{debug, info};

#[derive(Clone)]
pub struct SessionRepository {
    pool_manager: SqlitePoolManager,
}

impl SessionRepository {
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        let pool_manager = SqlitePoolManager::new(database_url).await?;
        let repo = Self { pool_manager };
        repo.init().await?;
        Ok(repo)
    }

    async fn init(&self) -> Result<(), StorageError> {
        info!("Creating sessions table if not exists");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS sessions (
                session_key TEXT PRIMARY KEY,
                stage TEXT NOT NULL,
                language TEXT,
                display_name TEXT,
                contact_phone TEXT,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_sessions_created_at ON sessions(created_at)")
            .execute(pool)
            .await?;

        Ok(())
    }

    /// Returns the stored record for the key, or None when the key was never saved.
    pub async fn find(&self, session_key: &str) -> Result<Option<SessionRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let row: Option<SessionRow> =
            sqlx::query_as("SELECT * FROM sessions WHERE session_key = ?")
                .bind(session_key)
                .fetch_optional(pool)
                .await?;

        row.map(SessionRow::into_record).transpose()
    }

    /// Upserts the full record; `created_at` is never overwritten once set.
    pub async fn upsert(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let row = SessionRow::from_record(record);
        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            INSERT INTO sessions (session_key, stage, language, display_name, contact_phone, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(session_key) DO UPDATE SET
                stage = excluded.stage,
                language = excluded.language,
                display_name = excluded.display_name,
                contact_phone = excluded.contact_phone,
                created_at = sessions.created_at
            "#,
        )
        .bind(&row.session_key)
        .bind(&row.stage)
        .bind(&row.language)
        .bind(&row.display_name)
        .bind(&row.contact_phone)
        .bind(row.created_at)
        .execute(pool)
        .await?;

        debug!(
            session_key = %record.session_key,
            stage = %record.stage.as_str(),
            "Session saved"
        );
        Ok(())
    }

    /// Newest-first records, for the CLI lead listing.
    pub async fn recent_sessions(&self, limit: i64) -> Result<Vec<SessionRecord>, StorageError> {
        let pool = self.pool_manager.pool();

        let rows: Vec<SessionRow> =
            sqlx::query_as("SELECT * FROM sessions ORDER BY created_at DESC LIMIT ?")
                .bind(limit)
                .fetch_all(pool)
                .await?;

        info!("Retrieved {} sessions", rows.len());
        rows.into_iter().map(SessionRow::into_record).collect()
    }
}

#[async_trait]
impl SessionStore for SessionRepository {
    async fn load(&self, session_key: &str) -> gbot_core::Result<SessionRecord> {
        match self
            .find(session_key)
            .await
            .map_err(|e| BotError::Storage(e.to_string()))?
        {
            Some(record) => Ok(record),
            None => Ok(SessionRecord::new(session_key)),
        }
    }

    async fn save(&self, record: &SessionRecord) -> gbot_core::Result<()> {
        self.upsert(record)
            .await
            .map_err(|e| BotError::Storage(e.to_string()))
    }
}
