pub mod schema;

use anyhow::{Context as _, Result};
use sqlx::{sqlite::SqliteConnectOptions, ConnectOptions, SqlitePool};
use std::{path::Path, str::FromStr};
use thiserror::Error;
use uuid::Uuid;

use crate::tasks::{Task, TaskDraft};

/// Failure classes of the store.
///
/// `InvalidDocument` is client-caused (the document failed the schema check
/// during the persistence attempt); everything else is a server-side database
/// failure. The REST layer maps the two to different statuses.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("{0}")]
    InvalidDocument(String),
    #[error(transparent)]
    Db(#[from] sqlx::Error),
}

#[derive(Clone)]
pub struct Storage {
    pool: SqlitePool,
}

impl Storage {
    pub async fn new(data_dir: &Path) -> Result<Self> {
        Self::new_with_slow_query(data_dir, 0).await
    }

    /// Create storage with slow-query logging enabled.
    ///
    /// `slow_query_ms` is the threshold in milliseconds — queries exceeding it
    /// are logged at WARN level. Set to 0 to disable slow-query logging.
    pub async fn new_with_slow_query(data_dir: &Path, slow_query_ms: u64) -> Result<Self> {
        tokio::fs::create_dir_all(data_dir).await?;
        let db_path = data_dir.join("taskd.db");
        let mut opts =
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", db_path.display()))?
                .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
                .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
                .create_if_missing(true);

        if slow_query_ms > 0 {
            opts = opts.log_slow_statements(
                log::LevelFilter::Warn,
                std::time::Duration::from_millis(slow_query_ms),
            );
        }

        let pool = SqlitePool::connect_with(opts).await?;
        Self::migrate(&pool).await?;
        Ok(Self { pool })
    }

    async fn migrate(pool: &SqlitePool) -> Result<()> {
        sqlx::migrate!("src/storage/migrations")
            .run(pool)
            .await
            .context("Failed to run database migrations")?;
        Ok(())
    }

    // ─── Tasks ──────────────────────────────────────────────────────────────

    /// Validate the draft against the task schema, then persist it.
    ///
    /// Returns the fully materialized task re-read from the store, so the
    /// caller sees exactly what was written (assigned id included).
    pub async fn create_task(&self, draft: &TaskDraft) -> Result<Task, StorageError> {
        let doc = schema::validate_document(draft)?;

        let id = Uuid::new_v4().to_string();
        let created_at = draft.created_at.to_rfc3339();
        sqlx::query(
            "INSERT INTO tasks (id, title, description, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(&doc.title)
        .bind(&doc.description)
        .bind(&created_at)
        .execute(&self.pool)
        .await?;

        self.get_task(&id)
            .await?
            .ok_or(StorageError::Db(sqlx::Error::RowNotFound))
    }

    pub async fn get_task(&self, id: &str) -> Result<Option<Task>, StorageError> {
        Ok(sqlx::query_as(
            "SELECT id, title, description, created_at FROM tasks WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?)
    }

    /// All tasks, most recently created first. Ties on `created_at` fall back
    /// to insertion order, newest first.
    pub async fn list_tasks(&self) -> Result<Vec<Task>, StorageError> {
        Ok(sqlx::query_as(
            "SELECT id, title, description, created_at FROM tasks
             ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?)
    }

    /// Administrative bulk-clear. Test setup only; no HTTP surface.
    pub async fn clear_tasks(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM tasks").execute(&self.pool).await?;
        Ok(())
    }
}
