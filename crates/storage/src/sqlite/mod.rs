use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;
use tracing::debug;

use crate::repository::{QuestionStore, QuizWriter, Storage};

mod mapping;
mod migrate;
mod quiz_repo;

/// Quiz files kept in the `quizzes` and `questions` tables of one database.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Open the quiz database at `database_url` with its schema up to date.
    ///
    /// Questions reference their quiz row, so every connection enforces
    /// foreign keys.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the URL is malformed, the database cannot
    /// be opened, or the quiz tables cannot be created.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        let repo = Self { pool };
        repo.ensure_schema().await?;
        debug!(url = database_url, "opened quiz database");
        Ok(repo)
    }

    /// Apply any quiz-table migrations not yet recorded. Safe to repeat.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if a migration query fails.
    pub async fn ensure_schema(&self) -> Result<(), SqliteInitError> {
        migrate::run_migrations(&self.pool).await
    }
}

impl Storage {
    /// Build a `Storage` whose reads and writes share one quiz database.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the database cannot be opened.
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::open(database_url).await?;
        let quizzes: Arc<dyn QuestionStore> = Arc::new(repo.clone());
        let writer: Arc<dyn QuizWriter> = Arc::new(repo);
        Ok(Self { quizzes, writer })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repository_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SqliteRepository>();
    }

    #[tokio::test]
    async fn open_fails_when_the_database_directory_is_missing() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!(
            "sqlite:{}?mode=rwc",
            dir.path().join("missing/quizzes.sqlite3").display()
        );
        let result = SqliteRepository::open(&url).await;
        assert!(matches!(result, Err(SqliteInitError::Sqlx(_))));
    }
}
