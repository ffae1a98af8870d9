use async_trait::async_trait;
use quiz_core::model::{Question, QuizFile, QuizFileHeader, QuizId, sort_newest_first};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::json_dir::JsonDirStore;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("storage slot is held by quiz {0}")]
    Conflict(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

/// Read side of the quiz collection.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// List every discoverable quiz file, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn list_headers(&self) -> Result<Vec<QuizFileHeader>, StorageError>;

    /// Load the full question list for a quiz.
    ///
    /// Returns `Ok(None)` when no quiz has the given id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing store cannot be read.
    async fn load_by_id(&self, id: &QuizId) -> Result<Option<Vec<Question>>, StorageError>;
}

/// Write side used by seeding and imports; the play path never writes.
#[async_trait]
pub trait QuizWriter: Send + Sync {
    /// Insert a quiz file or replace the one with the same id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn save_quiz(&self, quiz: &QuizFile) -> Result<(), StorageError>;
}

/// Simple in-memory store for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryQuestionStore {
    quizzes: Arc<Mutex<HashMap<QuizId, QuizFile>>>,
}

impl InMemoryQuestionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            quizzes: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Build a store pre-populated with the given quizzes.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the store lock is poisoned.
    pub fn with_quizzes(quizzes: impl IntoIterator<Item = QuizFile>) -> Result<Self, StorageError> {
        let store = Self::new();
        {
            let mut guard = store
                .quizzes
                .lock()
                .map_err(|e| StorageError::Connection(e.to_string()))?;
            for quiz in quizzes {
                guard.insert(quiz.id.clone(), quiz);
            }
        }
        Ok(store)
    }
}

#[async_trait]
impl QuestionStore for InMemoryQuestionStore {
    async fn list_headers(&self) -> Result<Vec<QuizFileHeader>, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut headers: Vec<_> = guard.values().map(QuizFile::header).collect();
        sort_newest_first(&mut headers);
        Ok(headers)
    }

    async fn load_by_id(&self, id: &QuizId) -> Result<Option<Vec<Question>>, StorageError> {
        let guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(id).map(|quiz| quiz.questions.clone()))
    }
}

#[async_trait]
impl QuizWriter for InMemoryQuestionStore {
    async fn save_quiz(&self, quiz: &QuizFile) -> Result<(), StorageError> {
        let mut guard = self
            .quizzes
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(quiz.id.clone(), quiz.clone());
        Ok(())
    }
}

/// Aggregates the read and write sides behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quizzes: Arc<dyn QuestionStore>,
    pub writer: Arc<dyn QuizWriter>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let store = InMemoryQuestionStore::new();
        let quizzes: Arc<dyn QuestionStore> = Arc::new(store.clone());
        let writer: Arc<dyn QuizWriter> = Arc::new(store);
        Self { quizzes, writer }
    }

    /// Storage backed by a directory of `*.json` quiz files.
    #[must_use]
    pub fn json_dir(root: impl Into<PathBuf>) -> Self {
        let store = JsonDirStore::new(root);
        let quizzes: Arc<dyn QuestionStore> = Arc::new(store.clone());
        let writer: Arc<dyn QuizWriter> = Arc::new(store);
        Self { quizzes, writer }
    }
}
