//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionError;
use quiz_core::model::{QuestionError, QuizId};
use quiz_core::scoring::ScoringError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `QuizCatalogService::load`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizLoadError {
    #[error("quiz {0} was not found")]
    NotFound(QuizId),
    #[error("quiz {0} has no questions")]
    Empty(QuizId),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `SessionFlowService::select_quiz`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SelectQuizError {
    #[error("could not load quiz {id}")]
    LoadFailure {
        id: QuizId,
        #[source]
        source: QuizLoadError,
    },
    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Errors emitted by `QuizPublisher`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PublishError {
    #[error("quiz publishing is not configured")]
    Disabled,
    #[error("refusing to publish an empty question list")]
    EmptyQuiz,
    #[error(transparent)]
    InvalidQuestion(#[from] QuestionError),
    #[error("publish request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error("publish response did not contain a quiz id")]
    MissingId,
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("invalid {key} value: {raw:?}")]
    InvalidValue { key: &'static str, raw: String },
    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
