use std::sync::Arc;

use quiz_core::model::{Question, QuizFileHeader, QuizId, sort_newest_first};
use storage::repository::QuestionStore;
use tracing::{debug, warn};

use crate::error::QuizLoadError;

/// Read access to the quiz collection for the browsing view.
#[derive(Clone)]
pub struct QuizCatalogService {
    store: Arc<dyn QuestionStore>,
}

impl QuizCatalogService {
    #[must_use]
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self { store }
    }

    /// List quiz headers, newest first.
    ///
    /// Discovery failures are logged and reported as an empty list.
    pub async fn list_headers(&self) -> Vec<QuizFileHeader> {
        match self.store.list_headers().await {
            Ok(mut headers) => {
                sort_newest_first(&mut headers);
                debug!(count = headers.len(), "listed quiz headers");
                headers
            }
            Err(err) => {
                warn!(error = %err, "failed to list quiz files");
                Vec::new()
            }
        }
    }

    /// Load the questions of a playable quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizLoadError::NotFound` if no quiz has this id,
    /// `QuizLoadError::Empty` if it has no questions, and
    /// `QuizLoadError::Storage` if the store cannot be read.
    pub async fn load(&self, id: &QuizId) -> Result<Vec<Question>, QuizLoadError> {
        let questions = self
            .store
            .load_by_id(id)
            .await?
            .ok_or_else(|| QuizLoadError::NotFound(id.clone()))?;
        if questions.is_empty() {
            return Err(QuizLoadError::Empty(id.clone()));
        }
        debug!(quiz = %id, count = questions.len(), "loaded quiz");
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use quiz_core::model::{QuestionId, QuizFile};
    use quiz_core::time::from_epoch_millis;
    use storage::repository::{InMemoryQuestionStore, StorageError};

    struct UnreachableStore;

    #[async_trait]
    impl QuestionStore for UnreachableStore {
        async fn list_headers(&self) -> Result<Vec<QuizFileHeader>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }

        async fn load_by_id(&self, _id: &QuizId) -> Result<Option<Vec<Question>>, StorageError> {
            Err(StorageError::Connection("offline".into()))
        }
    }

    fn quiz(id: &str, ms: i64, len: u64) -> QuizFile {
        let questions = (1..=len)
            .map(|n| Question {
                id: QuestionId::new(n),
                prompt: format!("Q{n}"),
                code: None,
                options: vec!["a".into(), "b".into()],
                correct_answer: 0,
                explanation: String::new(),
            })
            .collect();
        QuizFile::new(QuizId::new(id), from_epoch_millis(ms).unwrap(), questions)
    }

    #[tokio::test]
    async fn listing_failure_yields_empty_list() {
        let catalog = QuizCatalogService::new(Arc::new(UnreachableStore));
        assert!(catalog.list_headers().await.is_empty());
    }

    #[tokio::test]
    async fn listing_is_newest_first() {
        let store = InMemoryQuestionStore::with_quizzes([quiz("a", 100, 1), quiz("b", 200, 1)])
            .unwrap();
        let catalog = QuizCatalogService::new(Arc::new(store));

        let ids: Vec<_> = catalog
            .list_headers()
            .await
            .into_iter()
            .map(|h| h.id.to_string())
            .collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn load_distinguishes_missing_and_empty() {
        let store = InMemoryQuestionStore::with_quizzes([quiz("empty", 1, 0)]).unwrap();
        let catalog = QuizCatalogService::new(Arc::new(store));

        assert!(matches!(
            catalog.load(&QuizId::new("missing")).await,
            Err(QuizLoadError::NotFound(_))
        ));
        assert!(matches!(
            catalog.load(&QuizId::new("empty")).await,
            Err(QuizLoadError::Empty(_))
        ));
    }

    #[tokio::test]
    async fn load_surfaces_storage_errors() {
        let catalog = QuizCatalogService::new(Arc::new(UnreachableStore));
        assert!(matches!(
            catalog.load(&QuizId::new("a")).await,
            Err(QuizLoadError::Storage(_))
        ));
    }
}
