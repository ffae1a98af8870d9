use std::sync::Arc;

use quiz_core::Session;
use quiz_core::model::QuizId;
use tracing::{info, warn};

use crate::catalog_service::QuizCatalogService;
use crate::error::SelectQuizError;

/// Orchestrates quiz selection: the one session transition that reads from storage.
#[derive(Clone)]
pub struct SessionFlowService {
    catalog: Arc<QuizCatalogService>,
}

impl SessionFlowService {
    #[must_use]
    pub fn new(catalog: Arc<QuizCatalogService>) -> Self {
        Self { catalog }
    }

    /// Load the quiz and start playing it.
    ///
    /// On any failure the session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `SelectQuizError::LoadFailure` if the quiz is missing, empty or
    /// the store cannot be read.
    pub async fn select_quiz(
        &self,
        session: &mut Session,
        id: &QuizId,
    ) -> Result<(), SelectQuizError> {
        let questions = match self.catalog.load(id).await {
            Ok(questions) => questions,
            Err(source) => {
                warn!(quiz = %id, error = %source, "quiz could not be loaded");
                return Err(SelectQuizError::LoadFailure {
                    id: id.clone(),
                    source,
                });
            }
        };

        let count = questions.len();
        session.start(questions)?;
        info!(quiz = %id, questions = count, "quiz started");
        Ok(())
    }
}
