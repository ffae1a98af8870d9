use std::sync::Arc;

use quiz_core::PassPolicy;
use storage::repository::Storage;

use crate::catalog_service::QuizCatalogService;
use crate::config::{QuizConfig, QuizSource};
use crate::error::AppServicesError;
use crate::publish_service::QuizPublisher;
use crate::session_flow::SessionFlowService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    pass_policy: PassPolicy,
    catalog: Arc<QuizCatalogService>,
    session_flow: Arc<SessionFlowService>,
    publisher: Arc<QuizPublisher>,
}

impl AppServices {
    /// Build services over an already opened storage backend.
    #[must_use]
    pub fn new(storage: &Storage, pass_policy: PassPolicy, publisher: QuizPublisher) -> Self {
        let catalog = Arc::new(QuizCatalogService::new(Arc::clone(&storage.quizzes)));
        let session_flow = Arc::new(SessionFlowService::new(Arc::clone(&catalog)));

        Self {
            pass_policy,
            catalog,
            session_flow,
            publisher: Arc::new(publisher),
        }
    }

    /// Open the configured backend and build services over it.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if the `SQLite` backend cannot be opened.
    pub async fn from_config(config: &QuizConfig) -> Result<Self, AppServicesError> {
        let storage = match &config.source {
            QuizSource::JsonDir(dir) => Storage::json_dir(dir.clone()),
            QuizSource::Sqlite(url) => Storage::sqlite(url).await?,
        };
        let publisher = QuizPublisher::new(config.publish.clone());
        Ok(Self::new(&storage, config.pass_policy, publisher))
    }

    #[must_use]
    pub fn pass_policy(&self) -> PassPolicy {
        self.pass_policy
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuizCatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn session_flow(&self) -> Arc<SessionFlowService> {
        Arc::clone(&self.session_flow)
    }

    #[must_use]
    pub fn publisher(&self) -> Arc<QuizPublisher> {
        Arc::clone(&self.publisher)
    }
}
