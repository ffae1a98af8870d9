use std::sync::Arc;

use quiz_core::PassPolicy;
use services::{QuizCatalogService, SessionFlowService};

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<QuizCatalogService>;
    fn session_flow(&self) -> Arc<SessionFlowService>;
    fn pass_policy(&self) -> PassPolicy;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<QuizCatalogService>,
    session_flow: Arc<SessionFlowService>,
    pass_policy: PassPolicy,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            session_flow: app.session_flow(),
            pass_policy: app.pass_policy(),
        }
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
    pub fn pass_policy(&self) -> PassPolicy {
        self.pass_policy
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
