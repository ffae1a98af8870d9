#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog_service;
pub mod config;
pub mod error;
pub mod publish_service;
pub mod session_flow;

pub use app_services::AppServices;
pub use catalog_service::QuizCatalogService;
pub use config::{QuizConfig, QuizSource};
pub use error::{AppServicesError, ConfigError, PublishError, QuizLoadError, SelectQuizError};
pub use publish_service::{PublishConfig, QuizPublisher};
pub use session_flow::SessionFlowService;
