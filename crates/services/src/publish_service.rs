use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use quiz_core::model::{Question, QuizId};

use crate::error::PublishError;

/// Where freshly generated quizzes are sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishConfig {
    pub base_url: String,
}

impl PublishConfig {
    /// Build a config from a raw base URL; blank values disable publishing.
    #[must_use]
    pub fn from_base_url(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }
}

/// Best-effort write path to an external quiz service.
///
/// Independent of the store the app reads from; a published quiz only shows
/// up in the catalog if that service also feeds the store.
#[derive(Clone)]
pub struct QuizPublisher {
    client: Client,
    config: Option<PublishConfig>,
}

impl QuizPublisher {
    #[must_use]
    pub fn new(config: Option<PublishConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn disabled() -> Self {
        Self::new(None)
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Send a question list to the quiz service and return the id it assigned.
    ///
    /// There is no retry; failures are returned to the caller.
    ///
    /// # Errors
    ///
    /// Returns `PublishError` when the publisher is disabled, the questions are
    /// invalid, the request fails, or the response carries no id.
    pub async fn publish(&self, questions: &[Question]) -> Result<QuizId, PublishError> {
        let config = self.config.as_ref().ok_or(PublishError::Disabled)?;
        if questions.is_empty() {
            return Err(PublishError::EmptyQuiz);
        }
        for question in questions {
            question.validate()?;
        }

        let url = format!("{}/quizzes", config.base_url);
        let payload = PublishRequest { questions };

        let response = self.client.post(url).json(&payload).send().await?;

        if !response.status().is_success() {
            warn!(status = %response.status(), "quiz service rejected publish request");
            return Err(PublishError::HttpStatus(response.status()));
        }

        let body: PublishResponse = response.json().await?;
        let id = body.id.and_then(assigned_id).ok_or(PublishError::MissingId)?;

        info!(quiz = %id, questions = questions.len(), "published quiz");
        Ok(id)
    }
}

#[derive(Debug, Serialize)]
struct PublishRequest<'a> {
    questions: &'a [Question],
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    #[serde(default)]
    id: Option<Value>,
}

/// The service may assign string or numeric ids; both become a `QuizId`.
fn assigned_id(raw: Value) -> Option<QuizId> {
    match raw {
        Value::String(id) if !id.trim().is_empty() => Some(QuizId::new(id)),
        Value::Number(id) => Some(QuizId::new(id.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;

    #[test]
    fn blank_base_url_disables_publishing() {
        assert_eq!(PublishConfig::from_base_url("   "), None);
        assert_eq!(
            PublishConfig::from_base_url("http://localhost:3001/api/").unwrap().base_url,
            "http://localhost:3001/api"
        );
    }

    #[test]
    fn request_body_uses_quiz_file_field_names() {
        let questions = [Question {
            id: QuestionId::new(1),
            prompt: "Q".into(),
            code: None,
            options: vec!["a".into(), "b".into()],
            correct_answer: 1,
            explanation: "e".into(),
        }];
        let body = serde_json::to_value(PublishRequest {
            questions: &questions,
        })
        .unwrap();
        assert_eq!(body["questions"][0]["question"], "Q");
        assert_eq!(body["questions"][0]["correctAnswer"], 1);
    }

    #[test]
    fn assigned_id_accepts_strings_and_numbers() {
        assert_eq!(
            assigned_id(serde_json::json!("quiz-7")),
            Some(QuizId::new("quiz-7"))
        );
        assert_eq!(assigned_id(serde_json::json!(42)), Some(QuizId::new("42")));
        assert_eq!(assigned_id(serde_json::json!("  ")), None);
        assert_eq!(assigned_id(serde_json::json!(null)), None);
        assert_eq!(assigned_id(serde_json::json!({"nested": 1})), None);
    }

    #[tokio::test]
    async fn disabled_publisher_refuses() {
        let publisher = QuizPublisher::disabled();
        assert!(!publisher.enabled());
        assert!(matches!(
            publisher.publish(&[]).await,
            Err(PublishError::Disabled)
        ));
    }

    #[tokio::test]
    async fn empty_and_invalid_lists_are_rejected_before_sending() {
        let publisher = QuizPublisher::new(PublishConfig::from_base_url("http://127.0.0.1:9"));
        assert!(matches!(
            publisher.publish(&[]).await,
            Err(PublishError::EmptyQuiz)
        ));

        let bad = [Question {
            id: QuestionId::new(1),
            prompt: "Q".into(),
            code: None,
            options: vec!["only".into()],
            correct_answer: 0,
            explanation: String::new(),
        }];
        assert!(matches!(
            publisher.publish(&bad).await,
            Err(PublishError::InvalidQuestion(_))
        ));
    }
}
