use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single multiple-choice question as stored in a quiz file.
///
/// Field names on the wire follow the quiz file format (`question`,
/// `correctAnswer`), which is why `prompt` is renamed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: QuestionId,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub options: Vec<String>,
    pub correct_answer: usize,
    #[serde(default)]
    pub explanation: String,
}

impl Question {
    /// Text of the correct option, if `correct_answer` points at one.
    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_answer).map(String::as_str)
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_answer
    }

    /// Check the structural invariants of a question.
    ///
    /// Stored quizzes are trusted as-is; this is only applied before writing
    /// a question list somewhere.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` describing the first violated invariant.
    pub fn validate(&self) -> Result<(), QuestionError> {
        if self.prompt.trim().is_empty() {
            return Err(QuestionError::EmptyPrompt { id: self.id });
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                id: self.id,
                count: self.options.len(),
            });
        }
        if self.correct_answer >= self.options.len() {
            return Err(QuestionError::CorrectAnswerOutOfRange {
                id: self.id,
                index: self.correct_answer,
                len: self.options.len(),
            });
        }
        Ok(())
    }
}

//
// ─── QUESTION VALIDATION ERRORS ────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has an empty prompt")]
    EmptyPrompt { id: QuestionId },

    #[error("question {id} needs at least two options, found {count}")]
    TooFewOptions { id: QuestionId, count: usize },

    #[error("question {id} marks option {index} as correct but only has {len} options")]
    CorrectAnswerOutOfRange {
        id: QuestionId,
        index: usize,
        len: usize,
    },
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
