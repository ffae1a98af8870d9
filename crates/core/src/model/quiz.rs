use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::ids::QuizId;
use crate::model::question::Question;

/// A named, timestamped collection of questions.
///
/// On disk the timestamp is epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizFile {
    pub id: QuizId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

impl QuizFile {
    #[must_use]
    pub fn new(id: QuizId, timestamp: DateTime<Utc>, questions: Vec<Question>) -> Self {
        Self {
            id,
            timestamp,
            questions,
        }
    }

    /// Lightweight projection used for listing.
    #[must_use]
    pub fn header(&self) -> QuizFileHeader {
        QuizFileHeader {
            id: self.id.clone(),
            timestamp: self.timestamp,
            question_count: self.questions.len(),
        }
    }

    #[must_use]
    pub fn is_playable(&self) -> bool {
        !self.questions.is_empty()
    }
}

/// Summary of a quiz file without its question content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizFileHeader {
    pub id: QuizId,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
    pub question_count: usize,
}

/// Sort headers newest first.
///
/// Ties keep a stable order by id so listings do not flicker between loads.
pub fn sort_newest_first(headers: &mut [QuizFileHeader]) {
    headers.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then_with(|| a.id.cmp(&b.id)));
}
