use quiz_core::model::{QuizFileHeader, QuizId};

use crate::vm::time_fmt::format_datetime;

/// One row of the saved-quizzes list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizHeaderVm {
    pub id: QuizId,
    pub created_at_str: String,
    pub question_count_str: String,
}

#[must_use]
pub fn map_quiz_headers(headers: &[QuizFileHeader]) -> Vec<QuizHeaderVm> {
    headers
        .iter()
        .map(|header| QuizHeaderVm {
            id: header.id.clone(),
            created_at_str: format_datetime(header.timestamp),
            question_count_str: match header.question_count {
                1 => "1 question".to_string(),
                n => format!("{n} questions"),
            },
        })
        .collect()
}
