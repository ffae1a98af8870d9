mod ids;
mod question;
mod quiz;

pub use ids::{ParseIdError, QuestionId, QuizId};
pub use question::{Question, QuestionError};
pub use quiz::{QuizFile, QuizFileHeader, sort_newest_first};
