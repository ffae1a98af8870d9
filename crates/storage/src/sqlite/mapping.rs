use quiz_core::model::{Question, QuestionId, QuizFileHeader, QuizId};
use quiz_core::time::from_epoch_millis;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn i64_to_usize(field: &'static str, v: i64) -> Result<usize, StorageError> {
    usize::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn question_id_to_i64(id: QuestionId) -> Result<i64, StorageError> {
    i64::try_from(id.value()).map_err(|_| StorageError::Serialization("question_id overflow".into()))
}

pub(crate) fn usize_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

/// Options are kept as a JSON array in a single column.
pub(crate) fn options_to_json(options: &[String]) -> Result<String, StorageError> {
    serde_json::to_string(options).map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let options_json: String = row.try_get("options").map_err(ser)?;
    let options: Vec<String> = serde_json::from_str(&options_json).map_err(ser)?;

    Ok(Question {
        id: QuestionId::new(i64_to_u64(
            "question_id",
            row.try_get::<i64, _>("question_id").map_err(ser)?,
        )?),
        prompt: row.try_get("prompt").map_err(ser)?,
        code: row.try_get("code").map_err(ser)?,
        options,
        correct_answer: i64_to_usize(
            "correct_answer",
            row.try_get::<i64, _>("correct_answer").map_err(ser)?,
        )?,
        explanation: row.try_get("explanation").map_err(ser)?,
    })
}

pub(crate) fn map_header_row(row: &SqliteRow) -> Result<QuizFileHeader, StorageError> {
    let created_at_ms: i64 = row.try_get("created_at_ms").map_err(ser)?;
    let timestamp = from_epoch_millis(created_at_ms).ok_or_else(|| {
        StorageError::Serialization(format!("invalid created_at_ms: {created_at_ms}"))
    })?;

    Ok(QuizFileHeader {
        id: QuizId::new(row.try_get::<String, _>("id").map_err(ser)?),
        timestamp,
        question_count: i64_to_usize(
            "question_count",
            row.try_get::<i64, _>("question_count").map_err(ser)?,
        )?,
    })
}
