use quiz_core::model::{Question, QuizFile, QuizFileHeader, QuizId};

use super::SqliteRepository;
use super::mapping::{
    map_header_row, map_question_row, options_to_json, question_id_to_i64, usize_to_i64,
};
use crate::repository::{QuestionStore, QuizWriter, StorageError};

fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

#[async_trait::async_trait]
impl QuestionStore for SqliteRepository {
    async fn list_headers(&self) -> Result<Vec<QuizFileHeader>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT q.id, q.created_at_ms, COUNT(qs.position) AS question_count
            FROM quizzes q
            LEFT JOIN questions qs ON qs.quiz_id = q.id
            GROUP BY q.id, q.created_at_ms
            ORDER BY q.created_at_ms DESC, q.id ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut headers = Vec::with_capacity(rows.len());
        for row in rows {
            headers.push(map_header_row(&row)?);
        }
        Ok(headers)
    }

    async fn load_by_id(&self, id: &QuizId) -> Result<Option<Vec<Question>>, StorageError> {
        let exists = sqlx::query("SELECT 1 FROM quizzes WHERE id = ?1")
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?;
        if exists.is_none() {
            return Ok(None);
        }

        let rows = sqlx::query(
            r"
            SELECT question_id, prompt, code, options, correct_answer, explanation
            FROM questions
            WHERE quiz_id = ?1
            ORDER BY position ASC
            ",
        )
        .bind(id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let mut questions = Vec::with_capacity(rows.len());
        for row in rows {
            questions.push(map_question_row(&row)?);
        }
        Ok(Some(questions))
    }
}

#[async_trait::async_trait]
impl QuizWriter for SqliteRepository {
    async fn save_quiz(&self, quiz: &QuizFile) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query(
            r"
            INSERT INTO quizzes (id, created_at_ms)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                created_at_ms = excluded.created_at_ms
            ",
        )
        .bind(quiz.id.as_str())
        .bind(quiz.timestamp.timestamp_millis())
        .execute(&mut *tx)
        .await
        .map_err(conn)?;

        sqlx::query("DELETE FROM questions WHERE quiz_id = ?1")
            .bind(quiz.id.as_str())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for (position, question) in quiz.questions.iter().enumerate() {
            sqlx::query(
                r"
                INSERT INTO questions (quiz_id, position, question_id, prompt, code, options, correct_answer, explanation)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ",
            )
            .bind(quiz.id.as_str())
            .bind(usize_to_i64("position", position)?)
            .bind(question_id_to_i64(question.id)?)
            .bind(question.prompt.as_str())
            .bind(question.code.as_deref())
            .bind(options_to_json(&question.options)?)
            .bind(usize_to_i64("correct_answer", question.correct_answer)?)
            .bind(question.explanation.as_str())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }
}
