use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Question, QuestionId};

//
// ─── MODE & HISTORY ────────────────────────────────────────────────────────────
//

/// Which view the quiz session is currently in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    #[default]
    Menu,
    Browsing,
    Playing,
    Results,
}

/// One answered question.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub correct: bool,
}

/// Result of `Session::answer`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded { correct: bool },
    /// An answer was already submitted for this question; nothing changed.
    AlreadyAnswered,
}

/// Result of `Session::advance`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished,
}

/// Aggregated view of play progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionProgress {
    /// 1-based position of the current question.
    pub position: usize,
    pub total: usize,
    pub answered: usize,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz has no questions")]
    EmptyQuiz,

    #[error("expected {expected:?} mode but session is in {actual:?}")]
    WrongMode { expected: Mode, actual: Mode },

    #[error("option {index} is out of range for a question with {len} options")]
    OptionOutOfRange { index: usize, len: usize },

    #[error("the current question has not been answered yet")]
    NotAnswered,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// Mutable state of one quiz-taking attempt.
///
/// Owned by a single view and only changed through the methods below, one
/// user action at a time. `start` is the only way into `Playing`, and it
/// always begins from a clean slate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    mode: Mode,
    questions: Vec<Question>,
    current: usize,
    score: usize,
    selected: Option<usize>,
    show_explanation: bool,
    history: Vec<AnswerRecord>,
}

impl Session {
    /// A fresh session sitting on the main menu.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        match self.mode {
            Mode::Playing => self.questions.get(self.current),
            _ => None,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn selected_answer(&self) -> Option<usize> {
        self.selected
    }

    #[must_use]
    pub fn show_explanation(&self) -> bool {
        self.show_explanation
    }

    #[must_use]
    pub fn history(&self) -> &[AnswerRecord] {
        &self.history
    }

    #[must_use]
    pub fn is_last_question(&self) -> bool {
        !self.questions.is_empty() && self.current + 1 == self.questions.len()
    }

    #[must_use]
    pub fn progress(&self) -> SessionProgress {
        SessionProgress {
            position: if self.questions.is_empty() {
                0
            } else {
                self.current + 1
            },
            total: self.questions.len(),
            answered: self.history.len(),
        }
    }

    /// Whether the last answer (if any) was correct.
    #[must_use]
    pub fn last_answer_correct(&self) -> Option<bool> {
        self.selected?;
        self.history.last().map(|record| record.correct)
    }

    /// Go from the menu to the quiz file list.
    pub fn open_browser(&mut self) {
        self.exit_to_browsing();
    }

    /// Begin playing the given questions, discarding any previous attempt.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuiz` if `questions` is empty; the session is
    /// left untouched in that case.
    pub fn start(&mut self, questions: Vec<Question>) -> Result<(), SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyQuiz);
        }

        *self = Self {
            mode: Mode::Playing,
            questions,
            ..Self::default()
        };
        Ok(())
    }

    /// Submit an answer for the current question.
    ///
    /// A second call for the same question is a no-op: answers cannot be
    /// changed once submitted.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongMode` outside of `Playing`, and
    /// `SessionError::OptionOutOfRange` if `index` is not a valid option.
    pub fn answer(&mut self, index: usize) -> Result<AnswerOutcome, SessionError> {
        self.expect_mode(Mode::Playing)?;
        if self.selected.is_some() {
            return Ok(AnswerOutcome::AlreadyAnswered);
        }

        let question = self
            .questions
            .get(self.current)
            .ok_or(SessionError::EmptyQuiz)?;
        if index >= question.options.len() {
            return Err(SessionError::OptionOutOfRange {
                index,
                len: question.options.len(),
            });
        }

        let correct = question.is_correct(index);
        let question_id = question.id;

        self.selected = Some(index);
        if correct {
            self.score += 1;
        }
        self.history.push(AnswerRecord {
            question_id,
            correct,
        });

        Ok(AnswerOutcome::Recorded { correct })
    }

    /// Move to the next question, or to results after the last one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::WrongMode` outside of `Playing`, and
    /// `SessionError::NotAnswered` if the current question has no answer yet.
    pub fn advance(&mut self) -> Result<Advance, SessionError> {
        self.expect_mode(Mode::Playing)?;
        if self.selected.is_none() {
            return Err(SessionError::NotAnswered);
        }

        if self.is_last_question() {
            self.mode = Mode::Results;
            return Ok(Advance::Finished);
        }

        self.current += 1;
        self.selected = None;
        self.show_explanation = false;
        Ok(Advance::Next {
            index: self.current,
        })
    }

    /// Flip explanation visibility for the answered question.
    ///
    /// Returns the new visibility. Before an answer is submitted the
    /// explanation stays hidden.
    pub fn toggle_explanation(&mut self) -> bool {
        if self.mode == Mode::Playing && self.selected.is_some() {
            self.show_explanation = !self.show_explanation;
        }
        self.show_explanation
    }

    /// Return to the file list, dropping any progress.
    pub fn exit_to_browsing(&mut self) {
        *self = Self {
            mode: Mode::Browsing,
            ..Self::default()
        };
    }

    /// Return to the main menu, dropping any progress.
    pub fn exit_to_menu(&mut self) {
        *self = Self::default();
    }

    fn expect_mode(&self, expected: Mode) -> Result<(), SessionError> {
        if self.mode == expected {
            Ok(())
        } else {
            Err(SessionError::WrongMode {
                expected,
                actual: self.mode,
            })
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
