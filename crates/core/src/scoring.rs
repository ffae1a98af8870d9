use thiserror::Error;

use crate::model::QuestionId;
use crate::session::Session;

/// Default pass mark, in percent.
pub const DEFAULT_PASS_THRESHOLD: u8 = 65;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("pass threshold must be between 0 and 100, got {0}")]
    InvalidThreshold(u32),
}

/// Pass/fail cut-off applied to the results view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassPolicy {
    threshold: u8,
}

impl PassPolicy {
    /// # Errors
    ///
    /// Returns `ScoringError::InvalidThreshold` when `threshold > 100`.
    pub fn new(threshold: u32) -> Result<Self, ScoringError> {
        u8::try_from(threshold)
            .ok()
            .filter(|value| *value <= 100)
            .map(|threshold| Self { threshold })
            .ok_or(ScoringError::InvalidThreshold(threshold))
    }

    #[must_use]
    pub fn threshold(&self) -> u8 {
        self.threshold
    }

    #[must_use]
    pub fn passes(&self, percentage: u32) -> bool {
        percentage >= u32::from(self.threshold)
    }
}

impl Default for PassPolicy {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_PASS_THRESHOLD,
        }
    }
}

/// Final score of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreReport {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub passed: bool,
}

impl ScoreReport {
    #[must_use]
    pub fn new(score: usize, total: usize, policy: PassPolicy) -> Self {
        let percentage = percentage(score, total);
        Self {
            score,
            total,
            percentage,
            passed: policy.passes(percentage),
        }
    }

    #[must_use]
    pub fn from_session(session: &Session, policy: PassPolicy) -> Self {
        Self::new(session.score(), session.total(), policy)
    }
}

/// `round(100 * score / total)`, halves rounded up. Zero when `total` is zero.
#[must_use]
pub fn percentage(score: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = score as u64;
    let total = total as u64;
    let rounded = (200 * score + total) / (2 * total);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// An incorrectly answered question, resolved for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub question_id: QuestionId,
    pub prompt: String,
    pub correct_option: String,
}

/// Incorrect answers in the order they were given.
///
/// History entries whose question id no longer resolves are skipped.
#[must_use]
pub fn review_list(session: &Session) -> Vec<ReviewItem> {
    session
        .history()
        .iter()
        .filter(|record| !record.correct)
        .filter_map(|record| {
            let question = session
                .questions()
                .iter()
                .find(|question| question.id == record.question_id)?;
            Some(ReviewItem {
                question_id: question.id,
                prompt: question.prompt.clone(),
                correct_option: question.correct_option().unwrap_or_default().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::tests::{question, quiz};
    use crate::session::{Advance, Mode};

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(3, 4), 75);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 0), 0);
    }

    #[test]
    fn policy_rejects_thresholds_above_100() {
        assert_eq!(PassPolicy::new(101), Err(ScoringError::InvalidThreshold(101)));
        assert_eq!(PassPolicy::new(100).unwrap().threshold(), 100);
        assert_eq!(PassPolicy::default().threshold(), 65);
    }

    #[test]
    fn pass_mark_is_inclusive() {
        let policy = PassPolicy::default();
        assert!(policy.passes(65));
        assert!(!policy.passes(64));
    }

    #[test]
    fn four_questions_three_right() {
        let mut session = Session::new();
        session.start(quiz(4)).unwrap();
        for step in 0..4 {
            let choice = if step == 3 { 1 } else { 0 };
            session.answer(choice).unwrap();
            session.advance().unwrap();
        }
        assert_eq!(session.mode(), Mode::Results);

        let report = ScoreReport::from_session(&session, PassPolicy::default());
        assert_eq!(report.score, 3);
        assert_eq!(report.percentage, 75);
        assert!(report.passed);

        let review = review_list(&session);
        assert_eq!(review.len(), 1);
        assert_eq!(review[0].question_id, QuestionId::new(4));
        assert_eq!(review[0].prompt, "Q4");
        assert_eq!(review[0].correct_option, "A");
    }

    #[test]
    fn single_correct_answer_scores_full_marks() {
        let mut session = Session::new();
        session.start(quiz(1)).unwrap();
        session.answer(0).unwrap();
        assert_eq!(session.advance(), Ok(Advance::Finished));

        let report = ScoreReport::from_session(&session, PassPolicy::default());
        assert_eq!(report.percentage, 100);
        assert!(review_list(&session).is_empty());
    }

    #[test]
    fn review_keeps_answer_order() {
        let mut session = Session::new();
        session
            .start(vec![question(9, 2), question(3, 2), question(5, 2)])
            .unwrap();
        for _ in 0..3 {
            session.answer(0).unwrap();
            session.advance().unwrap();
        }

        let ids: Vec<_> = review_list(&session)
            .iter()
            .map(|item| item.question_id.value())
            .collect();
        assert_eq!(ids, [9, 3, 5]);

        let report = ScoreReport::from_session(&session, PassPolicy::default());
        assert_eq!(report.percentage, 0);
        assert!(!report.passed);
    }
}
