use quiz_core::scoring::review_list;
use quiz_core::{PassPolicy, ReviewItem, ScoreReport, Session};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub percentage_str: String,
    pub passed: bool,
    pub score_label: String,
    pub review: Vec<ReviewItem>,
}

impl ResultsVm {
    #[must_use]
    pub fn percentage_class(&self) -> &'static str {
        if self.passed {
            "results__pct results__pct--pass"
        } else {
            "results__pct results__pct--fail"
        }
    }
}

#[must_use]
pub fn map_results(session: &Session, policy: PassPolicy) -> ResultsVm {
    let report = ScoreReport::from_session(session, policy);
    ResultsVm {
        percentage_str: format!("{}%", report.percentage),
        passed: report.passed,
        score_label: format!("Score: {} / {}", report.score, report.total),
        review: review_list(session),
    }
}
