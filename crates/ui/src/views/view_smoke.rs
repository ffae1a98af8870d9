use std::sync::Arc;

use quiz_core::model::{Question, QuizFileHeader, QuizId};
use quiz_core::{Mode, PassPolicy, Session};
use storage::repository::{QuestionStore, StorageError};

use super::test_harness::{
    HarnessOptions, playing, question, quiz_file, setup_view_harness,
    setup_view_harness_with_store,
};

fn browsing() -> Session {
    let mut session = Session::new();
    session.open_browser();
    session
}

#[tokio::test(flavor = "current_thread")]
async fn menu_view_smoke_renders_entry_point() {
    let mut harness = setup_view_harness(HarnessOptions::with_session(Session::new()), vec![]);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Quiz Master"), "missing title in {html}");
    assert!(html.contains("View Saved Quizzes"), "missing cta in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn browsing_view_smoke_lists_newest_first() {
    let mut harness = setup_view_harness(
        HarnessOptions::with_session(browsing()),
        vec![quiz_file("older-quiz", 100, 3), quiz_file("newer-quiz", 200, 1)],
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    let newer = html.find("newer-quiz").expect("newer quiz listed");
    let older = html.find("older-quiz").expect("older quiz listed");
    assert!(newer < older, "expected newest first in {html}");
    assert!(html.contains("3 questions"), "missing count in {html}");
    assert!(html.contains("1 question"), "missing count in {html}");
    assert!(html.contains("Open"), "missing open button in {html}");
    assert!(html.contains("Back to Menu"), "missing back button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn browsing_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness(HarnessOptions::with_session(browsing()), vec![]);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No saved quizzes yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn browsing_view_smoke_renders_load_failure_notice() {
    let options = HarnessOptions {
        failed_quiz: Some(QuizId::new("broken")),
        ..HarnessOptions::with_session(browsing())
    };
    let mut harness = setup_view_harness(options, vec![quiz_file("fine", 100, 2)]);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("Could not load quiz"), "missing notice in {html}");
    assert!(html.contains("broken"), "missing quiz id in {html}");
    assert!(html.contains("fine"), "list should still render in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn browsing_open_starts_playing_and_clears_notice() {
    let options = HarnessOptions {
        failed_quiz: Some(QuizId::new("broken")),
        ..HarnessOptions::with_session(browsing())
    };
    let mut harness = setup_view_harness(options, vec![quiz_file("java-core", 100, 2)]);
    harness.rebuild();
    harness.drive_async().await;

    harness.open_quiz("java-core");
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(harness.mode(), Mode::Playing);
    assert_eq!(harness.failed_quiz(), None);
    let html = harness.render();
    assert!(html.contains("Question 1 / 2"), "expected first question in {html}");
    assert!(!html.contains("Could not load quiz"), "stale notice in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn browsing_open_of_missing_quiz_stays_and_shows_notice() {
    let mut harness = setup_view_harness(
        HarnessOptions::with_session(browsing()),
        vec![quiz_file("java-core", 100, 2), quiz_file("empty-quiz", 200, 0)],
    );
    harness.rebuild();
    harness.drive_async().await;

    harness.open_quiz("missing");
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(harness.mode(), Mode::Browsing);
    assert_eq!(harness.failed_quiz(), Some(QuizId::new("missing")));
    let html = harness.render();
    assert!(html.contains("Could not load quiz"), "missing notice in {html}");
    assert!(html.contains("missing"), "missing quiz id in {html}");
    assert!(html.contains("java-core"), "list should still render in {html}");

    harness.open_quiz("empty-quiz");
    harness.drive_async().await;
    harness.drive_async().await;

    assert_eq!(harness.mode(), Mode::Browsing);
    assert_eq!(harness.failed_quiz(), Some(QuizId::new("empty-quiz")));
}

struct OfflineStore;

#[async_trait::async_trait]
impl QuestionStore for OfflineStore {
    async fn list_headers(&self) -> Result<Vec<QuizFileHeader>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }

    async fn load_by_id(&self, _id: &QuizId) -> Result<Option<Vec<Question>>, StorageError> {
        Err(StorageError::Connection("offline".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn browsing_view_smoke_degrades_to_empty_list() {
    let mut harness = setup_view_harness_with_store(
        HarnessOptions::with_session(browsing()),
        Arc::new(OfflineStore),
    );
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();
    assert!(html.contains("No saved quizzes yet."), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn playing_view_smoke_renders_unanswered_question() {
    let mut code_question = question(1);
    code_question.code = Some("int x = 1;".to_string());
    let session = playing(vec![code_question, question(2)]);

    let mut harness = setup_view_harness(HarnessOptions::with_session(session), vec![]);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Question 1 / 2"), "missing progress in {html}");
    assert!(html.contains("width: 50%"), "missing progress bar in {html}");
    assert!(html.contains("int x = 1;"), "missing code block in {html}");
    assert!(html.contains("[A]"), "missing option label in {html}");
    assert!(html.contains("[D]"), "missing option label in {html}");
    assert!(html.contains("Next"), "missing next button in {html}");
    assert!(!html.contains("Show Info"), "info toggle before answering in {html}");
    assert!(!html.contains("option--correct"), "styling before answering in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn playing_view_smoke_renders_feedback_and_explanation() {
    let mut session = playing(vec![question(1)]);
    session.answer(2).unwrap();
    session.toggle_explanation();

    let mut harness = setup_view_harness(HarnessOptions::with_session(session), vec![]);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Incorrect."), "missing feedback in {html}");
    assert!(html.contains("option--correct"), "missing correct styling in {html}");
    assert!(html.contains("option--wrong"), "missing wrong styling in {html}");
    assert!(html.contains("option--dimmed"), "missing dimmed styling in {html}");
    assert!(html.contains("Hide Info"), "missing toggle in {html}");
    assert!(html.contains("<strong>1</strong>"), "missing explanation in {html}");
    assert!(html.contains("Finish"), "missing finish button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score_and_review() {
    let mut session = playing((1..=4).map(question).collect());
    for answer in [0, 0, 0, 3] {
        session.answer(answer).unwrap();
        session.advance().unwrap();
    }

    let mut harness = setup_view_harness(HarnessOptions::with_session(session), vec![]);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("75%"), "missing percentage in {html}");
    assert!(html.contains("results__pct--pass"), "missing pass styling in {html}");
    assert!(html.contains("Score: 3 / 4"), "missing score in {html}");
    assert!(html.contains("Incorrect Answers"), "missing review title in {html}");
    assert!(html.contains("Q: Question 4"), "missing review item in {html}");
    assert!(html.contains("Ans: Alpha"), "missing correct answer in {html}");
    assert!(html.contains("Back to Files"), "missing back button in {html}");
    assert!(html.contains("Main Menu"), "missing menu button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_applies_pass_policy() {
    let mut session = playing(vec![question(1)]);
    session.answer(0).unwrap();
    session.advance().unwrap();

    let options = HarnessOptions {
        pass_policy: PassPolicy::new(100).unwrap(),
        ..HarnessOptions::with_session(session)
    };
    let mut harness = setup_view_harness(options, vec![]);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("100%"), "missing percentage in {html}");
    assert!(html.contains("Perfect!"), "missing perfect message in {html}");
    assert!(html.contains("results__pct--pass"), "missing pass styling in {html}");
}
