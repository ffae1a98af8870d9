use quiz_core::Session;

use crate::vm::markdown_vm::markdown_to_html;

/// Styling of one answer option.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionState {
    /// No answer yet; the option is clickable.
    Open,
    Correct,
    /// The learner picked this one and it was wrong.
    Wrong,
    /// Answered; neither picked nor correct.
    Dimmed,
}

impl OptionState {
    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            Self::Open => "option",
            Self::Correct => "option option--correct",
            Self::Wrong => "option option--wrong",
            Self::Dimmed => "option option--dimmed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub text: String,
    pub state: OptionState,
}

/// Everything the playing view shows for the current question.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub progress_label: String,
    pub progress_percent: u32,
    pub prompt: String,
    pub code: Option<String>,
    pub options: Vec<OptionVm>,
    /// `Some(true)` once answered correctly, `Some(false)` once answered wrong.
    pub feedback: Option<bool>,
    pub show_explanation: bool,
    pub explanation_html: String,
    pub is_last: bool,
}

impl QuestionVm {
    #[must_use]
    pub fn answered(&self) -> bool {
        self.feedback.is_some()
    }

    #[must_use]
    pub fn feedback_label(&self) -> Option<&'static str> {
        self.feedback
            .map(|correct| if correct { "Correct!" } else { "Incorrect." })
    }

    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.show_explanation {
            "Hide Info"
        } else {
            "Show Info"
        }
    }

    #[must_use]
    pub fn next_label(&self) -> &'static str {
        if self.is_last { "Finish" } else { "Next" }
    }
}

/// `[A]`, `[B]`, ... for option positions; falls back to the number past `Z`.
#[must_use]
pub fn option_label(index: usize) -> String {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or_else(|| format!("[{}]", index + 1), |i| format!("[{}]", char::from(b'A' + i)))
}

/// Build the view model for the question being played, if any.
#[must_use]
pub fn map_question(session: &Session) -> Option<QuestionVm> {
    let question = session.current_question()?;
    let progress = session.progress();
    let selected = session.selected_answer();

    let options = question
        .options
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let state = match selected {
                None => OptionState::Open,
                Some(_) if question.is_correct(index) => OptionState::Correct,
                Some(picked) if picked == index => OptionState::Wrong,
                Some(_) => OptionState::Dimmed,
            };
            OptionVm {
                index,
                label: option_label(index),
                text: text.clone(),
                state,
            }
        })
        .collect();

    Some(QuestionVm {
        progress_label: format!("Question {} / {}", progress.position, progress.total),
        progress_percent: progress_percent(progress.position, progress.total),
        prompt: question.prompt.clone(),
        code: question.code.clone().filter(|code| !code.trim().is_empty()),
        options,
        feedback: session.last_answer_correct(),
        show_explanation: session.show_explanation(),
        explanation_html: markdown_to_html(&question.explanation),
        is_last: session.is_last_question(),
    })
}

fn progress_percent(position: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    u32::try_from(position.min(total) * 100 / total).unwrap_or(100)
}
