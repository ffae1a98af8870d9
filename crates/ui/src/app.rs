use dioxus::prelude::*;
use quiz_core::model::QuizId;
use quiz_core::{Mode, Session};

use crate::views::{BrowsingView, MenuView, PlayingView, ResultsView};

#[component]
pub fn App() -> Element {
    let session = use_signal(Session::new);
    let failed_quiz = use_signal(|| None::<QuizId>);

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }

        document::Title { "Quiz Master" }

        div { class: "app-root",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                QuizScreen { session, failed_quiz }
            }
        }
    }
}

/// Renders the view for the session's current mode.
///
/// The session signal is the single source of truth for navigation.
#[component]
pub fn QuizScreen(session: Signal<Session>, failed_quiz: Signal<Option<QuizId>>) -> Element {
    let mode = session.read().mode();
    match mode {
        Mode::Menu => rsx! { MenuView { session } },
        Mode::Browsing => rsx! { BrowsingView { session, failed_quiz } },
        Mode::Playing => rsx! { PlayingView { session } },
        Mode::Results => rsx! { ResultsView { session } },
    }
}
