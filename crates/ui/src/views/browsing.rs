#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

use dioxus::prelude::*;
use quiz_core::Session;
use quiz_core::model::QuizId;
use tracing::debug;

use crate::context::AppContext;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{QuizHeaderVm, map_quiz_headers};

#[component]
pub fn BrowsingView(session: Signal<Session>, failed_quiz: Signal<Option<QuizId>>) -> Element {
    let ctx = use_context::<AppContext>();
    let catalog = ctx.catalog();
    let session_flow = ctx.session_flow();

    let resource = use_resource(move || {
        let catalog = catalog.clone();
        async move {
            let headers = catalog.list_headers().await;
            Ok::<_, ViewError>(map_quiz_headers(&headers))
        }
    });
    let state = view_state_from_resource(&resource);
    let load_hint = ViewError::LoadFailed.message();

    let open_quiz = use_callback(move |id: QuizId| {
        let session_flow = session_flow.clone();
        let mut session = session;
        let mut failed_quiz = failed_quiz;
        spawn(async move {
            // Work on a copy so a failed load leaves the visible session untouched.
            let mut local = session.peek().clone();
            match session_flow.select_quiz(&mut local, &id).await {
                Ok(()) => {
                    failed_quiz.set(None);
                    session.set(local);
                }
                Err(err) => {
                    debug!(quiz = %id, error = %err, "staying on quiz list");
                    failed_quiz.set(Some(id));
                }
            }
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<BrowsingTestHandles>() {
                handles.register(open_quiz);
            }
        }
    }

    rsx! {
        div { class: "page browsing",
            header { class: "browsing__header",
                h2 { "Saved Quizzes" }
                button {
                    class: "btn btn-secondary",
                    id: "browsing-back",
                    r#type: "button",
                    onclick: move |_| {
                        let mut session = session;
                        let mut failed_quiz = failed_quiz;
                        failed_quiz.set(None);
                        session.write().exit_to_menu();
                    },
                    "Back to Menu"
                }
            }

            if let Some(id) = failed_quiz.read().clone() {
                div { class: "notice notice--error", role: "alert",
                    p { "Could not load quiz \"{id}\"." }
                    p { class: "notice__hint", "{load_hint}" }
                }
            }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        div { class: "browsing__empty",
                            p { class: "browsing__empty-title", "No saved quizzes yet." }
                            p { "Add quiz files to the quiz folder to see them here." }
                        }
                    } else {
                        ul { class: "quiz-list",
                            for row in rows {
                                QuizRow { key: "{row.id}", row, on_open: open_quiz }
                            }
                        }
                    }
                },
                ViewState::Error(err) => rsx! {
                    p { "{err.message()}" }
                },
            }
        }
    }
}

#[component]
fn QuizRow(row: QuizHeaderVm, on_open: EventHandler<QuizId>) -> Element {
    let title_id = row.id.clone();
    let button_id = row.id.clone();
    rsx! {
        li { class: "quiz-list__item",
            div { class: "quiz-list__meta",
                h3 {
                    class: "quiz-list__title",
                    onclick: move |_| on_open.call(title_id.clone()),
                    "{row.id}"
                }
                span { class: "quiz-list__date", "{row.created_at_str}" }
                span { class: "quiz-list__count", "{row.question_count_str}" }
            }
            button {
                class: "btn btn-outline",
                r#type: "button",
                onclick: move |_| on_open.call(button_id.clone()),
                "Open"
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct BrowsingTestHandles {
    open: Rc<RefCell<Option<Callback<QuizId>>>>,
}

#[cfg(test)]
impl BrowsingTestHandles {
    pub(crate) fn register(&self, open: Callback<QuizId>) {
        *self.open.borrow_mut() = Some(open);
    }

    pub(crate) fn open(&self) -> Callback<QuizId> {
        (*self.open.borrow()).expect("browsing open registered")
    }
}
