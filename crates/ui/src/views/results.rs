use dioxus::prelude::*;
use quiz_core::Session;

use crate::context::AppContext;
use crate::vm::map_results;

#[component]
pub fn ResultsView(session: Signal<Session>) -> Element {
    let ctx = use_context::<AppContext>();
    let vm = map_results(&session.read(), ctx.pass_policy());
    let pct_class = vm.percentage_class();

    rsx! {
        div { class: "page results",
            div { class: "results__summary",
                div { class: "{pct_class}", "{vm.percentage_str}" }
                div { class: "results__score", "{vm.score_label}" }
            }

            section { class: "results__review",
                h3 { class: "results__review-title", "Incorrect Answers" }
                if vm.review.is_empty() {
                    p { class: "results__perfect", "Perfect!" }
                } else {
                    ul {
                        for item in vm.review.iter() {
                            li { key: "{item.question_id}", class: "results__item",
                                p { class: "results__question", "Q: {item.prompt}" }
                                p { class: "results__answer", "Ans: {item.correct_option}" }
                            }
                        }
                    }
                }
            }

            div { class: "results__actions",
                button {
                    class: "btn btn-secondary",
                    id: "results-back-to-files",
                    r#type: "button",
                    onclick: move |_| {
                        let mut session = session;
                        session.write().exit_to_browsing();
                    },
                    "Back to Files"
                }
                button {
                    class: "btn btn-primary",
                    id: "results-main-menu",
                    r#type: "button",
                    onclick: move |_| {
                        let mut session = session;
                        session.write().exit_to_menu();
                    },
                    "Main Menu"
                }
            }
        }
    }
}
