use dioxus::prelude::*;
use quiz_core::Session;
use tracing::debug;

use crate::vm::{OptionVm, map_question};

#[component]
pub fn PlayingView(session: Signal<Session>) -> Element {
    let Some(vm) = map_question(&session.read()) else {
        return rsx! {
            div { class: "page playing",
                p { "No question to show." }
            }
        };
    };

    let answered = vm.answered();
    let feedback_class = match vm.feedback {
        Some(true) => "playing__feedback playing__feedback--correct",
        _ => "playing__feedback playing__feedback--wrong",
    };

    rsx! {
        div { class: "page playing",
            header { class: "playing__header",
                span { class: "playing__progress-label", "{vm.progress_label}" }
                button {
                    class: "btn btn-secondary btn-small",
                    id: "playing-exit",
                    r#type: "button",
                    onclick: move |_| {
                        let mut session = session;
                        session.write().exit_to_browsing();
                    },
                    "Exit"
                }
            }
            div { class: "progress",
                div { class: "progress__fill", style: "width: {vm.progress_percent}%" }
            }

            section { class: "playing__card",
                h2 { class: "playing__prompt", "{vm.prompt}" }
                if let Some(code) = vm.code.as_ref() {
                    pre { class: "code-block",
                        code { "{code}" }
                    }
                }
                div { class: "playing__options",
                    for option in vm.options.iter().cloned() {
                        OptionButton { key: "{option.index}", option, answered, session }
                    }
                }
            }

            footer { class: "playing__footer",
                div { class: "playing__outcome",
                    if let Some(label) = vm.feedback_label() {
                        p { class: "{feedback_class}", "{label}" }
                        button {
                            class: "link-button",
                            id: "playing-toggle-info",
                            r#type: "button",
                            onclick: move |_| {
                                let mut session = session;
                                session.write().toggle_explanation();
                            },
                            "{vm.toggle_label()}"
                        }
                        if vm.show_explanation {
                            div {
                                class: "playing__explanation",
                                dangerous_inner_html: "{vm.explanation_html}",
                            }
                        }
                    }
                }
                button {
                    class: "btn btn-primary",
                    id: "playing-next",
                    r#type: "button",
                    disabled: !answered,
                    onclick: move |_| {
                        let mut session = session;
                        go_next(&mut session.write());
                    },
                    "{vm.next_label()}"
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, answered: bool, session: Signal<Session>) -> Element {
    let index = option.index;
    rsx! {
        button {
            class: "{option.state.class()}",
            r#type: "button",
            disabled: answered,
            onclick: move |_| {
                let mut session = session;
                choose_option(&mut session.write(), index);
            },
            span { class: "option__label", "{option.label}" }
            "{option.text}"
        }
    }
}

/// Rejected clicks leave the session as it was.
fn choose_option(session: &mut Session, index: usize) {
    if let Err(err) = session.answer(index) {
        debug!(option = index, error = %err, "answer ignored");
    }
}

fn go_next(session: &mut Session) {
    if let Err(err) = session.advance() {
        debug!(error = %err, "advance ignored");
    }
}
