use dioxus::prelude::*;
use quiz_core::Session;

#[component]
pub fn MenuView(session: Signal<Session>) -> Element {
    rsx! {
        div { class: "page menu",
            h1 { class: "menu__title", "Quiz Master" }
            p { class: "menu__subtitle", "Certification prep, one question at a time." }
            button {
                class: "btn btn-primary menu__cta",
                id: "menu-open-browser",
                r#type: "button",
                onclick: move |_| {
                    let mut session = session;
                    session.write().open_browser();
                },
                "View Saved Quizzes"
            }
        }
    }
}
