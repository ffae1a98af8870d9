use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use quiz_core::model::{Question, QuestionId, QuizFile, QuizId};
use quiz_core::time::from_epoch_millis;
use quiz_core::{Mode, PassPolicy, Session};
use services::{QuizCatalogService, SessionFlowService};
use storage::repository::{InMemoryQuestionStore, QuestionStore};

use crate::app::QuizScreen;
use crate::context::{UiApp, build_app_context};
use crate::views::BrowsingTestHandles;

#[derive(Clone)]
struct TestApp {
    catalog: Arc<QuizCatalogService>,
    session_flow: Arc<SessionFlowService>,
    pass_policy: PassPolicy,
}

impl UiApp for TestApp {
    fn catalog(&self) -> Arc<QuizCatalogService> {
        Arc::clone(&self.catalog)
    }

    fn session_flow(&self) -> Arc<SessionFlowService> {
        Arc::clone(&self.session_flow)
    }

    fn pass_policy(&self) -> PassPolicy {
        self.pass_policy
    }
}

#[derive(Props, Clone)]
struct QuizHarnessProps {
    app: Arc<TestApp>,
    session: Session,
    failed_quiz: Option<QuizId>,
    browsing_handles: BrowsingTestHandles,
    screen_handles: ScreenHandles,
}

impl PartialEq for QuizHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn QuizHarness(props: QuizHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.browsing_handles.clone());
    let session = use_signal(|| props.session.clone());
    let failed_quiz = use_signal(|| props.failed_quiz.clone());
    let mut registered = use_signal(|| false);
    if !registered() {
        registered.set(true);
        props.screen_handles.register(session, failed_quiz);
    }
    rsx! { QuizScreen { session, failed_quiz } }
}

/// The screen-level signals, so tests can observe navigation.
#[derive(Clone, Default)]
struct ScreenHandles {
    session: Rc<RefCell<Option<Signal<Session>>>>,
    failed_quiz: Rc<RefCell<Option<Signal<Option<QuizId>>>>>,
}

impl ScreenHandles {
    fn register(&self, session: Signal<Session>, failed_quiz: Signal<Option<QuizId>>) {
        *self.session.borrow_mut() = Some(session);
        *self.failed_quiz.borrow_mut() = Some(failed_quiz);
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    browsing_handles: BrowsingTestHandles,
    screen_handles: ScreenHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }

    /// Open a quiz the way clicking its row does.
    pub fn open_quiz(&self, id: &str) {
        let open = self.browsing_handles.open();
        let id = QuizId::new(id);
        self.dom.in_runtime(|| open.call(id));
    }

    pub fn mode(&self) -> Mode {
        let session = (*self.screen_handles.session.borrow()).expect("session registered");
        self.dom.in_runtime(|| session.peek().mode())
    }

    pub fn failed_quiz(&self) -> Option<QuizId> {
        let failed_quiz =
            (*self.screen_handles.failed_quiz.borrow()).expect("failed quiz registered");
        self.dom.in_runtime(|| failed_quiz.peek().clone())
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

#[derive(Clone)]
pub struct HarnessOptions {
    pub session: Session,
    pub failed_quiz: Option<QuizId>,
    pub pass_policy: PassPolicy,
}

impl HarnessOptions {
    pub fn with_session(session: Session) -> Self {
        Self {
            session,
            failed_quiz: None,
            pass_policy: PassPolicy::default(),
        }
    }
}

pub fn setup_view_harness(options: HarnessOptions, quizzes: Vec<QuizFile>) -> ViewHarness {
    let store = InMemoryQuestionStore::with_quizzes(quizzes).expect("seed store");
    setup_view_harness_with_store(options, Arc::new(store))
}

pub fn setup_view_harness_with_store(
    options: HarnessOptions,
    store: Arc<dyn QuestionStore>,
) -> ViewHarness {
    let catalog = Arc::new(QuizCatalogService::new(store));
    let session_flow = Arc::new(SessionFlowService::new(Arc::clone(&catalog)));
    let app = Arc::new(TestApp {
        catalog,
        session_flow,
        pass_policy: options.pass_policy,
    });

    let browsing_handles = BrowsingTestHandles::default();
    let screen_handles = ScreenHandles::default();
    let dom = VirtualDom::new_with_props(
        QuizHarness,
        QuizHarnessProps {
            app,
            session: options.session,
            failed_quiz: options.failed_quiz,
            browsing_handles: browsing_handles.clone(),
            screen_handles: screen_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        browsing_handles,
        screen_handles,
    }
}

pub fn question(id: u64) -> Question {
    Question {
        id: QuestionId::new(id),
        prompt: format!("Question {id}"),
        code: None,
        options: vec!["Alpha".into(), "Beta".into(), "Gamma".into(), "Delta".into()],
        correct_answer: 0,
        explanation: format!("Alpha is right for **{id}**."),
    }
}

pub fn quiz_file(id: &str, ms: i64, len: u64) -> QuizFile {
    QuizFile::new(
        QuizId::new(id),
        from_epoch_millis(ms).expect("valid timestamp"),
        (1..=len).map(question).collect(),
    )
}

/// A session already playing `questions`.
pub fn playing(questions: Vec<Question>) -> Session {
    let mut session = Session::new();
    session.open_browser();
    session.start(questions).expect("non-empty quiz");
    session
}
