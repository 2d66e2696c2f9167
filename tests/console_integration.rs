//! End-to-end sessions through the console loop.
//!
//! Each test feeds a script of input lines to a `Console` over in-memory
//! adapters and checks the rendered output and what ended up in storage.

use std::sync::Arc;

use async_trait::async_trait;
use decision_desk::adapters::{
    Console, ConsoleScreens, InMemoryStore, MarkerDocument, TerminalScreens,
};
use decision_desk::application::App;
use decision_desk::domain::boundary::FallbackNotice;
use decision_desk::domain::shell::{
    Alert, DecisionData, SavedDecision, Theme, UserProfile, View, ViewKey, DARK_MARKER,
};
use decision_desk::ports::{
    DecisionHistory, DocumentRoot, Frame, PreferenceStore, RenderError, ScreenRenderer,
    StorageError,
};
use serde_json::json;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct Session {
    app: App,
    screens: TerminalScreens,
    store: InMemoryStore,
    document: Arc<MarkerDocument>,
}

async fn mount(store: InMemoryStore) -> Session {
    let document = Arc::new(MarkerDocument::new());
    let app = App::mount(Arc::new(store.clone()), document.clone()).await;
    let screens = TerminalScreens::new(Arc::new(store.clone()), document.clone(), false);
    Session {
        app,
        screens,
        store,
        document,
    }
}

/// Runs the script and returns everything written to the terminal.
async fn run(session: &mut Session, script: &str) -> String {
    let mut console = Console::new(script.as_bytes(), Vec::new(), "> ");
    console
        .run(&mut session.app, &mut session.screens)
        .await
        .unwrap();
    String::from_utf8(console.into_writer()).unwrap()
}

/// Terminal screens whose settings screen crashes.
struct CrashingSettings(TerminalScreens);

impl ScreenRenderer for CrashingSettings {
    fn loading(&self) -> Result<Frame, RenderError> {
        self.0.loading()
    }

    fn onboarding(&self) -> Result<Frame, RenderError> {
        self.0.onboarding()
    }

    fn home(&self, profile: Option<&UserProfile>) -> Result<Frame, RenderError> {
        self.0.home(profile)
    }

    fn decision_form(&self, profile: Option<&UserProfile>) -> Result<Frame, RenderError> {
        self.0.decision_form(profile)
    }

    fn analysis_result(
        &self,
        decision: Option<&DecisionData>,
        profile: Option<&UserProfile>,
    ) -> Result<Frame, RenderError> {
        self.0.analysis_result(decision, profile)
    }

    fn history(&self) -> Result<Frame, RenderError> {
        self.0.history()
    }

    fn settings(&self, _theme: Theme) -> Result<Frame, RenderError> {
        panic!("settings screen crashed");
    }

    fn layout(
        &self,
        current: &ViewKey,
        alert: Option<&Alert>,
        body: Frame,
    ) -> Result<Frame, RenderError> {
        self.0.layout(current, alert, body)
    }

    fn fallback(&self, notice: &FallbackNotice) -> Frame {
        self.0.fallback(notice)
    }
}

#[async_trait]
impl ConsoleScreens for CrashingSettings {
    async fn refresh_history(&mut self) {
        self.0.refresh_history().await
    }

    async fn save_decision(
        &mut self,
        decision: &DecisionData,
    ) -> Result<SavedDecision, StorageError> {
        self.0.save_decision(decision).await
    }

    async fn clear_history(&mut self) -> Result<(), StorageError> {
        self.0.clear_history().await
    }

    fn toggle_details(&mut self) {
        self.0.toggle_details()
    }

    fn reset(&mut self) {
        self.0.reset()
    }

    fn help(&self, view: View) -> Frame {
        self.0.help(view)
    }
}

fn ada() -> UserProfile {
    UserProfile::from_value(json!({"name": "Ada"})).unwrap()
}

// =============================================================================
// Flows
// =============================================================================

#[tokio::test]
async fn first_run_onboards_and_persists_profile() {
    let mut session = mount(InMemoryStore::new()).await;

    let output = run(&mut session, "done name=\"Ada Lovelace\" role=analyst\nquit\n").await;

    assert!(output.contains("Welcome to Decision Desk"));
    assert!(output.contains("Welcome back, Ada Lovelace."));
    let stored = session.store.get_profile().await.unwrap().unwrap();
    assert_eq!(stored.text("role").as_deref(), Some("analyst"));
    assert!(session.app.shell().state().view().is(View::Home));
}

#[tokio::test]
async fn analyze_then_save_records_history_and_returns_home() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    let output = run(
        &mut session,
        "new\nanalyze title=\"Move to Lisbon?\" options=\"stay, move\"\nsave\nhistory\nquit\n",
    )
    .await;

    assert!(output.contains("Move to Lisbon?"));
    assert!(output.contains("Saved decisions"));
    let saved = session.store.list().await.unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].title(), "Move to Lisbon?");
    assert!(session.app.shell().state().view().is(View::History));
}

#[tokio::test]
async fn back_from_result_does_not_write_history() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    run(&mut session, "new\nanalyze title=Skip\nback\nquit\n").await;

    assert!(session.store.list().await.unwrap().is_empty());
    assert!(session.app.shell().state().view().is(View::Home));
    // The decision stays in session state after leaving the result screen
    assert!(session.app.shell().state().current_decision().is_some());
}

#[tokio::test]
async fn form_validation_raises_alert_and_stays_on_form() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    let output = run(&mut session, "new\nanalyze options=a\ndismiss\nquit\n").await;

    assert!(output.contains("[error] Field 'title' cannot be empty"));
    let state = session.app.shell().state();
    assert!(state.view().is(View::NewDecision));
    assert!(state.alert().is_none());
}

#[tokio::test]
async fn unknown_command_is_reported_as_alert() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    let output = run(&mut session, "fly\nquit\n").await;

    assert!(output.contains("Unknown command 'fly'"));
}

#[tokio::test]
async fn toggling_theme_persists_and_sets_marker() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    let output = run(&mut session, "settings\ntoggle\nquit\n").await;

    assert!(output.contains("Theme: dark"));
    assert_eq!(session.store.get_theme().await.unwrap(), Theme::Dark);
    assert!(session.document.has_marker(DARK_MARKER));
}

#[tokio::test]
async fn go_to_unknown_view_renders_home() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    let output = run(&mut session, "go nowhere\nquit\n").await;

    assert_eq!(session.app.shell().state().view().as_str(), "nowhere");
    assert!(output.contains("== Decision Desk :: Home =="));
}

#[tokio::test]
async fn clear_empties_history() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    let output = run(
        &mut session,
        "new\nanalyze title=Once\nsave\nhistory\nclear\nquit\n",
    )
    .await;

    assert!(output.contains("No saved decisions yet."));
    assert!(session.store.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn failed_save_keeps_result_screen_with_alert() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;
    session.store.fail_writes(true);

    let output = run(&mut session, "new\nanalyze title=Doomed\nsave\nquit\n").await;

    assert!(output.contains("Could not save decision"));
    assert!(session.app.shell().state().view().is(View::Result));
}

#[tokio::test]
async fn end_of_input_stops_the_loop() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    let output = run(&mut session, "").await;

    assert!(output.contains("Welcome back, Ada."));
    assert!(output.ends_with("> "));
}

#[tokio::test]
async fn help_lists_commands_for_current_view() {
    let mut session = mount(InMemoryStore::with_profile(ada())).await;

    let output = run(&mut session, "settings\nhelp\nquit\n").await;

    assert!(output.contains("toggle      switch between light and dark"));
}

#[tokio::test]
async fn crashed_screen_shows_fallback_until_reload() {
    let session = mount(InMemoryStore::with_profile(ada())).await;
    let mut app = session.app;
    let mut screens = CrashingSettings(session.screens);

    let script = "settings\ngo home\ndetails\nreload\nquit\n";
    let mut console = Console::new(script.as_bytes(), Vec::new(), "> ");
    console.run(&mut app, &mut screens).await.unwrap();
    let output = String::from_utf8(console.into_writer()).unwrap();

    // Navigation is not offered by the fallback; the notice stays up
    let (before_reload, after_reload) = output.rsplit_once("Something went wrong").unwrap();
    assert!(before_reload.contains("Something went wrong"));
    assert!(output.contains("Type 'reload' to restart"));
    assert!(after_reload.contains("settings screen crashed"));
    assert!(after_reload.contains("Welcome back, Ada."));

    assert!(app.boundary().status().is_healthy());
    assert!(app.shell().state().view().is(View::Home));
}
