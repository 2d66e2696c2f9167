//! AppShell - owns session state and routes between screens.
//!
//! Every change to session state goes through one of the named transitions
//! here. Only two of them touch storage: onboarding completion (profile) and
//! theme application (theme).

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domain::shell::{
    Alert, DecisionData, Resolved, SessionState, ShellEvent, Theme, UserProfile, View, ViewKey,
    DARK_MARKER,
};
use crate::ports::{
    DocumentRoot, Frame, PreferenceStore, RenderError, ScreenRenderer, StorageError,
};

/// Message shown when a stored profile exists but cannot be read.
pub const UNREADABLE_PROFILE_MESSAGE: &str =
    "Your saved profile could not be read. Please complete onboarding again.";

/// Errors from shell transitions that touch storage.
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("Could not save your profile: {0}")]
    ProfileNotSaved(#[source] StorageError),

    #[error("Could not save your theme preference: {0}")]
    ThemeNotSaved(#[source] StorageError),
}

/// The application shell.
pub struct AppShell {
    state: SessionState,
    store: Arc<dyn PreferenceStore>,
    document: Arc<dyn DocumentRoot>,
}

impl AppShell {
    /// Creates an unhydrated shell; it renders the loading screen until
    /// [`AppShell::hydrate`] runs.
    pub fn new(store: Arc<dyn PreferenceStore>, document: Arc<dyn DocumentRoot>) -> Self {
        Self {
            state: SessionState::new(),
            store,
            document,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Startup: read profile and theme, pick the first view, apply the theme.
    ///
    /// Read failures degrade rather than abort: an unreadable profile routes to
    /// onboarding with an error alert, an unreadable theme falls back to the
    /// default. Only the theme write can fail this call, and by then the state
    /// is already hydrated.
    pub async fn hydrate(&mut self) -> Result<(), ShellError> {
        let (profile, profile_unreadable) = match self.store.get_profile().await {
            Ok(profile) => (profile, false),
            Err(e) => {
                warn!(error = %e, "stored profile unreadable, routing to onboarding");
                (None, true)
            }
        };

        let theme = self.store.get_theme().await.unwrap_or_else(|e| {
            warn!(error = %e, "stored theme unreadable, using default");
            Theme::default()
        });

        info!(has_profile = profile.is_some(), %theme, "session hydrated");
        self.state.hydrate(profile, theme);
        if profile_unreadable {
            self.state.raise_alert(Alert::error(UNREADABLE_PROFILE_MESSAGE));
        }

        self.apply_theme().await
    }

    /// Persists the profile, then keeps it for the session and goes home.
    ///
    /// If the write fails the session is left untouched.
    pub async fn complete_onboarding(&mut self, profile: UserProfile) -> Result<(), ShellError> {
        self.store
            .save_profile(&profile)
            .await
            .map_err(ShellError::ProfileNotSaved)?;

        info!("onboarding completed");
        self.state.complete_onboarding(profile);
        Ok(())
    }

    /// Stores any target; unknown keys render as home.
    pub fn navigate(&mut self, target: impl Into<ViewKey>) {
        let target = target.into();
        if target.resolve() == Resolved::Fallback {
            debug!(
                from = %self.state.view(),
                to = %target,
                "navigating to unknown view, home will render"
            );
        } else {
            debug!(from = %self.state.view(), to = %target, "navigating");
        }
        self.state.navigate(target);
    }

    pub fn go_back(&mut self) {
        self.navigate(View::Home);
    }

    /// Keeps the submitted decision and shows the result screen.
    pub fn submit_decision(&mut self, decision: DecisionData) {
        debug!(fields = decision.fields().count(), "decision submitted");
        self.state.submit_decision(decision);
    }

    pub fn raise_alert(&mut self, alert: Alert) {
        if let Some(previous) = self.state.alert() {
            debug!(replaced = %previous.message, "alert replaced");
        }
        self.state.raise_alert(alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.state.dismiss_alert();
    }

    /// Switches theme and applies it. Returns the new theme.
    pub async fn toggle_theme(&mut self) -> Result<Theme, ShellError> {
        let theme = self.state.theme().toggled();
        self.state.set_theme(theme);
        self.apply_theme().await?;
        Ok(theme)
    }

    /// Sets the document marker and persists the theme. Idempotent.
    async fn apply_theme(&self) -> Result<(), ShellError> {
        let theme = self.state.theme();
        self.document.set_marker(DARK_MARKER, theme.is_dark());
        self.store
            .save_theme(theme)
            .await
            .map_err(ShellError::ThemeNotSaved)?;
        debug!(%theme, "theme applied");
        Ok(())
    }

    /// Applies the transition a screen's callback stands for.
    pub async fn dispatch(&mut self, event: ShellEvent) -> Result<(), ShellError> {
        debug!(event = event.name(), "dispatching");
        match event {
            ShellEvent::OnboardingCompleted(profile) => self.complete_onboarding(profile).await?,
            ShellEvent::Navigate(target) => self.navigate(target),
            ShellEvent::Back => self.go_back(),
            ShellEvent::Analyze(decision) => self.submit_decision(decision),
            // The result screen persists on its own before emitting this
            ShellEvent::Saved => self.go_back(),
            ShellEvent::ReportError(message) => self.raise_alert(Alert::error(message)),
            ShellEvent::ToggleTheme => {
                self.toggle_theme().await?;
            }
            ShellEvent::DismissAlert => self.dismiss_alert(),
        }
        Ok(())
    }

    /// Renders the active screen inside the layout.
    ///
    /// A `RenderError` from any screen is caught here and replaced by an inline
    /// critical-error frame. Panics are not caught; they belong to the error
    /// boundary above the shell.
    pub fn render(&self, screens: &dyn ScreenRenderer) -> Frame {
        match self.compose(screens) {
            Ok(frame) => frame,
            Err(e) => {
                error!(error = %e, view = %self.state.view(), "App component error");
                critical_error_frame(&e)
            }
        }
    }

    fn compose(&self, screens: &dyn ScreenRenderer) -> Result<Frame, RenderError> {
        let body = self.render_view(screens)?;
        screens.layout(self.state.view(), self.state.alert(), body)
    }

    fn render_view(&self, screens: &dyn ScreenRenderer) -> Result<Frame, RenderError> {
        let profile = self.state.profile();
        match self.state.view().resolve() {
            Resolved::Known(View::Loading) => screens.loading(),
            Resolved::Known(View::Onboarding) => screens.onboarding(),
            Resolved::Known(View::Home) => screens.home(profile),
            Resolved::Known(View::NewDecision) => screens.decision_form(profile),
            Resolved::Known(View::Result) => {
                screens.analysis_result(self.state.current_decision(), profile)
            }
            Resolved::Known(View::History) => screens.history(),
            Resolved::Known(View::Settings) => screens.settings(self.state.theme()),
            // Analysis has no screen of its own; it shares the default arm with
            // unknown keys.
            Resolved::Known(View::Analysis) | Resolved::Fallback => screens.home(profile),
        }
    }
}

/// Minimal inline message used when the shell cannot build its view.
pub fn critical_error_frame(error: &RenderError) -> Frame {
    Frame::new().line(format!("Critical Error: {}", error.message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryStore, MarkerDocument};
    use crate::domain::boundary::FallbackNotice;
    use crate::domain::shell::AlertKind;
    use serde_json::json;
    use std::cell::RefCell;

    /// Records which screen was asked to render and with what.
    #[derive(Default)]
    struct RecordingScreens {
        calls: RefCell<Vec<String>>,
        fail_history: bool,
    }

    impl RecordingScreens {
        fn record(&self, call: impl Into<String>) -> Result<Frame, RenderError> {
            let call = call.into();
            self.calls.borrow_mut().push(call.clone());
            Ok(Frame::new().line(call))
        }

        fn last(&self) -> String {
            self.calls.borrow().last().cloned().unwrap_or_default()
        }
    }

    impl ScreenRenderer for RecordingScreens {
        fn loading(&self) -> Result<Frame, RenderError> {
            self.record("loading")
        }

        fn onboarding(&self) -> Result<Frame, RenderError> {
            self.record("onboarding")
        }

        fn home(&self, profile: Option<&UserProfile>) -> Result<Frame, RenderError> {
            let name = profile.and_then(|p| p.text("name")).unwrap_or_default();
            self.record(format!("home:{}", name))
        }

        fn decision_form(&self, _profile: Option<&UserProfile>) -> Result<Frame, RenderError> {
            self.record("decision_form")
        }

        fn analysis_result(
            &self,
            decision: Option<&DecisionData>,
            _profile: Option<&UserProfile>,
        ) -> Result<Frame, RenderError> {
            let title = decision.and_then(|d| d.text("title")).unwrap_or_default();
            self.record(format!("result:{}", title))
        }

        fn history(&self) -> Result<Frame, RenderError> {
            if self.fail_history {
                return Err(RenderError::new("history unavailable"));
            }
            self.record("history")
        }

        fn settings(&self, theme: Theme) -> Result<Frame, RenderError> {
            self.record(format!("settings:{}", theme))
        }

        fn layout(
            &self,
            current: &ViewKey,
            alert: Option<&Alert>,
            mut body: Frame,
        ) -> Result<Frame, RenderError> {
            body.push(format!("layout:{}", current));
            if let Some(alert) = alert {
                body.push(format!("alert:{}:{}", alert.kind, alert.message));
            }
            Ok(body)
        }

        fn fallback(&self, notice: &FallbackNotice) -> Frame {
            Frame::new().line(notice.heading.clone())
        }
    }

    fn profile() -> UserProfile {
        UserProfile::from_value(json!({"name": "Ada"})).unwrap()
    }

    fn decision(title: &str) -> DecisionData {
        DecisionData::from_value(json!({ "title": title })).unwrap()
    }

    fn shell_with(store: &InMemoryStore) -> (AppShell, Arc<MarkerDocument>) {
        let document = Arc::new(MarkerDocument::new());
        let shell = AppShell::new(Arc::new(store.clone()), document.clone());
        (shell, document)
    }

    #[tokio::test]
    async fn renders_loading_before_hydration() {
        let store = InMemoryStore::new();
        let (shell, _) = shell_with(&store);
        let screens = RecordingScreens::default();

        shell.render(&screens);

        assert_eq!(screens.calls.borrow()[0], "loading");
        assert_eq!(store.read_count(), 0);
    }

    #[tokio::test]
    async fn hydrate_without_profile_routes_to_onboarding() {
        let store = InMemoryStore::new();
        let (mut shell, _) = shell_with(&store);

        shell.hydrate().await.unwrap();

        assert!(shell.state().view().is(View::Onboarding));
        assert_eq!(store.read_count(), 2);
    }

    #[tokio::test]
    async fn hydrate_with_profile_routes_home_and_applies_theme() {
        let store = InMemoryStore::with_profile(profile()).seeded_theme(Theme::Dark);
        let (mut shell, document) = shell_with(&store);

        shell.hydrate().await.unwrap();

        assert!(shell.state().view().is(View::Home));
        assert_eq!(shell.state().profile(), Some(&profile()));
        assert_eq!(shell.state().theme(), Theme::Dark);
        assert!(document.has_marker(DARK_MARKER));
    }

    #[tokio::test]
    async fn complete_onboarding_persists_and_goes_home() {
        let store = InMemoryStore::new();
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();

        shell.complete_onboarding(profile()).await.unwrap();

        assert_eq!(store.get_profile().await.unwrap(), Some(profile()));
        assert_eq!(shell.state().profile(), Some(&profile()));
        assert!(shell.state().view().is(View::Home));
    }

    #[tokio::test]
    async fn failed_profile_write_leaves_session_untouched() {
        let store = InMemoryStore::new();
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        store.fail_writes(true);

        let result = shell.complete_onboarding(profile()).await;

        assert!(matches!(result, Err(ShellError::ProfileNotSaved(_))));
        assert!(shell.state().profile().is_none());
        assert!(shell.state().view().is(View::Onboarding));
    }

    #[tokio::test]
    async fn toggle_theme_twice_restores_and_persists() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, document) = shell_with(&store);
        shell.hydrate().await.unwrap();

        assert_eq!(shell.toggle_theme().await.unwrap(), Theme::Dark);
        assert!(document.has_marker(DARK_MARKER));
        assert_eq!(store.stored_theme().await, Some(Theme::Dark));

        assert_eq!(shell.toggle_theme().await.unwrap(), Theme::Light);
        assert!(!document.has_marker(DARK_MARKER));
        assert_eq!(store.stored_theme().await, Some(Theme::Light));
    }

    #[tokio::test]
    async fn submitting_decision_shows_result() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        let screens = RecordingScreens::default();

        shell.dispatch(ShellEvent::Analyze(decision("Move"))).await.unwrap();
        shell.render(&screens);

        assert_eq!(shell.state().current_decision(), Some(&decision("Move")));
        assert_eq!(screens.calls.borrow()[0], "result:Move");
    }

    #[tokio::test]
    async fn saved_and_back_both_go_home_without_writes() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        let writes_after_hydrate = store.write_count();

        shell.dispatch(ShellEvent::Analyze(decision("A"))).await.unwrap();
        shell.dispatch(ShellEvent::Saved).await.unwrap();
        assert!(shell.state().view().is(View::Home));

        shell.dispatch(ShellEvent::Analyze(decision("B"))).await.unwrap();
        shell.dispatch(ShellEvent::Back).await.unwrap();
        assert!(shell.state().view().is(View::Home));

        assert_eq!(store.write_count(), writes_after_hydrate);
    }

    #[tokio::test]
    async fn unknown_view_renders_home_but_is_stored() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        let screens = RecordingScreens::default();

        shell.navigate("reports");
        shell.render(&screens);

        assert_eq!(shell.state().view().as_str(), "reports");
        assert_eq!(screens.calls.borrow()[0], "home:Ada");
    }

    #[tokio::test]
    async fn analysis_view_renders_home() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        let screens = RecordingScreens::default();

        shell.navigate(View::Analysis);
        shell.render(&screens);

        assert_eq!(screens.calls.borrow()[0], "home:Ada");
    }

    #[tokio::test]
    async fn settings_receives_current_theme() {
        let store = InMemoryStore::with_profile(profile()).seeded_theme(Theme::Dark);
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        let screens = RecordingScreens::default();

        shell.navigate(View::Settings);
        shell.render(&screens);

        assert_eq!(screens.calls.borrow()[0], "settings:dark");
    }

    #[tokio::test]
    async fn report_error_raises_replacing_alert() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();

        shell.dispatch(ShellEvent::ReportError("first".into())).await.unwrap();
        shell.dispatch(ShellEvent::ReportError("second".into())).await.unwrap();

        let alert = shell.state().alert().unwrap();
        assert_eq!(alert.message, "second");
        assert_eq!(alert.kind, AlertKind::Error);

        shell.dispatch(ShellEvent::DismissAlert).await.unwrap();
        assert!(shell.state().alert().is_none());
    }

    #[tokio::test]
    async fn alert_does_not_change_view() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        shell.navigate(View::NewDecision);

        shell.dispatch(ShellEvent::ReportError("Title required".into())).await.unwrap();

        assert!(shell.state().view().is(View::NewDecision));
    }

    #[tokio::test]
    async fn render_error_becomes_inline_critical_message() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        let screens = RecordingScreens {
            fail_history: true,
            ..Default::default()
        };

        shell.navigate(View::History);
        let frame = shell.render(&screens);

        assert_eq!(frame.lines(), ["Critical Error: history unavailable"]);
    }

    #[tokio::test]
    async fn layout_carries_alert_overlay() {
        let store = InMemoryStore::with_profile(profile());
        let (mut shell, _) = shell_with(&store);
        shell.hydrate().await.unwrap();
        let screens = RecordingScreens::default();

        shell.raise_alert(Alert::info("Saved"));
        let frame = shell.render(&screens);

        assert!(frame.contains("layout:home"));
        assert!(frame.contains("alert:info:Saved"));
        assert_eq!(screens.last(), "home:Ada");
    }
}
