//! Session state owned by the application shell.

use super::{Alert, DecisionData, Theme, UserProfile, View, ViewKey};

/// The five independent pieces of session state.
///
/// Fields are private; the only way to change them is through the named
/// transitions below. The shell hands out `&SessionState` to readers.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    view: ViewKey,
    profile: Option<UserProfile>,
    current_decision: Option<DecisionData>,
    alert: Option<Alert>,
    theme: Theme,
}

impl SessionState {
    /// Cold-start state: loading, nothing hydrated, light theme.
    pub fn new() -> Self {
        Self {
            view: View::Loading.into(),
            profile: None,
            current_decision: None,
            alert: None,
            theme: Theme::default(),
        }
    }

    pub fn view(&self) -> &ViewKey {
        &self.view
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    pub fn current_decision(&self) -> Option<&DecisionData> {
        self.current_decision.as_ref()
    }

    pub fn alert(&self) -> Option<&Alert> {
        self.alert.as_ref()
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Stores the target as-is; unknown keys are corrected at render time.
    pub fn navigate(&mut self, target: ViewKey) {
        self.view = target;
    }

    /// Result of startup hydration: home with a profile, onboarding without.
    pub fn hydrate(&mut self, profile: Option<UserProfile>, theme: Theme) {
        self.view = match profile {
            Some(_) => View::Home.into(),
            None => View::Onboarding.into(),
        };
        self.profile = profile;
        self.theme = theme;
    }

    pub fn complete_onboarding(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
        self.view = View::Home.into();
    }

    /// Replaces any previous decision and shows the result screen.
    pub fn submit_decision(&mut self, decision: DecisionData) {
        self.current_decision = Some(decision);
        self.view = View::Result.into();
    }

    /// Replaces any visible alert; alerts are not queued.
    pub fn raise_alert(&mut self, alert: Alert) {
        self.alert = Some(alert);
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
