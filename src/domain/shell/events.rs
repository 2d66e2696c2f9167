//! Outputs screens can produce.
//!
//! Each variant corresponds to a callback the shell hands to a screen. Screens
//! never mutate session state directly; they emit one of these and the shell
//! applies the matching transition.

use super::{DecisionData, UserProfile, ViewKey};

#[derive(Debug, Clone, PartialEq)]
pub enum ShellEvent {
    /// Onboarding finished with a profile.
    OnboardingCompleted(UserProfile),
    /// Any screen or the layout asked for a view.
    Navigate(ViewKey),
    /// Back from form, result, history or settings.
    Back,
    /// The decision form submitted a decision for analysis.
    Analyze(DecisionData),
    /// The result screen finished its own save.
    Saved,
    /// A screen reported a non-fatal error.
    ReportError(String),
    ToggleTheme,
    DismissAlert,
}

impl ShellEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            ShellEvent::OnboardingCompleted(_) => "onboarding_completed",
            ShellEvent::Navigate(_) => "navigate",
            ShellEvent::Back => "back",
            ShellEvent::Analyze(_) => "analyze",
            ShellEvent::Saved => "saved",
            ShellEvent::ReportError(_) => "report_error",
            ShellEvent::ToggleTheme => "toggle_theme",
            ShellEvent::DismissAlert => "dismiss_alert",
        }
    }
}
