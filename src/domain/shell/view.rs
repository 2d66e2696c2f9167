//! Views the shell can route to.
//!
//! `View` is the closed set of screens. `ViewKey` is what navigation actually
//! stores: any string a screen asked for. Keys are never validated when they
//! are stored; they are resolved against `View` at render time, and anything
//! unrecognized renders the home screen.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// One of the fixed screens of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum View {
    Loading,
    Onboarding,
    Home,
    NewDecision,
    Analysis,
    Result,
    History,
    Settings,
}

impl View {
    /// Every view, in declaration order.
    pub const ALL: [View; 8] = [
        View::Loading,
        View::Onboarding,
        View::Home,
        View::NewDecision,
        View::Analysis,
        View::Result,
        View::History,
        View::Settings,
    ];

    /// Returns the routing key for this view.
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Loading => "loading",
            View::Onboarding => "onboarding",
            View::Home => "home",
            View::NewDecision => "new-decision",
            View::Analysis => "analysis",
            View::Result => "result",
            View::History => "history",
            View::Settings => "settings",
        }
    }

    /// Human readable title used in the layout header.
    pub fn title(&self) -> &'static str {
        match self {
            View::Loading => "Loading",
            View::Onboarding => "Welcome",
            View::Home => "Home",
            View::NewDecision => "New Decision",
            View::Analysis => "Analysis",
            View::Result => "Result",
            View::History => "History",
            View::Settings => "Settings",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        View::ALL
            .into_iter()
            .find(|view| view.as_str() == s)
            .ok_or_else(|| ValidationError::invalid_format("view", format!("unknown view '{}'", s)))
    }
}

/// Outcome of resolving a stored key against the known views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolved {
    Known(View),
    /// The key names no view; render as home.
    Fallback,
}

impl Resolved {
    /// The view whose screen gets rendered.
    pub fn effective(&self) -> View {
        match self {
            Resolved::Known(view) => *view,
            Resolved::Fallback => View::Home,
        }
    }
}

/// A navigation target as stored in session state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ViewKey(String);

impl ViewKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Resolves the key against the known views.
    pub fn resolve(&self) -> Resolved {
        match self.0.parse::<View>() {
            Ok(view) => Resolved::Known(view),
            Err(_) => Resolved::Fallback,
        }
    }

    /// Returns true if the key currently names `view`.
    pub fn is(&self, view: View) -> bool {
        self.0 == view.as_str()
    }
}

impl From<View> for ViewKey {
    fn from(view: View) -> Self {
        Self(view.as_str().to_string())
    }
}

impl From<&str> for ViewKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ViewKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl fmt::Display for ViewKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn every_view_round_trips_through_its_key() {
        for view in View::ALL {
            assert_eq!(view.as_str().parse::<View>().unwrap(), view);
            assert_eq!(ViewKey::from(view).resolve(), Resolved::Known(view));
        }
    }

    #[test]
    fn unknown_key_resolves_to_fallback_home() {
        let key = ViewKey::new("dashboard");
        assert_eq!(key.resolve(), Resolved::Fallback);
        assert_eq!(key.resolve().effective(), View::Home);
    }

    #[test]
    fn keys_are_case_sensitive() {
        assert_eq!(ViewKey::new("Home").resolve(), Resolved::Fallback);
    }

    #[test]
    fn view_serializes_as_kebab_case() {
        let json = serde_json::to_string(&View::NewDecision).unwrap();
        assert_eq!(json, "\"new-decision\"");
    }

    #[test]
    fn parse_error_names_the_key() {
        let err = "nowhere".parse::<View>().unwrap_err();
        assert!(err.to_string().contains("unknown view 'nowhere'"));
    }

    proptest! {
        #[test]
        fn unrecognized_keys_always_render_home(key in "\\PC*") {
            prop_assume!(View::ALL.iter().all(|v| v.as_str() != key));
            prop_assert_eq!(ViewKey::new(key).resolve().effective(), View::Home);
        }
    }
}
