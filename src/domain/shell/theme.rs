//! Light/dark presentation theme.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Name of the document-root marker present while the dark theme is applied.
pub const DARK_MARKER: &str = "dark";

/// Presentation theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        self == Theme::Dark
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(ValidationError::invalid_format(
                "theme",
                format!("expected 'light' or 'dark', got '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn any_theme() -> impl Strategy<Value = Theme> {
        prop_oneof![Just(Theme::Light), Just(Theme::Dark)]
    }

    #[test]
    fn default_theme_is_light() {
        assert_eq!(Theme::default(), Theme::Light);
    }

    #[test]
    fn toggle_switches_between_themes() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn parses_known_names() {
        assert_eq!("dark".parse::<Theme>().unwrap(), Theme::Dark);
        assert_eq!(" light\n".parse::<Theme>().unwrap(), Theme::Light);
        assert!("sepia".parse::<Theme>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_yaml::to_string(&Theme::Dark).unwrap().trim(), "dark");
    }

    proptest! {
        #[test]
        fn toggling_twice_is_identity(theme in any_theme()) {
            prop_assert_eq!(theme.toggled().toggled(), theme);
        }

        #[test]
        fn toggle_never_fixes_a_point(theme in any_theme()) {
            prop_assert_ne!(theme.toggled(), theme);
        }
    }
}
