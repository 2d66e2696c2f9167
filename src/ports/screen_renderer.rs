//! Screen Renderer Port - the screens the shell routes between.
//!
//! One method per screen, each taking exactly the data that screen needs from
//! session state. Callbacks flow the other way as `ShellEvent`s, so they do not
//! appear here.

use std::fmt;

use crate::domain::boundary::FallbackNotice;
use crate::domain::shell::{Alert, DecisionData, Theme, UserProfile, ViewKey};

/// Rendered output: a list of lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(mut self, line: impl Into<String>) -> Self {
        self.lines.push(line.into());
        self
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Appends another frame below this one.
    pub fn append(&mut self, other: Frame) {
        self.lines.extend(other.lines);
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.lines {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

/// An expected failure while rendering a screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct RenderError {
    pub message: String,
}

impl RenderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Port for the screens and the layout that frames them.
pub trait ScreenRenderer {
    fn loading(&self) -> Result<Frame, RenderError>;

    fn onboarding(&self) -> Result<Frame, RenderError>;

    fn home(&self, profile: Option<&UserProfile>) -> Result<Frame, RenderError>;

    fn decision_form(&self, profile: Option<&UserProfile>) -> Result<Frame, RenderError>;

    fn analysis_result(
        &self,
        decision: Option<&DecisionData>,
        profile: Option<&UserProfile>,
    ) -> Result<Frame, RenderError>;

    /// The history screen loads saved decisions itself.
    fn history(&self) -> Result<Frame, RenderError>;

    fn settings(&self, theme: Theme) -> Result<Frame, RenderError>;

    /// Wraps a screen with navigation chrome and the alert overlay.
    fn layout(
        &self,
        current: &ViewKey,
        alert: Option<&Alert>,
        body: Frame,
    ) -> Result<Frame, RenderError>;

    /// Shown by a tripped error boundary. Not itself guarded.
    fn fallback(&self, notice: &FallbackNotice) -> Frame;
}
