//! Text screens for the terminal.
//!
//! The history screen reads from [`DecisionHistory`], which is async, while
//! rendering is not. The console calls [`ConsoleScreens::refresh_history`]
//! before rendering that screen; a failed load is reported by the screen
//! itself as a `RenderError`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::boundary::FallbackNotice;
use crate::domain::shell::{
    Alert, AlertKind, DecisionData, SavedDecision, Theme, UserProfile, View, ViewKey, DARK_MARKER,
};
use crate::ports::{
    DecisionHistory, DocumentRoot, Frame, RenderError, ScreenRenderer, StorageError,
};

use super::ConsoleScreens;

const NAV_HINT: &str = "go home | go new-decision | go history | go settings | help | quit";

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";

/// ANSI colors for one theme.
struct Palette {
    accent: &'static str,
    muted: &'static str,
}

const LIGHT: Palette = Palette {
    accent: "\x1b[34m",
    muted: "\x1b[90m",
};

const DARK: Palette = Palette {
    accent: "\x1b[96m",
    muted: "\x1b[37m",
};

pub struct TerminalScreens {
    history: Arc<dyn DecisionHistory>,
    document: Arc<dyn DocumentRoot>,
    entries: Vec<SavedDecision>,
    history_error: Option<String>,
    color: bool,
    details_expanded: bool,
}

impl TerminalScreens {
    pub fn new(
        history: Arc<dyn DecisionHistory>,
        document: Arc<dyn DocumentRoot>,
        color: bool,
    ) -> Self {
        Self {
            history,
            document,
            entries: Vec::new(),
            history_error: None,
            color,
            details_expanded: false,
        }
    }

    fn palette(&self) -> &'static Palette {
        if self.document.has_marker(DARK_MARKER) {
            &DARK
        } else {
            &LIGHT
        }
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{}{}{}", code, text, RESET)
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn accent(&self, text: &str) -> String {
        self.paint(self.palette().accent, text)
    }

    fn muted(&self, text: &str) -> String {
        self.paint(self.palette().muted, text)
    }

    fn alert_line(&self, alert: &Alert) -> String {
        let code = match alert.kind {
            AlertKind::Info => "\x1b[36m",
            AlertKind::Success => "\x1b[32m",
            AlertKind::Warning => "\x1b[33m",
            AlertKind::Error => "\x1b[31m",
        };
        format!(
            "{} {}  {}",
            self.paint(code, &format!("[{}]", alert.kind.label())),
            alert.message,
            self.muted("(dismiss)")
        )
    }

    fn record_lines<'a>(
        &self,
        fields: impl Iterator<Item = (&'a String, &'a serde_json::Value)>,
    ) -> Vec<String> {
        fields
            .map(|(key, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                format!("  {}: {}", self.muted(key), value)
            })
            .collect()
    }
}

fn display_name(profile: Option<&UserProfile>) -> Option<String> {
    profile
        .and_then(|p| p.text("name"))
        .filter(|name| !name.trim().is_empty())
}

impl ScreenRenderer for TerminalScreens {
    fn loading(&self) -> Result<Frame, RenderError> {
        Ok(Frame::new().line(self.muted("Loading your workspace...")))
    }

    fn onboarding(&self) -> Result<Frame, RenderError> {
        Ok(Frame::new()
            .line(self.bold("Welcome to Decision Desk"))
            .line("Tell us a little about yourself to get started.")
            .line("")
            .line(format!(
                "  {}",
                self.accent(r#"done name="Your Name" role=... goals=..."#)
            ))
            .line(self.muted("  A JSON object works too: done {\"name\": \"...\"}")))
    }

    fn home(&self, profile: Option<&UserProfile>) -> Result<Frame, RenderError> {
        let greeting = match display_name(profile) {
            Some(name) => format!("Welcome back, {}.", name),
            None => "Welcome back.".to_string(),
        };
        Ok(Frame::new()
            .line(self.bold(&greeting))
            .line("")
            .line(format!("  {}  start a new decision", self.accent("new     ")))
            .line(format!("  {}  review saved decisions", self.accent("history ")))
            .line(format!("  {}  preferences", self.accent("settings"))))
    }

    fn decision_form(&self, profile: Option<&UserProfile>) -> Result<Frame, RenderError> {
        let mut frame = Frame::new().line(self.bold("What are you deciding?"));
        if let Some(name) = display_name(profile) {
            frame.push(self.muted(&format!("Analysis will be tailored for {}.", name)));
        }
        frame.push("");
        frame.push(format!(
            "  {}",
            self.accent(r#"analyze title="..." options="a, b" criteria="...""#)
        ));
        frame.push(format!("  {}  return", self.accent("back")));
        Ok(frame)
    }

    fn analysis_result(
        &self,
        decision: Option<&DecisionData>,
        profile: Option<&UserProfile>,
    ) -> Result<Frame, RenderError> {
        let Some(decision) = decision else {
            return Ok(Frame::new()
                .line("No decision to show.")
                .line(format!("  {}  return", self.accent("back"))));
        };

        let title = decision.text("title").unwrap_or_else(|| "Untitled decision".to_string());
        let mut frame = Frame::new().line(self.bold(&title));
        if let Some(name) = display_name(profile) {
            frame.push(self.muted(&format!("Prepared for {}", name)));
        }
        frame.push("");
        let fields = decision.fields().filter(|(key, _)| key.as_str() != "title");
        for line in self.record_lines(fields) {
            frame.push(line);
        }
        frame.push("");
        frame.push(format!("  {}  keep this decision", self.accent("save")));
        frame.push(format!("  {}  return", self.accent("back")));
        Ok(frame)
    }

    fn history(&self) -> Result<Frame, RenderError> {
        if let Some(e) = &self.history_error {
            return Err(RenderError::new(format!("Could not load decision history: {}", e)));
        }

        let mut frame = Frame::new().line(self.bold("Saved decisions"));
        if self.entries.is_empty() {
            frame.push(self.muted("No saved decisions yet."));
        }
        for entry in &self.entries {
            frame.push(format!(
                "  {}  {}  {}",
                self.muted(&entry.id.short()),
                entry.saved_at.display_short(),
                entry.title()
            ));
        }
        Ok(frame)
    }

    fn settings(&self, theme: Theme) -> Result<Frame, RenderError> {
        Ok(Frame::new()
            .line(self.bold("Settings"))
            .line(format!("  Theme: {}", self.accent(theme.as_str())))
            .line("")
            .line(format!(
                "  {}  switch to {}",
                self.accent("toggle"),
                theme.toggled()
            ))
            .line(format!("  {}  return", self.accent("back"))))
    }

    fn layout(
        &self,
        current: &ViewKey,
        alert: Option<&Alert>,
        body: Frame,
    ) -> Result<Frame, RenderError> {
        let title = current.resolve().effective().title();
        let heading = format!("== Decision Desk :: {} ==", title);
        let mut frame = Frame::new().line(self.accent(&heading));
        if let Some(alert) = alert {
            frame.push(self.alert_line(alert));
        }
        frame.push("");
        frame.append(body);
        frame.push("");
        frame.push(self.muted(NAV_HINT));
        Ok(frame)
    }

    fn fallback(&self, notice: &FallbackNotice) -> Frame {
        let mut frame = Frame::new()
            .line(self.paint("\x1b[31m", &notice.heading))
            .line(notice.message.clone())
            .line("")
            .line(format!("[ {} ]  type 'reload'", notice.action));
        if self.details_expanded {
            frame.push(self.muted("Details:"));
            frame.push(format!("  {}", notice.details));
        } else {
            frame.push(self.muted("Type 'details' to show technical details."));
        }
        frame
    }
}

#[async_trait]
impl ConsoleScreens for TerminalScreens {
    async fn refresh_history(&mut self) {
        match self.history.list().await {
            Ok(entries) => {
                self.entries = entries;
                self.history_error = None;
            }
            Err(e) => {
                warn!(error = %e, "could not load decision history");
                self.history_error = Some(e.to_string());
            }
        }
    }

    async fn save_decision(
        &mut self,
        decision: &DecisionData,
    ) -> Result<SavedDecision, StorageError> {
        let entry = SavedDecision::new(decision.clone());
        self.history.append(entry.clone()).await?;
        info!(id = %entry.id, "decision saved");
        self.entries.insert(0, entry.clone());
        Ok(entry)
    }

    async fn clear_history(&mut self) -> Result<(), StorageError> {
        self.history.clear().await?;
        info!(cleared = self.entries.len(), "decision history cleared");
        self.entries.clear();
        Ok(())
    }

    fn toggle_details(&mut self) {
        self.details_expanded = !self.details_expanded;
    }

    fn reset(&mut self) {
        self.details_expanded = false;
    }

    fn help(&self, view: View) -> Frame {
        let mut frame = Frame::new().line(self.bold("Commands"));
        let specific: &[&str] = match view {
            View::Loading => &[],
            View::Onboarding => &[r#"done name="Your Name" [key=value ...]   finish onboarding"#],
            View::Home | View::Analysis => &[
                "new         start a new decision",
                "history     list saved decisions",
                "settings    change preferences",
            ],
            View::NewDecision => &[
                r#"analyze title="..." [key=value ...]   analyze a decision"#,
                "back        return to the previous screen",
            ],
            View::Result => &[
                "save        keep this decision",
                "back        return to the previous screen",
            ],
            View::History => &[
                "new         start a new decision",
                "clear       forget all saved decisions",
                "back        return to the previous screen",
            ],
            View::Settings => &[
                "toggle      switch between light and dark",
                "back        return to the previous screen",
            ],
        };
        for line in specific {
            frame.push(format!("  {}", line));
        }
        for line in [
            "go <view>   jump to a view",
            "dismiss     hide the current alert",
            "reload      restart from saved preferences",
            "quit        leave",
        ] {
            frame.push(format!("  {}", line));
        }
        frame
    }
}
