//! Console - the read/render loop driving an [`App`] from a line-based stream.

use async_trait::async_trait;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::application::App;
use crate::domain::shell::{DecisionData, SavedDecision, ShellEvent, View};
use crate::ports::{Frame, ScreenRenderer, StorageError};

use super::input::{parse_command, parse_fallback_command, Command};

/// Screens the console can drive: rendering plus the screen-local actions
/// that never reach the shell.
#[async_trait]
pub trait ConsoleScreens: ScreenRenderer + Send {
    /// Reloads saved decisions before the history screen renders.
    async fn refresh_history(&mut self);

    /// Keeps a decision from the result screen.
    async fn save_decision(
        &mut self,
        decision: &DecisionData,
    ) -> Result<SavedDecision, StorageError>;

    /// Forgets every saved decision.
    async fn clear_history(&mut self) -> Result<(), StorageError>;

    /// Expands or collapses the fallback's technical details.
    fn toggle_details(&mut self);

    /// Collapses the fallback details after a reload.
    fn reset(&mut self);

    /// Commands available on `view`.
    fn help(&self, view: View) -> Frame;
}

const FALLBACK_HINT: &str = "Type 'reload' to restart, 'details' for more, or 'quit'.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Console<R, W> {
    reader: R,
    writer: W,
    prompt: String,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(reader: R, writer: W, prompt: impl Into<String>) -> Self {
        Self {
            reader,
            writer,
            prompt: prompt.into(),
        }
    }

    /// Gives back the writer, for inspecting output.
    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Renders, prompts and applies input until `quit` or end of input.
    pub async fn run<S>(&mut self, app: &mut App, screens: &mut S) -> io::Result<()>
    where
        S: ConsoleScreens,
    {
        loop {
            let healthy = app.boundary().status().is_healthy();
            if healthy && app.shell().state().view().is(View::History) {
                screens.refresh_history().await;
            }

            let frame = app.render(&*screens);
            self.write_frame(&frame).await?;
            self.writer.write_all(self.prompt.as_bytes()).await?;
            self.writer.flush().await?;

            let mut line = String::new();
            if self.reader.read_line(&mut line).await? == 0 {
                info!("input closed");
                return Ok(());
            }

            if self.step(app, screens, &line).await? == Flow::Quit {
                info!("quit requested");
                return Ok(());
            }
        }
    }

    async fn step<S>(&mut self, app: &mut App, screens: &mut S, line: &str) -> io::Result<Flow>
    where
        S: ConsoleScreens,
    {
        let command = if app.boundary().status().is_healthy() {
            let view = app.shell().state().view().resolve().effective();
            match parse_command(view, line) {
                Ok(Some(command)) => command,
                Ok(None) => return Ok(Flow::Continue),
                Err(e) => Command::Shell(ShellEvent::ReportError(e.to_string())),
            }
        } else {
            match parse_fallback_command(line) {
                Some(command) => command,
                None => {
                    self.write_frame(&Frame::new().line(FALLBACK_HINT)).await?;
                    return Ok(Flow::Continue);
                }
            }
        };

        match command {
            Command::Shell(event) => app.handle(event).await,
            Command::SaveDecision => self.save_decision(app, screens).await,
            Command::ClearHistory => {
                if let Err(e) = screens.clear_history().await {
                    app.handle(ShellEvent::ReportError(format!("Could not clear history: {}", e)))
                        .await;
                }
            }
            Command::ToggleDetails => screens.toggle_details(),
            Command::Reload => {
                app.reload().await;
                screens.reset();
            }
            Command::Help => {
                let view = app.shell().state().view().resolve().effective();
                self.write_frame(&screens.help(view)).await?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    async fn save_decision<S: ConsoleScreens>(&mut self, app: &mut App, screens: &mut S) {
        let Some(decision) = app.shell().state().current_decision().cloned() else {
            app.handle(ShellEvent::ReportError("There is no decision to save.".to_string()))
                .await;
            return;
        };

        match screens.save_decision(&decision).await {
            Ok(saved) => {
                debug!(id = %saved.id, "result screen reporting save");
                app.handle(ShellEvent::Saved).await;
            }
            Err(e) => {
                app.handle(ShellEvent::ReportError(format!("Could not save decision: {}", e)))
                    .await;
            }
        }
    }

    async fn write_frame(&mut self, frame: &Frame) -> io::Result<()> {
        self.writer.write_all(frame.to_string().as_bytes()).await
    }
}
