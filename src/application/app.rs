//! App - the mounted root: an error boundary wrapping the shell.

use std::convert::Infallible;
use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::shell::{Alert, ShellEvent};
use crate::ports::{DocumentRoot, Frame, PreferenceStore, ScreenRenderer};

use super::{AppShell, ErrorBoundary, Guarded};

pub struct App {
    shell: AppShell,
    boundary: ErrorBoundary,
    store: Arc<dyn PreferenceStore>,
    document: Arc<dyn DocumentRoot>,
}

impl App {
    /// Builds an unhydrated app; it renders the loading screen.
    pub fn new(store: Arc<dyn PreferenceStore>, document: Arc<dyn DocumentRoot>) -> Self {
        Self {
            shell: AppShell::new(store.clone(), document.clone()),
            boundary: ErrorBoundary::new(),
            store,
            document,
        }
    }

    /// Builds and hydrates an app in one step.
    pub async fn mount(store: Arc<dyn PreferenceStore>, document: Arc<dyn DocumentRoot>) -> Self {
        let mut app = Self::new(store, document);
        app.hydrate().await;
        app
    }

    /// Runs the shell's startup protocol. Persist failures become an alert
    /// unless hydration already raised one.
    pub async fn hydrate(&mut self) {
        if let Err(e) = self.shell.hydrate().await {
            warn!(error = %e, "theme could not be persisted during startup");
            if self.shell.state().alert().is_some() {
                // The unreadable-profile alert explains why onboarding is showing
                warn!("keeping the earlier startup alert over the theme failure");
            } else {
                self.shell.raise_alert(Alert::error(e.to_string()));
            }
        }
        info!(view = %self.shell.state().view(), "application mounted");
    }

    /// Full reload: discards the shell and the boundary and mounts fresh from storage.
    pub async fn reload(&mut self) {
        info!("reloading application");
        *self = Self::mount(self.store.clone(), self.document.clone()).await;
    }

    pub fn shell(&self) -> &AppShell {
        &self.shell
    }

    pub fn boundary(&self) -> &ErrorBoundary {
        &self.boundary
    }

    /// Renders through the boundary; a tripped boundary shows the fallback.
    pub fn render(&mut self, screens: &dyn ScreenRenderer) -> Frame {
        let shell = &self.shell;
        let context = format!("view={}", shell.state().view());

        match self
            .boundary
            .render(&context, || Ok::<_, Infallible>(shell.render(screens)))
        {
            Guarded::Rendered(frame) => frame,
            Guarded::Fallback(notice) => screens.fallback(&notice),
        }
    }

    /// Applies a screen event. Storage failures are surfaced as error alerts.
    pub async fn handle(&mut self, event: ShellEvent) {
        if let Err(e) = self.shell.dispatch(event).await {
            warn!(error = %e, "transition failed");
            self.shell.raise_alert(Alert::error(e.to_string()));
        }
    }
}
