//! ErrorBoundary - contains rendering failures of everything beneath it.
//!
//! The boundary runs a render closure and captures both returned errors and
//! panics. The first failure trips it; from then on the closure is never run
//! again and only the fallback notice is produced. A new boundary (a full
//! reload) is the only way back.
//!
//! Only the closure passed to [`ErrorBoundary::render`] is guarded. Event
//! handling and storage work happen outside it and must handle their own
//! failures.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use tracing::error;

use crate::domain::boundary::{BoundaryStatus, CapturedError, FallbackNotice};
use crate::domain::foundation::StateMachine;

/// Output of a guarded render.
#[derive(Debug, Clone, PartialEq)]
pub enum Guarded<T> {
    /// Children rendered unmodified.
    Rendered(T),
    /// The boundary has tripped.
    Fallback(FallbackNotice),
}

#[derive(Debug, Default)]
pub struct ErrorBoundary {
    status: BoundaryStatus,
    captured: Option<CapturedError>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> BoundaryStatus {
        self.status
    }

    /// The failure that tripped the boundary, if any.
    pub fn captured(&self) -> Option<&CapturedError> {
        self.captured.as_ref()
    }

    /// Runs `child` unless already tripped.
    ///
    /// `context` describes where the child sits (for example the active view);
    /// it goes to the diagnostic log only.
    pub fn render<T, E, F>(&mut self, context: &str, child: F) -> Guarded<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: fmt::Display,
    {
        if let Some(captured) = &self.captured {
            return Guarded::Fallback(FallbackNotice::for_error(captured));
        }

        let message = match panic::catch_unwind(AssertUnwindSafe(child)) {
            Ok(Ok(rendered)) => return Guarded::Rendered(rendered),
            Ok(Err(e)) => e.to_string(),
            Err(payload) => panic_message(payload.as_ref()),
        };

        self.trip(CapturedError::new(message, context))
    }

    fn trip<T>(&mut self, captured: CapturedError) -> Guarded<T> {
        match self.status.transition_to(BoundaryStatus::Failed) {
            Ok(next) => self.status = next,
            Err(e) => error!(error = %e, "boundary already failed"),
        }

        error!(
            error = %captured.message,
            context = %captured.context,
            "ErrorBoundary caught an error"
        );

        let notice = FallbackNotice::for_error(&captured);
        self.captured = Some(captured);
        Guarded::Fallback(notice)
    }
}

/// Reports panics through `tracing` instead of printing them to stderr.
///
/// Process-wide; install once at startup, after the subscriber.
pub fn install_panic_hook() {
    panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(panic = %panic_message(info.payload()), %location, "thread panicked");
    }));
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
