//! Application layer - the shell, the error boundary and the mounted app.
//!
//! This layer coordinates session state transitions with the storage and
//! presentation ports, and contains rendering failures.

mod app;
mod boundary;
mod shell;

pub use app::App;
pub use boundary::{install_panic_hook, ErrorBoundary, Guarded};
pub use shell::{critical_error_frame, AppShell, ShellError, UNREADABLE_PROFILE_MESSAGE};
