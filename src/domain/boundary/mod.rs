//! Boundary module - failure containment vocabulary.

mod fallback;
mod status;

pub use fallback::{CapturedError, FallbackNotice, FALLBACK_HEADING, FALLBACK_MESSAGE, RELOAD_LABEL};
pub use status::BoundaryStatus;
