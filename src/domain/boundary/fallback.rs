//! What a tripped boundary shows instead of its children.

use serde::{Deserialize, Serialize};

pub const FALLBACK_HEADING: &str = "Something went wrong";
pub const FALLBACK_MESSAGE: &str = "We encountered an unexpected error.";
pub const RELOAD_LABEL: &str = "Reload App";

/// The failure a boundary captured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedError {
    /// String form of the error or panic payload.
    pub message: String,
    /// Where in the tree it happened, for the diagnostic sink only.
    pub context: String,
}

impl CapturedError {
    pub fn new(message: impl Into<String>, context: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: context.into(),
        }
    }
}

/// Fixed fallback notice with a collapsible detail panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackNotice {
    pub heading: String,
    pub message: String,
    pub action: String,
    pub details: String,
}

impl FallbackNotice {
    pub fn for_error(error: &CapturedError) -> Self {
        Self {
            heading: FALLBACK_HEADING.to_string(),
            message: FALLBACK_MESSAGE.to_string(),
            action: RELOAD_LABEL.to_string(),
            details: error.message.clone(),
        }
    }
}
