//! Terminal UI configuration

use serde::Deserialize;

use super::error::ValidationError;

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    /// Emit ANSI colors
    #[serde(default = "default_color")]
    pub color: bool,

    #[serde(default = "default_prompt")]
    pub prompt: String,
}

impl UiConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prompt.is_empty() {
            return Err(ValidationError::EmptyPrompt);
        }
        Ok(())
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            prompt: default_prompt(),
        }
    }
}

fn default_color() -> bool {
    true
}

fn default_prompt() -> String {
    "> ".to_string()
}
