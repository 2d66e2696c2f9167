//! Input parsing for the terminal screens.
//!
//! Each screen accepts its own verbs; a few (help, quit, reload, dismiss, go)
//! work everywhere because the layout offers them. Screens validate their own
//! input here. The shell never sees malformed records.

use serde_json::{Map, Value};

use crate::domain::foundation::ValidationError;
use crate::domain::shell::{DecisionData, ShellEvent, UserProfile, View, ViewKey};

/// What a line of input asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A callback into the shell.
    Shell(ShellEvent),
    /// Result screen: keep the current decision, then report `Saved`.
    SaveDecision,
    /// History screen: forget every saved decision.
    ClearHistory,
    /// Fallback notice: expand or collapse the technical details.
    ToggleDetails,
    Reload,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Unknown command '{0}'. Type 'help' for options.")]
    UnknownCommand(String),

    #[error("'{0}' needs an argument. Type 'help' for options.")]
    MissingArgument(&'static str),

    #[error("Could not read '{0}': expected key=value")]
    MalformedPair(String),

    #[error("Unterminated quote in input")]
    UnterminatedQuote,

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Parses one line typed while `view` is on screen.
///
/// Returns `Ok(None)` for blank input.
pub fn parse_command(view: View, line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    if let Some(command) = parse_global(verb, rest)? {
        return Ok(Some(command));
    }

    let command = match (view, verb) {
        (View::Onboarding, "done") => {
            let profile = UserProfile::from_value(parse_record(rest)?)?;
            require_text(profile.text("name"), "name")?;
            Command::Shell(ShellEvent::OnboardingCompleted(profile))
        }

        (View::Home | View::Analysis | View::History, "new") => navigate(View::NewDecision),
        (View::Home | View::Analysis, "history") => navigate(View::History),
        (View::Home | View::Analysis, "settings") => navigate(View::Settings),

        (View::NewDecision, "analyze") => {
            // Form validation is reported through the alert callback rather
            // than rejected outright, so the shell surfaces it.
            match DecisionData::from_value(parse_record(rest)?) {
                Ok(decision) => match require_text(decision.text("title"), "title") {
                    Ok(()) => Command::Shell(ShellEvent::Analyze(decision)),
                    Err(e) => Command::Shell(ShellEvent::ReportError(e.to_string())),
                },
                Err(e) => Command::Shell(ShellEvent::ReportError(e.to_string())),
            }
        }

        (View::Result, "save") => Command::SaveDecision,
        (View::History, "clear") => Command::ClearHistory,

        (View::Settings, "toggle" | "theme") => Command::Shell(ShellEvent::ToggleTheme),

        (View::NewDecision | View::Result | View::History | View::Settings, "back") => {
            Command::Shell(ShellEvent::Back)
        }

        _ => return Err(InputError::UnknownCommand(verb.to_string())),
    };

    Ok(Some(command))
}

/// Parses input while the error boundary shows its fallback.
pub fn parse_fallback_command(line: &str) -> Option<Command> {
    match line.trim() {
        "reload" => Some(Command::Reload),
        "details" => Some(Command::ToggleDetails),
        "quit" | "exit" => Some(Command::Quit),
        _ => None,
    }
}

fn parse_global(verb: &str, rest: &str) -> Result<Option<Command>, InputError> {
    let command = match verb {
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "reload" => Command::Reload,
        "dismiss" => Command::Shell(ShellEvent::DismissAlert),
        "go" => {
            if rest.is_empty() {
                return Err(InputError::MissingArgument("go"));
            }
            // Stored as typed; unknown keys render home
            Command::Shell(ShellEvent::Navigate(ViewKey::new(rest)))
        }
        _ => return Ok(None),
    };
    Ok(Some(command))
}

fn navigate(view: View) -> Command {
    Command::Shell(ShellEvent::Navigate(view.into()))
}

fn require_text(value: Option<String>, field: &str) -> Result<(), ValidationError> {
    match value {
        Some(text) if !text.trim().is_empty() => Ok(()),
        _ => Err(ValidationError::empty_field(field)),
    }
}

/// Reads JSON (objects are expected) or a list of `key=value` pairs.
pub fn parse_record(input: &str) -> Result<Value, InputError> {
    let input = input.trim();
    if input.starts_with('{') || input.starts_with('[') {
        return serde_json::from_str(input).map_err(|e| InputError::InvalidJson(e.to_string()));
    }

    let mut fields = Map::new();
    for token in tokenize(input)? {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => {
                fields.insert(key.to_string(), Value::String(value.to_string()));
            }
            _ => return Err(InputError::MalformedPair(token)),
        }
    }
    Ok(Value::Object(fields))
}

/// Splits on whitespace, keeping double-quoted runs together and dropping the quotes.
fn tokenize(input: &str) -> Result<Vec<String>, InputError> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in input.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    tokens.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(InputError::UnterminatedQuote);
    }
    if !current.is_empty() {
        tokens.push(current);
    }
    Ok(tokens)
}
