//! Terminal adapter - text screens, line input and the console loop.

mod console;
pub mod input;
mod screens;

pub use console::{Console, ConsoleScreens};
pub use input::{parse_command, Command, InputError};
pub use screens::TerminalScreens;
