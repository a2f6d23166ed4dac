//! Shell command execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{execute, shell_quote, CommandOptions, CommandResult};
pub use platform::{is_ci, is_elevated};
