//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations. `run` and `status` also expose
//! `execute_with`, which takes a loaded config and a [`Host`](crate::host::Host)
//! so they can be driven against a mock system.

pub mod dispatcher;
pub mod display;
pub mod list;
pub mod run;
pub mod status;

pub use dispatcher::{Command, CommandDispatcher, CommandResult};
