//! Command-line interface for upgate.
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations

pub mod args;
pub mod commands;

pub use args::{
    CheckArgs, Cli, Commands, CompletionsArgs, ListArgs, SchemaArgs, SchemaTarget,
};
pub use commands::{
    Command, CommandDispatcher, CommandResult, EXIT_BLOCKED, EXIT_CANCELLED, EXIT_ERROR,
    EXIT_READY,
};
