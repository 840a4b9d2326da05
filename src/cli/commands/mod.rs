//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. Commands are
//! routed by [`CommandDispatcher`].

pub mod check;
pub mod completions;
pub mod dispatcher;
pub mod list;
pub mod schema;

pub use dispatcher::{
    Command, CommandDispatcher, CommandResult, EXIT_BLOCKED, EXIT_CANCELLED, EXIT_ERROR,
    EXIT_READY,
};
