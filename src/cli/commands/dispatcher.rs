//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for routing CLI subcommands

use std::path::{Path, PathBuf};

use crate::cli::args::{Cli, Commands};
use crate::error::Result;
use crate::ui::UserInterface;

/// Exit code when checks ran and nothing blocks the upgrade.
pub const EXIT_READY: i32 = 0;
/// Exit code when at least one check blocks the upgrade.
pub const EXIT_BLOCKED: i32 = 1;
/// Exit code for configuration, state, or request errors.
pub const EXIT_ERROR: i32 = 2;
/// Exit code when the run was cancelled before a verdict.
pub const EXIT_CANCELLED: i32 = 3;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command.
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug, PartialEq, Eq)]
pub struct CommandResult {
    /// Whether the command succeeded.
    pub success: bool,

    /// Exit code to use (0 for success, non-zero for failure).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self {
            success: true,
            exit_code: EXIT_READY,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: i32) -> Self {
        Self {
            success: false,
            exit_code,
        }
    }
}

/// Dispatches CLI commands to their implementations.
pub struct CommandDispatcher {
    project_root: PathBuf,
    config_override: Option<PathBuf>,
}

impl CommandDispatcher {
    /// Create a new dispatcher for the given project root.
    pub fn new(project_root: PathBuf) -> Self {
        Self {
            project_root,
            config_override: None,
        }
    }

    /// Load configuration from exactly this file.
    pub fn with_config_override(mut self, path: Option<PathBuf>) -> Self {
        self.config_override = path;
        self
    }

    /// Get the project root path.
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Dispatch and execute a command.
    pub fn dispatch(&self, cli: &Cli, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let config = self.config_override.as_deref();
        match &cli.command {
            Commands::Check(args) => {
                super::check::CheckCommand::new(&self.project_root, config, args.clone())
                    .execute(ui)
            }
            Commands::List(args) => {
                super::list::ListCommand::new(&self.project_root, config, args.clone())
                    .execute(ui)
            }
            Commands::Schema(args) => super::schema::SchemaCommand::new(args.clone()).execute(ui),
            Commands::Completions(args) => {
                super::completions::CompletionsCommand::new(args.clone()).execute(ui)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockUI;
    use clap::Parser;
    use tempfile::TempDir;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert!(result.success);
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn command_result_failure() {
        let result = CommandResult::failure(EXIT_BLOCKED);
        assert!(!result.success);
        assert_eq!(result.exit_code, 1);
    }

    #[test]
    fn dispatcher_stores_project_root() {
        let dispatcher = CommandDispatcher::new(PathBuf::from("/tmp/fleet"));
        assert_eq!(dispatcher.project_root(), Path::new("/tmp/fleet"));
    }

    #[test]
    fn dispatches_schema() {
        let temp = TempDir::new().unwrap();
        let cli = Cli::parse_from(["upgate", "schema"]);
        let mut ui = MockUI::new();

        let result = CommandDispatcher::new(temp.path().to_path_buf())
            .dispatch(&cli, &mut ui)
            .unwrap();

        assert!(result.success);
        assert!(ui.emitted().contains("clusters"));
    }

    #[test]
    fn dispatches_list_with_override() {
        let temp = TempDir::new().unwrap();
        let config = temp.path().join("custom.yml");
        std::fs::write(&config, "checks:\n  skip: [install-packages]").unwrap();
        let cli = Cli::parse_from(["upgate", "list", "--json"]);
        let mut ui = MockUI::new();

        CommandDispatcher::new(temp.path().to_path_buf())
            .with_config_override(Some(config))
            .dispatch(&cli, &mut ui)
            .unwrap();

        let listed: serde_json::Value = serde_json::from_str(ui.emitted()).unwrap();
        assert_eq!(listed[1]["id"], "install-packages");
        assert_eq!(listed[1]["skipped"], true);
    }
}
