//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::checks::UpgradeType;
use crate::model::StackId;
use crate::output::OutputFormat;

/// Upgate - Cluster upgrade precondition checks.
#[derive(Debug, Parser)]
#[command(name = "upgate")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default .upgate/config.yml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Path to project root (overrides current directory)
    #[arg(short, long, global = true)]
    pub project: Option<PathBuf>,

    /// Show verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Minimal output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run upgrade precondition checks against a cluster
    Check(CheckArgs),

    /// List registered checks
    List(ListArgs),

    /// Print the JSON Schema of the fleet state or config file
    Schema(SchemaArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `check` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CheckArgs {
    /// Cluster to check
    #[arg(long)]
    pub cluster: String,

    /// Target stack as NAME-VERSION (e.g. HDP-2.6)
    #[arg(long, value_name = "NAME-VERSION")]
    pub stack: StackId,

    /// Target repository version (e.g. 2.6.4.0-91)
    #[arg(long = "version", value_name = "VERSION")]
    pub target_version: String,

    /// Fleet state file (overrides settings.state_file)
    #[arg(long, value_name = "FILE")]
    pub state: Option<PathBuf>,

    /// How the upgrade will proceed
    #[arg(long, value_enum, default_value_t = UpgradeType::Rolling)]
    pub upgrade_type: UpgradeType,

    /// Report format (overrides settings.default_format)
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Treat warnings as blocking
    #[arg(long)]
    pub strict: bool,

    /// Skip checks by id (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub skip: Vec<String>,

    /// Cancel checks still running after this many seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,

    /// Maximum checks evaluated concurrently (overrides settings.max_parallel)
    #[arg(long, value_name = "N")]
    pub max_parallel: Option<usize>,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Which schema `upgate schema` prints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SchemaTarget {
    /// The fleet state file
    #[default]
    State,
    /// The configuration file
    Config,
}

/// Arguments for the `schema` command.
#[derive(Debug, Clone, Default, clap::Args)]
pub struct SchemaArgs {
    /// Schema to print
    #[arg(value_enum, default_value_t = SchemaTarget::State)]
    pub target: SchemaTarget,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
